// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render delegation.
//!
//! A primitive either renders its own default host view or delegates to the
//! one element a caller supplies ([`RenderMode`]). Delegation merges the
//! primitive's injected props into that element's props with
//! [`PropMerger`] and fans the mounted instance out to both the primitive's
//! ref and the element's own ref.
//!
//! ## Fragments
//!
//! A fragment has no instance, so nothing can receive the merged props or
//! the ref. By default the slot logs a warning (debug builds only) and falls
//! back to wrapping the fragment in a host view that carries the injected
//! props directly. With [`SlotConfig::strict`] the slot returns
//! [`SlotError::UnsupportedChild`] instead.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use understory_props::{PropMerger, PropertyBag, RefSlot, merge_refs};

use crate::element::{Element, Node};
use crate::error::{ChildShape, SlotError};

/// How a primitive renders.
#[derive(Clone, Debug, Default)]
pub enum RenderMode {
    /// Render the primitive's own default host view.
    #[default]
    Default,
    /// Render the caller's single child element in place of the host view.
    Delegate(Vec<Node>),
}

impl RenderMode {
    /// Delegate to exactly one element.
    pub fn delegate(element: Element) -> Self {
        Self::Delegate(alloc::vec![Node::Element(element)])
    }
}

/// Slot behavior knobs.
#[derive(Clone, Debug)]
pub struct SlotConfig {
    /// Return [`SlotError::UnsupportedChild`] for fragments instead of
    /// warning and falling back.
    pub strict: bool,
    /// Host view used to wrap a fragment in the non-strict fallback.
    pub fallback_host: Cow<'static, str>,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            strict: false,
            fallback_host: Cow::Borrowed("View"),
        }
    }
}

/// Merges a primitive's props and ref into a single caller element.
#[derive(Debug)]
pub struct Slot<'a> {
    merger: &'a PropMerger,
    config: SlotConfig,
}

impl<'a> Slot<'a> {
    /// Slot with the default configuration.
    pub fn new(merger: &'a PropMerger) -> Self {
        Self::with_config(merger, SlotConfig::default())
    }

    /// Slot with an explicit configuration.
    pub fn with_config(merger: &'a PropMerger, config: SlotConfig) -> Self {
        Self { merger, config }
    }

    /// Produce the element to mount in place of the primitive's host view.
    ///
    /// The returned element has the child's kind and children, the merged
    /// props, and a ref that forwards to `own_ref` and then the child's ref.
    pub fn render(
        &self,
        injected: &PropertyBag,
        own_ref: Option<RefSlot>,
        children: &[Node],
    ) -> Result<Element, SlotError> {
        let child = single_element(children)?;

        if !child.has_instance() {
            if self.config.strict {
                return Err(SlotError::UnsupportedChild);
            }
            if cfg!(debug_assertions) {
                tracing::warn!(
                    fallback = %self.config.fallback_host,
                    "render delegation target is a fragment; wrapping it in a host view"
                );
            }
            return Ok(Element::host(self.config.fallback_host.clone())
                .with_props(injected.clone())
                .with_ref(own_ref)
                .with_child(child.clone()));
        }

        Ok(Element {
            kind: child.kind.clone(),
            props: self.merger.merge(injected, &child.props),
            ref_slot: Some(merge_refs([own_ref, child.ref_slot.clone()])),
            children: child.children.clone(),
        })
    }
}

/// The one element among `children`, ignoring empty positions.
pub fn single_element(children: &[Node]) -> Result<&Element, SlotError> {
    let mut present = children.iter().filter(|n| !matches!(n, Node::Empty));
    match (present.next(), present.next()) {
        (None, _) => Err(SlotError::InvalidChild(ChildShape::None)),
        (Some(Node::Element(element)), None) => Ok(element),
        (Some(_), None) => Err(SlotError::InvalidChild(ChildShape::NotAnElement)),
        (Some(_), Some(_)) => Err(SlotError::InvalidChild(ChildShape::Many(2 + present.count()))),
    }
}

/// [`Slot::render`] with this thread's default merger and configuration.
#[cfg(feature = "std")]
pub fn render_delegate(
    injected: &PropertyBag,
    own_ref: Option<RefSlot>,
    children: &[Node],
) -> Result<Element, SlotError> {
    understory_props::with_default_merger(|merger| {
        Slot::new(merger).render(injected, own_ref, children)
    })
}
