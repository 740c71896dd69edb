// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element descriptions handed to the host renderer.

use alloc::borrow::Cow;
use alloc::rc::Rc;
use alloc::vec::Vec;

use understory_props::{InstanceHandle, Key, PropertyBag, RefSlot, Value};

/// What an [`Element`] mounts as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// A host view, for example `"View"` or `"Text"`.
    Host(Cow<'static, str>),
    /// A caller-defined component that mounts exactly one instance.
    Component(Cow<'static, str>),
    /// A transparent grouping with no instance of its own.
    Fragment,
}

/// A description of one element: what to mount, with which properties,
/// observed by which ref, containing which children.
///
/// Elements are plain data. Building one does not talk to the host.
#[derive(Clone, Debug)]
pub struct Element {
    /// What to mount.
    pub kind: ElementKind,
    /// Properties in effect for this render pass.
    pub props: PropertyBag,
    /// Observer notified with the mounted instance.
    pub ref_slot: Option<RefSlot>,
    /// Child nodes, in order.
    pub children: Vec<Node>,
}

impl Element {
    /// Element of the given kind with no properties, ref, or children.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            props: PropertyBag::new(),
            ref_slot: None,
            children: Vec::new(),
        }
    }

    /// A host view element.
    pub fn host(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ElementKind::Host(name.into()))
    }

    /// A component element.
    pub fn component(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ElementKind::Component(name.into()))
    }

    /// A fragment.
    pub fn fragment() -> Self {
        Self::new(ElementKind::Fragment)
    }

    /// Replace all properties.
    #[must_use]
    pub fn with_props(mut self, props: PropertyBag) -> Self {
        self.props = props;
        self
    }

    /// Set one property.
    #[must_use]
    pub fn with_prop(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.props.insert(key, value);
        self
    }

    /// Set the ref observer.
    #[must_use]
    pub fn with_ref(mut self, slot: impl Into<Option<RefSlot>>) -> Self {
        self.ref_slot = slot.into();
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Whether this element mounts an instance that can receive props and a ref.
    pub fn has_instance(&self) -> bool {
        !matches!(self.kind, ElementKind::Fragment)
    }

    /// Tell this element's ref about a mount (`Some`) or unmount (`None`).
    ///
    /// Hosts call this after mounting; it is a no-op without a ref.
    pub fn attach(&self, instance: Option<InstanceHandle>) {
        if let Some(slot) = &self.ref_slot {
            slot.set(instance);
        }
    }
}

/// One child position.
#[derive(Clone, Debug)]
pub enum Node {
    /// An element.
    Element(Element),
    /// Raw text.
    Text(Rc<str>),
    /// Nothing rendered at this position.
    Empty,
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}
