// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Slot: render delegation for headless primitives.
//!
//! A primitive normally renders its own host view. With render delegation
//! ([`RenderMode::Delegate`]) it instead renders the single element a caller
//! supplied, with the primitive's injected props merged in (see
//! [`understory_props::merge`]) and the mounted instance fanned out to both
//! the primitive's ref and the element's own ref.
//!
//! ```
//! use understory_props::{keys, PropMerger, PropertyBag, RefHolder, Value};
//! use understory_slot::{Element, Slot};
//!
//! let merger = PropMerger::default();
//! let injected = PropertyBag::new().with(keys::ACCESSIBILITY_ROLE, "button");
//! let link = Element::component("Link").with_prop("href", "/docs");
//!
//! let own = RefHolder::new();
//! let out = Slot::new(&merger)
//!     .render(&injected, Some(own.into()), &[link.into()])
//!     .unwrap();
//! assert_eq!(out.props.get(keys::ACCESSIBILITY_ROLE), Some(&Value::from("button")));
//! assert_eq!(out.props.get("href"), Some(&Value::from("/docs")));
//! ```
//!
//! Anything other than exactly one element is rejected with
//! [`SlotError::InvalidChild`]. Fragments are handled as described in the
//! [`slot`] module.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod element;
mod error;
pub mod slot;

pub use element::{Element, ElementKind, Node};
pub use error::{ChildShape, SlotError};
#[cfg(feature = "std")]
pub use slot::render_delegate;
pub use slot::{RenderMode, Slot, SlotConfig, single_element};
