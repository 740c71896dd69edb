// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Props: property bags and their reconciliation for headless primitives.
//!
//! ## Overview
//!
//! A headless primitive (a button, a toggle) does not draw anything. It hands
//! the host a [`PropertyBag`] describing the accessibility role and state,
//! focus semantics, and event handlers it needs. Callers customize the same
//! element with their own bag. This crate combines the two so that:
//!
//! - accessibility and focus keys the primitive depends on cannot be
//!   overridden by accident ([`keys::CRITICAL_KEYS`]),
//! - handlers from both sides run, in a fixed and documented order
//!   ([`HandlerComposer`], [`ComposeOrder`]),
//! - styles from both sides are kept, caller styles applied last,
//! - any other key the caller passes reaches the host untouched,
//! - nothing is reallocated when nothing changed, so a host that diffs by
//!   reference sees no spurious updates.
//!
//! ## Building blocks
//!
//! - [`PropertyBag`] / [`Value`]: ordered, copy-on-write mapping with
//!   identity-aware equality.
//! - [`Handler`] / [`Event`]: shared callbacks and the events they receive.
//!   [`Event::prevent_default`] is the only cancellation primitive.
//! - [`HandlerComposer`]: chains two handlers and caches the result per pair
//!   with weak references only.
//! - [`PropMerger`]: the merge rules; see the [`merge`] module.
//! - [`merge_refs`]: fans one [`InstanceHandle`] out to several [`RefSlot`]s.
//!
//! ## Minimal example
//!
//! ```
//! use understory_props::{keys, Event, Handler, PropMerger, PropertyBag, Value};
//!
//! let merger = PropMerger::default();
//! let injected = PropertyBag::new()
//!     .with(keys::ACCESSIBILITY_ROLE, "button")
//!     .with(keys::ON_PRESS, Handler::new(|_| { /* toggle state */ }));
//! let child = PropertyBag::new()
//!     .with(keys::ACCESSIBILITY_ROLE, "image")
//!     .with(keys::ON_PRESS, Handler::new(|_| { /* caller analytics */ }))
//!     .with("testID", "save");
//!
//! let merged = merger.merge(&injected, &child);
//! assert_eq!(merged.get(keys::ACCESSIBILITY_ROLE), Some(&Value::from("button")));
//! assert_eq!(merged.get("testID"), Some(&Value::from("save")));
//!
//! // Both handlers run, primitive first.
//! let press = merged.get(keys::ON_PRESS).and_then(Value::as_handler).unwrap();
//! press.call(&mut Event::press());
//! ```
//!
//! ## Features
//!
//! - `std` (default): adds [`merge_props`], [`merge_handlers`], and
//!   [`with_default_merger`], which share one thread-local default
//!   [`PropMerger`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod bag;
mod event;
mod handler;
pub mod keys;
pub mod merge;
mod refs;
mod value;

pub use bag::{Key, PropertyBag};
pub use event::{Event, EventPayload, Handler};
pub use handler::{ComposeOrder, HandlerComposer};
pub use merge::PropMerger;
#[cfg(feature = "std")]
pub use merge::{merge_handlers, merge_props, with_default_merger};
pub use refs::{InstanceHandle, RefHolder, RefSlot, merge_refs};
pub use value::Value;
