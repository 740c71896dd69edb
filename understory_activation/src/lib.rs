// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Activation: one activation path for pointer, keyboard, and assistive input.
//!
//! A control can be activated by a pointer release, by an activation key
//! ([`ACTIVATION_KEYS`]), or by an assistive technology action
//! ([`ACTIVATION_ACTIONS`]). [`ActivationController`] funnels all three into
//! one transition that flips a boolean and emits an [`ActivationEvent`]
//! tagged with its [`ActivationSource`].
//!
//! The boolean is either controlled (the caller owns it and re-supplies it
//! with [`ActivationController::sync_value`]) or uncontrolled (the controller
//! owns it, seeded from a default). Disabled controls never activate.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_activation::{ActivationController, ActivationKind, ActivationSource};
//!
//! let ctl = ActivationController::new(ActivationKind::Toggle, Some(false), false);
//! let requested = Rc::new(RefCell::new(Vec::new()));
//! let sink = requested.clone();
//! ctl.set_on_change(Some(Rc::new(move |ev| sink.borrow_mut().push(ev.next_value))));
//!
//! ctl.activate(ActivationSource::AssistiveAction);
//! // Controlled: the request is reported, the value waits for the caller.
//! assert_eq!(*requested.borrow(), [true]);
//! assert!(!ctl.value());
//! ctl.sync_value(Some(true));
//! assert!(ctl.value());
//! ```
//!
//! Hosts that deliver raw pointer down/move/up streams can use
//! [`press::PressTracker`] to decide when a release counts, then hand the
//! outcome to [`ActivationController::handle_pointer_release`].
//!
//! ## Features
//!
//! - `std` (default): Enables `std` in Kurbo and the other dependencies.
//! - `libm`: Use Kurbo's `libm` support in `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
pub mod press;
mod source;

pub use controller::{
    ActivationController, ActivationKind, ActivationState, ChangeHandler, ControllerHandlers,
    InteractionFlags,
};
pub use press::{PressOutcome, PressTracker};
pub use source::{
    ACTIVATION_ACTIONS, ACTIVATION_KEYS, ActivationEvent, ActivationSource, UnknownSource,
    is_activation_action, is_activation_key,
};
