// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Primitives: headless Button and Toggle.
//!
//! The primitives draw nothing. Each render pass produces an
//! [`Element`](understory_slot::Element) description whose property bag
//! carries the accessibility role and state, focus and tab semantics, and
//! activation handlers the control needs. Callers supply presentation
//! through `host_props`, or take over rendering entirely with
//! [`RenderMode::Delegate`](understory_slot::RenderMode::Delegate).
//!
//! Injected accessibility and focus keys always win over caller values.
//! Caller handlers run after the primitive's, caller styles apply after the
//! primitive's, and every other caller key reaches the host untouched.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_primitives::{Toggle, ToggleProps};
//! use understory_props::{keys, Event, PropMerger, Value};
//!
//! let merger = PropMerger::default();
//! let changes = Rc::new(Cell::new(0));
//! let count = changes.clone();
//! let props = ToggleProps {
//!     on_pressed_change: Some(Rc::new(move |_| count.set(count.get() + 1))),
//!     ..ToggleProps::default()
//! };
//!
//! let toggle = Toggle::new(&props);
//! let element = toggle.render(&merger, &props).unwrap();
//! let on_key_down = element.props.get(keys::ON_KEY_DOWN).and_then(Value::as_handler).unwrap();
//! on_key_down.call(&mut Event::key(" "));
//!
//! assert!(toggle.pressed());
//! assert_eq!(changes.get(), 1);
//! ```
//!
//! ## Features
//!
//! - `std` (default): Enables `std` in all Understory dependencies.
//! - `libm`: Use `libm` float math in `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod button;
mod shell;
mod toggle;

pub use button::{BUTTON_ROLE, Button, ButtonProps};
pub use shell::DEFAULT_HOST;
pub use toggle::{TOGGLE_ROLE, Toggle, ToggleProps};
