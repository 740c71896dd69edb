// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The activation state machine shared by press and toggle primitives.
//!
//! ## States
//!
//! The controller holds one boolean (`pressed` / `checked`), either owned by
//! the caller (controlled) or by the controller (uncontrolled). The choice is
//! made once at construction and never changes; later attempts to switch are
//! logged and ignored. Disabled controls ignore activation entirely, even
//! when they stay focusable for announcement.
//!
//! ## Activation
//!
//! [`ActivationController::activate`] computes `next = !current`, stores it
//! when uncontrolled, and emits one [`ActivationEvent`] to the change
//! callback. Pointer activation of an [`ActivationKind::Press`] control also
//! calls the raw press callback.
//!
//! The controller also provides three stable handlers
//! ([`ActivationController::handlers`]) to inject under `onPress`,
//! `onKeyDown`, and `onAccessibilityAction`. Keys and actions that do not
//! activate are forwarded to the caller's raw key and action callbacks.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_activation::{ActivationController, ActivationKind, ActivationSource};
//! use understory_props::Event;
//!
//! let ctl = ActivationController::new(ActivationKind::Toggle, None, false);
//! let seen = Rc::new(Cell::new(None));
//! let sink = seen.clone();
//! ctl.set_on_change(Some(Rc::new(move |ev| sink.set(Some(ev)))));
//!
//! ctl.handlers().on_key_down.call(&mut Event::key("Enter"));
//! assert!(ctl.value());
//! assert_eq!(seen.get().map(|ev| ev.source), Some(ActivationSource::Keyboard));
//! ```

use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};
use core::fmt;

use understory_props::{Event, EventPayload, Handler};

use crate::press::PressOutcome;
use crate::source::{ActivationEvent, ActivationSource, is_activation_action, is_activation_key};

/// Callback receiving each accepted activation.
pub type ChangeHandler = Rc<dyn Fn(ActivationEvent)>;

bitflags::bitflags! {
    /// Interaction flags for a control.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct InteractionFlags: u8 {
        /// Input does not change state.
        const DISABLED = 0b0000_0001;
        /// Stay in focus and tab order while disabled, so the control can be announced.
        const FOCUSABLE_WHEN_DISABLED = 0b0000_0010;
    }
}

/// Which primitive the controller drives.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ActivationKind {
    /// A press-only control; pointer activation also fires the raw press callback.
    #[default]
    Press,
    /// A two-state toggle.
    Toggle,
}

/// Snapshot of the controller's boolean.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ActivationState {
    /// Current value as the control should report it.
    pub value: bool,
    /// Whether the caller owns `value`.
    pub is_controlled: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Controlled(bool),
    Uncontrolled(bool),
}

impl Mode {
    fn value(self) -> bool {
        match self {
            Self::Controlled(v) | Self::Uncontrolled(v) => v,
        }
    }
}

#[derive(Default)]
struct Callbacks {
    on_change: Option<ChangeHandler>,
    on_press: Option<Handler>,
    on_key_down: Option<Handler>,
    on_accessibility_action: Option<Handler>,
}

/// Handlers a primitive injects into its property bag.
///
/// Created once per controller, so their identities are stable across render
/// passes.
#[derive(Clone, Debug)]
pub struct ControllerHandlers {
    /// Inject under `onPress`.
    pub on_press: Handler,
    /// Inject under `onKeyDown`.
    pub on_key_down: Handler,
    /// Inject under `onAccessibilityAction`.
    pub on_accessibility_action: Handler,
}

impl ControllerHandlers {
    fn new(weak: &Weak<Inner>) -> Self {
        Self {
            on_press: bind(weak, ActivationController::handle_press),
            on_key_down: bind(weak, ActivationController::handle_key_down),
            on_accessibility_action: bind(weak, ActivationController::handle_accessibility_action),
        }
    }
}

/// Handlers hold the controller weakly; the controller owns the handlers.
fn bind(weak: &Weak<Inner>, f: fn(&ActivationController, &mut Event)) -> Handler {
    let weak = weak.clone();
    Handler::new(move |event| {
        if let Some(inner) = weak.upgrade() {
            f(&ActivationController { inner }, event);
        }
    })
}

struct Inner {
    kind: ActivationKind,
    mode: Cell<Mode>,
    flags: Cell<InteractionFlags>,
    callbacks: RefCell<Callbacks>,
    handlers: ControllerHandlers,
}

/// Controlled/uncontrolled activation state machine.
///
/// Cloning yields another handle to the same controller.
#[derive(Clone)]
pub struct ActivationController {
    inner: Rc<Inner>,
}

impl ActivationController {
    /// Create a controller.
    ///
    /// `value` decides the mode for the controller's whole life: `Some` is
    /// controlled, `None` is uncontrolled and seeded from `default_value`.
    pub fn new(kind: ActivationKind, value: Option<bool>, default_value: bool) -> Self {
        let mode = value.map_or(Mode::Uncontrolled(default_value), Mode::Controlled);
        let inner = Rc::new_cyclic(|weak| Inner {
            kind,
            mode: Cell::new(mode),
            flags: Cell::new(InteractionFlags::empty()),
            callbacks: RefCell::new(Callbacks::default()),
            handlers: ControllerHandlers::new(weak),
        });
        Self { inner }
    }

    /// Which primitive this controller drives.
    pub fn kind(&self) -> ActivationKind {
        self.inner.kind
    }

    /// Current value.
    pub fn value(&self) -> bool {
        self.inner.mode.get().value()
    }

    /// Whether the caller owns the value.
    pub fn is_controlled(&self) -> bool {
        matches!(self.inner.mode.get(), Mode::Controlled(_))
    }

    /// Current value and mode.
    pub fn state(&self) -> ActivationState {
        ActivationState {
            value: self.value(),
            is_controlled: self.is_controlled(),
        }
    }

    /// Feed the caller's controlled value for this render pass.
    ///
    /// A controlled controller adopts `Some` values and keeps its last value
    /// on `None`. An uncontrolled controller ignores `Some` values.
    pub fn sync_value(&self, value: Option<bool>) {
        match (self.inner.mode.get(), value) {
            (Mode::Controlled(_), Some(v)) => self.inner.mode.set(Mode::Controlled(v)),
            (Mode::Controlled(last), None) => {
                tracing::warn!(
                    last,
                    "controlled control lost its value; it stays controlled"
                );
            }
            (Mode::Uncontrolled(_), Some(v)) => {
                tracing::warn!(
                    ignored = v,
                    "uncontrolled control received a value; it stays uncontrolled"
                );
            }
            (Mode::Uncontrolled(_), None) => {}
        }
    }

    /// Current flags.
    pub fn flags(&self) -> InteractionFlags {
        self.inner.flags.get()
    }

    /// Replace the flags.
    pub fn set_flags(&self, flags: InteractionFlags) {
        self.inner.flags.set(flags);
    }

    /// Whether input is ignored.
    pub fn is_disabled(&self) -> bool {
        self.flags().contains(InteractionFlags::DISABLED)
    }

    /// Whether the control belongs in focus and tab order.
    pub fn is_focusable(&self) -> bool {
        !self.is_disabled() || self.flags().contains(InteractionFlags::FOCUSABLE_WHEN_DISABLED)
    }

    /// Set the change callback.
    pub fn set_on_change(&self, on_change: Option<ChangeHandler>) {
        self.inner.callbacks.borrow_mut().on_change = on_change;
    }

    /// Set the raw press callback (pointer activation of press controls only).
    pub fn set_on_press(&self, on_press: Option<Handler>) {
        self.inner.callbacks.borrow_mut().on_press = on_press;
    }

    /// Set the callback for keys that do not activate.
    pub fn set_on_key_down(&self, on_key_down: Option<Handler>) {
        self.inner.callbacks.borrow_mut().on_key_down = on_key_down;
    }

    /// Set the callback for accessibility actions that do not activate.
    pub fn set_on_accessibility_action(&self, on_action: Option<Handler>) {
        self.inner.callbacks.borrow_mut().on_accessibility_action = on_action;
    }

    /// The stable handlers to inject.
    pub fn handlers(&self) -> &ControllerHandlers {
        &self.inner.handlers
    }

    /// Activate from `source`.
    ///
    /// Returns the emitted event, or `None` if the control is disabled.
    pub fn activate(&self, source: ActivationSource) -> Option<ActivationEvent> {
        self.run(source, None)
    }

    /// Activate if a tracked pointer press completed.
    pub fn handle_pointer_release(&self, outcome: PressOutcome) -> Option<ActivationEvent> {
        match outcome {
            PressOutcome::Release => self.activate(ActivationSource::Pointer),
            PressOutcome::Cancelled | PressOutcome::NoPress => None,
        }
    }

    fn handle_press(&self, event: &mut Event) {
        self.run(ActivationSource::Pointer, Some(event));
    }

    fn handle_key_down(&self, event: &mut Event) {
        let activates = matches!(
            event.payload(),
            EventPayload::Key { key } if is_activation_key(key)
        );
        if activates {
            self.run(ActivationSource::Keyboard, Some(event));
        } else {
            let raw = self.inner.callbacks.borrow().on_key_down.clone();
            if let Some(raw) = raw {
                raw.call(event);
            }
        }
    }

    fn handle_accessibility_action(&self, event: &mut Event) {
        let activates = matches!(
            event.payload(),
            EventPayload::AccessibilityAction { name } if is_activation_action(name)
        );
        if activates {
            self.run(ActivationSource::AssistiveAction, Some(event));
        } else {
            let raw = self.inner.callbacks.borrow().on_accessibility_action.clone();
            if let Some(raw) = raw {
                raw.call(event);
            }
        }
    }

    fn run(&self, source: ActivationSource, event: Option<&mut Event>) -> Option<ActivationEvent> {
        if self.is_disabled() {
            tracing::debug!(%source, "activation ignored: control is disabled");
            return None;
        }

        let next_value = !self.value();
        if let Mode::Uncontrolled(_) = self.inner.mode.get() {
            self.inner.mode.set(Mode::Uncontrolled(next_value));
        }
        let emitted = ActivationEvent { next_value, source };
        tracing::trace!(%source, next_value, "activation");

        // Callbacks may re-enter the controller, so none may run under a borrow.
        let (on_change, on_press) = {
            let callbacks = self.inner.callbacks.borrow();
            let raw_press = self.inner.kind == ActivationKind::Press
                && source == ActivationSource::Pointer;
            (
                callbacks.on_change.clone(),
                callbacks.on_press.clone().filter(|_| raw_press),
            )
        };
        if let Some(on_change) = on_change {
            on_change(emitted);
        }
        if let Some(on_press) = on_press {
            match event {
                Some(event) => on_press.call(event),
                None => on_press.call(&mut Event::press()),
            }
        }
        Some(emitted)
    }
}

impl fmt::Debug for ActivationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivationController")
            .field("kind", &self.inner.kind)
            .field("mode", &self.inner.mode.get())
            .field("flags", &self.inner.flags.get())
            .finish_non_exhaustive()
    }
}
