// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event payloads and the reference-counted [`Handler`] type stored in property bags.
//!
//! Handlers are compared by identity, not by behavior: two handlers are the
//! same only when they share one allocation. Rendering hosts diff property
//! bags by reference, so a handler that is rebuilt on every render pass looks
//! like a change even if it does the same thing.

use alloc::borrow::Cow;
use alloc::rc::{Rc, Weak};
use core::fmt;

/// The callable stored behind a [`Handler`].
pub(crate) type HandlerFn = dyn Fn(&mut Event);

/// What kind of input an [`Event`] carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventPayload {
    /// A recognized press (pointer released over the control).
    Press,
    /// A hardware key went down. `key` is the host's logical key name.
    Key {
        /// Logical key name, for example `"Enter"` or `" "`.
        key: Cow<'static, str>,
    },
    /// An assistive technology asked the control to perform a named action.
    AccessibilityAction {
        /// Action name, for example `"activate"` or `"magicTap"`.
        name: Cow<'static, str>,
    },
    /// The control gained focus.
    Focus,
    /// The control lost focus.
    Blur,
    /// Anything else the host wants to route through a handler.
    Custom(Cow<'static, str>),
}

/// An event delivered to a [`Handler`].
///
/// The only cancellation primitive is [`Event::prevent_default`]: a handler
/// that runs first in a composed pair can set it to suppress the second.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    payload: EventPayload,
    default_prevented: bool,
}

impl Event {
    /// Wrap a payload in a fresh, not-yet-prevented event.
    pub fn new(payload: EventPayload) -> Self {
        Self {
            payload,
            default_prevented: false,
        }
    }

    /// A press event.
    pub fn press() -> Self {
        Self::new(EventPayload::Press)
    }

    /// A key-down event for `key`.
    pub fn key(key: impl Into<Cow<'static, str>>) -> Self {
        Self::new(EventPayload::Key { key: key.into() })
    }

    /// An accessibility action event for `name`.
    pub fn accessibility_action(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(EventPayload::AccessibilityAction { name: name.into() })
    }

    /// The payload this event carries.
    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    /// Mark the event so that later handlers in a composed chain are skipped.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether some handler has called [`Event::prevent_default`].
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A shared event callback with identity semantics.
///
/// Cloning a `Handler` is cheap and yields the same identity; see
/// [`Handler::ptr_eq`].
#[derive(Clone)]
pub struct Handler(Rc<HandlerFn>);

impl Handler {
    /// Create a handler from a closure.
    pub fn new(f: impl Fn(&mut Event) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the handler.
    pub fn call(&self, event: &mut Event) {
        (self.0)(event);
    }

    /// Whether `a` and `b` are the same handler.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        a.addr() == b.addr()
    }

    /// Address of the shared allocation, used as an identity key.
    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>().addr()
    }

    pub(crate) fn downgrade(&self) -> Weak<HandlerFn> {
        Rc::downgrade(&self.0)
    }

    pub(crate) fn upgrade(weak: &Weak<HandlerFn>) -> Option<Self> {
        weak.upgrade().map(Self)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler")
            .field(&format_args!("{:#x}", self.addr()))
            .finish()
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl Eq for Handler {}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn clones_share_identity() {
        let a = Handler::new(|_| {});
        let b = a.clone();
        let c = Handler::new(|_| {});
        assert!(Handler::ptr_eq(&a, &b));
        assert!(!Handler::ptr_eq(&a, &c));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn prevent_default_sticks() {
        let mut ev = Event::key("Enter");
        assert!(!ev.is_default_prevented());
        let h = Handler::new(Event::prevent_default);
        h.call(&mut ev);
        assert!(ev.is_default_prevented());
        assert_eq!(ev.payload(), &EventPayload::Key { key: "Enter".into() });
    }

    #[test]
    fn call_runs_closure() {
        let hits = Rc::new(Cell::new(0));
        let seen = hits.clone();
        let h = Handler::new(move |_| seen.set(seen.get() + 1));
        h.call(&mut Event::press());
        h.call(&mut Event::press());
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn weak_upgrade_fails_after_drop() {
        let h = Handler::new(|_| {});
        let weak = h.downgrade();
        assert!(Handler::upgrade(&weak).is_some());
        drop(h);
        assert!(Handler::upgrade(&weak).is_none());
    }
}
