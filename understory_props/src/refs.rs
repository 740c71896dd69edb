// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instance refs and ref fan-out.
//!
//! The host owns every mounted view. Refs only observe an [`InstanceHandle`]:
//! the host sets `Some(handle)` on mount and `None` on unmount.

use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;

use smallvec::SmallVec;

/// Opaque handle to one mounted host view.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct InstanceHandle(pub u64);

/// A settable holder observing the current instance.
#[derive(Clone, Debug, Default)]
pub struct RefHolder(Rc<Cell<Option<InstanceHandle>>>);

impl RefHolder {
    /// Empty holder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current instance, if mounted.
    pub fn get(&self) -> Option<InstanceHandle> {
        self.0.get()
    }

    /// Overwrite the observed instance.
    pub fn set(&self, value: Option<InstanceHandle>) {
        self.0.set(value);
    }

    /// Whether `a` and `b` are the same holder.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

/// Something that observes an instance: a holder or a callback.
#[derive(Clone)]
pub enum RefSlot {
    /// Plain holder.
    Holder(RefHolder),
    /// Callback invoked with each new value.
    Callback(Rc<dyn Fn(Option<InstanceHandle>)>),
}

impl RefSlot {
    /// Callback slot from a closure.
    pub fn callback(f: impl Fn(Option<InstanceHandle>) + 'static) -> Self {
        Self::Callback(Rc::new(f))
    }

    /// Deliver `value` to this slot.
    pub fn set(&self, value: Option<InstanceHandle>) {
        match self {
            Self::Holder(holder) => holder.set(value),
            Self::Callback(f) => f(value),
        }
    }
}

impl From<RefHolder> for RefSlot {
    fn from(holder: RefHolder) -> Self {
        Self::Holder(holder)
    }
}

impl fmt::Debug for RefSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Holder(holder) => f.debug_tuple("Holder").field(&holder.get()).finish(),
            Self::Callback(_) => f.write_str("Callback"),
        }
    }
}

/// Fan one instance out to every slot, in order. Absent slots are skipped.
///
/// The returned slot can be called any number of times (mount, update,
/// unmount); it never takes ownership of the instance.
///
/// ```
/// use understory_props::{InstanceHandle, RefHolder, RefSlot, merge_refs};
///
/// let a = RefHolder::new();
/// let b = RefHolder::new();
/// let fanout = merge_refs([Some(RefSlot::from(a.clone())), None, Some(RefSlot::from(b.clone()))]);
///
/// fanout.set(Some(InstanceHandle(7)));
/// assert_eq!(a.get(), Some(InstanceHandle(7)));
/// assert_eq!(b.get(), Some(InstanceHandle(7)));
///
/// fanout.set(None);
/// assert_eq!(a.get(), None);
/// ```
pub fn merge_refs(slots: impl IntoIterator<Item = Option<RefSlot>>) -> RefSlot {
    let slots: SmallVec<[RefSlot; 2]> = slots.into_iter().flatten().collect();
    RefSlot::callback(move |value| {
        for slot in &slots {
            slot.set(value);
        }
    })
}
