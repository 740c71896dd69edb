// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Machinery shared by the primitive shells.

use alloc::rc::Rc;
use core::cell::RefCell;

use understory_activation::{ActivationController, ActivationKind, InteractionFlags};
use understory_props::{
    Handler, InstanceHandle, PropMerger, PropertyBag, RefHolder, RefSlot, Value, keys, merge_refs,
};
use understory_slot::{Element, Node, RenderMode, Slot, SlotConfig, SlotError};

/// Host view a shell renders in [`RenderMode::Default`].
pub const DEFAULT_HOST: &str = "View";

/// Inputs every shell shares.
pub(crate) struct Common<'a> {
    pub(crate) disabled: bool,
    pub(crate) focusable_when_disabled: bool,
    pub(crate) accessibility_hint: Option<&'a Rc<str>>,
    pub(crate) on_key_down: Option<&'a Handler>,
    pub(crate) on_accessibility_action: Option<&'a Handler>,
}

/// Controller, instance ref, and memoized injected bags for one shell.
#[derive(Debug)]
pub(crate) struct Shell {
    controller: ActivationController,
    instance: RefHolder,
    slot: SlotConfig,
    state_memo: RefCell<PropertyBag>,
    injected_memo: RefCell<PropertyBag>,
}

impl Shell {
    pub(crate) fn new(kind: ActivationKind, value: Option<bool>, default_value: bool) -> Self {
        Self {
            controller: ActivationController::new(kind, value, default_value),
            instance: RefHolder::new(),
            slot: SlotConfig::default(),
            state_memo: RefCell::new(PropertyBag::new()),
            injected_memo: RefCell::new(PropertyBag::new()),
        }
    }

    pub(crate) fn controller(&self) -> &ActivationController {
        &self.controller
    }

    pub(crate) fn instance(&self) -> Option<InstanceHandle> {
        self.instance.get()
    }

    pub(crate) fn set_slot_config(&mut self, config: SlotConfig) {
        self.slot = config;
    }

    /// Push this pass's flags and raw callbacks into the controller.
    pub(crate) fn sync(&self, common: &Common<'_>) {
        let mut flags = InteractionFlags::empty();
        flags.set(InteractionFlags::DISABLED, common.disabled);
        flags.set(
            InteractionFlags::FOCUSABLE_WHEN_DISABLED,
            common.focusable_when_disabled,
        );
        self.controller.set_flags(flags);
        self.controller.set_on_key_down(common.on_key_down.cloned());
        self.controller
            .set_on_accessibility_action(common.on_accessibility_action.cloned());
    }

    /// The injected bag for this pass.
    ///
    /// `state` holds the shell-specific `accessibilityState` fields after
    /// `disabled`; `extra` holds shell-specific critical keys. Both the bag and
    /// its nested state keep their identity while nothing changed.
    pub(crate) fn injected(
        &self,
        role: &'static str,
        common: &Common<'_>,
        state: &[(&'static str, Value)],
        extra: &[(&'static str, Value)],
    ) -> PropertyBag {
        let disabled = self.controller.is_disabled();
        let focusable = self.controller.is_focusable();
        let handlers = self.controller.handlers();

        let mut accessibility_state = PropertyBag::new().with("disabled", disabled);
        for (key, value) in state {
            accessibility_state.insert(*key, value.clone());
        }
        let accessibility_state = reuse(&self.state_memo, accessibility_state);

        let mut bag = PropertyBag::new()
            .with(keys::ACCESSIBLE, true)
            .with(keys::ACCESSIBILITY_ROLE, role)
            .with(keys::ACCESSIBILITY_STATE, accessibility_state)
            .with(keys::FOCUSABLE, focusable)
            .with(keys::TAB_INDEX, if focusable { 0 } else { -1 })
            .with(keys::ARIA_DISABLED, disabled);
        if let Some(hint) = common.accessibility_hint {
            bag.insert(keys::ACCESSIBILITY_HINT, Value::Str(hint.clone()));
        }
        for (key, value) in extra {
            bag.insert(*key, value.clone());
        }
        let bag = bag
            .with(keys::ON_PRESS, handlers.on_press.clone())
            .with(keys::ON_KEY_DOWN, handlers.on_key_down.clone())
            .with(
                keys::ON_ACCESSIBILITY_ACTION,
                handlers.on_accessibility_action.clone(),
            );
        reuse(&self.injected_memo, bag)
    }

    /// Produce the element for this pass.
    pub(crate) fn render(
        &self,
        merger: &PropMerger,
        injected: &PropertyBag,
        host_props: &PropertyBag,
        caller_ref: Option<RefSlot>,
        mode: &RenderMode,
        children: &[Node],
    ) -> Result<Element, SlotError> {
        let props = merger.merge(injected, host_props);
        let own_ref = merge_refs([Some(RefSlot::from(self.instance.clone())), caller_ref]);
        match mode {
            RenderMode::Default => {
                tracing::trace!(host = DEFAULT_HOST, "render default host view");
                Ok(Element::host(DEFAULT_HOST)
                    .with_props(props)
                    .with_ref(own_ref)
                    .with_children(children.iter().cloned()))
            }
            RenderMode::Delegate(target) => {
                tracing::trace!("render delegated element");
                Slot::with_config(merger, self.slot.clone()).render(&props, Some(own_ref), target)
            }
        }
    }
}

/// `fresh`, or the memoized bag if it has the same entries.
fn reuse(memo: &RefCell<PropertyBag>, fresh: PropertyBag) -> PropertyBag {
    let mut last = memo.borrow_mut();
    let same = last.len() == fresh.len()
        && last
            .iter()
            .zip(fresh.iter())
            .all(|((ka, va), (kb, vb))| ka == kb && va == vb);
    if same {
        return last.clone();
    }
    *last = fresh.clone();
    fresh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuse_keeps_identity_for_equal_entries() {
        let memo = RefCell::new(PropertyBag::new());
        let first = reuse(&memo, PropertyBag::new().with("disabled", false));
        let second = reuse(&memo, PropertyBag::new().with("disabled", false));
        assert!(PropertyBag::ptr_eq(&first, &second));

        let third = reuse(&memo, PropertyBag::new().with("disabled", true));
        assert!(!PropertyBag::ptr_eq(&second, &third));
        assert_eq!(third.get("disabled"), Some(&Value::Bool(true)));
    }

    #[test]
    fn injected_is_stable_across_passes() {
        let shell = Shell::new(ActivationKind::Press, None, false);
        let common = Common {
            disabled: false,
            focusable_when_disabled: false,
            accessibility_hint: None,
            on_key_down: None,
            on_accessibility_action: None,
        };
        shell.sync(&common);
        let a = shell.injected("button", &common, &[("busy", Value::Bool(false))], &[]);
        let b = shell.injected("button", &common, &[("busy", Value::Bool(false))], &[]);
        assert!(PropertyBag::ptr_eq(&a, &b));
        assert!(!a.contains_key(keys::ACCESSIBILITY_HINT));
    }
}
