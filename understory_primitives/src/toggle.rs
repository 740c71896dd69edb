// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A two-state toggle.
//!
//! The pressed state is controlled when [`ToggleProps::pressed`] is `Some`
//! on the first render pass and uncontrolled otherwise, for the toggle's
//! whole life.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use understory_activation::{ActivationController, ActivationKind, ChangeHandler};
use understory_props::{Handler, InstanceHandle, PropMerger, PropertyBag, RefSlot, Value, keys};
use understory_slot::{Element, Node, RenderMode, SlotConfig, SlotError};

use crate::shell::{Common, Shell};

/// Accessibility role a [`Toggle`] announces.
pub const TOGGLE_ROLE: &str = "togglebutton";

/// Caller props for one [`Toggle`] render pass.
#[derive(Clone, Default)]
pub struct ToggleProps {
    /// Caller-owned pressed state. `Some` makes the toggle controlled.
    pub pressed: Option<bool>,
    /// Initial pressed state of an uncontrolled toggle.
    pub default_pressed: bool,
    /// Called with the requested next state and its source.
    pub on_pressed_change: Option<ChangeHandler>,
    /// Ignore activation.
    pub disabled: bool,
    /// Keep the toggle in focus and tab order while disabled.
    pub focusable_when_disabled: bool,
    /// Extra description read by assistive technology.
    pub accessibility_hint: Option<Rc<str>>,
    /// Called for keys that do not activate.
    pub on_key_down: Option<Handler>,
    /// Called for accessibility actions that do not activate.
    pub on_accessibility_action: Option<Handler>,
    /// Any other host-view properties, passed through the merge rules.
    pub host_props: PropertyBag,
    /// Caller ref, notified alongside the toggle's own.
    pub ref_slot: Option<RefSlot>,
    /// Render the default host view or delegate to one caller element.
    pub render: RenderMode,
    /// Content of the default host view.
    pub children: Vec<Node>,
}

impl fmt::Debug for ToggleProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleProps")
            .field("pressed", &self.pressed)
            .field("default_pressed", &self.default_pressed)
            .field("on_pressed_change", &self.on_pressed_change.is_some())
            .field("disabled", &self.disabled)
            .field("focusable_when_disabled", &self.focusable_when_disabled)
            .field("accessibility_hint", &self.accessibility_hint)
            .field("on_key_down", &self.on_key_down)
            .field("on_accessibility_action", &self.on_accessibility_action)
            .field("host_props", &self.host_props)
            .field("ref_slot", &self.ref_slot)
            .field("render", &self.render)
            .field("children", &self.children)
            .finish()
    }
}

impl ToggleProps {
    fn common(&self) -> Common<'_> {
        Common {
            disabled: self.disabled,
            focusable_when_disabled: self.focusable_when_disabled,
            accessibility_hint: self.accessibility_hint.as_ref(),
            on_key_down: self.on_key_down.as_ref(),
            on_accessibility_action: self.on_accessibility_action.as_ref(),
        }
    }
}

/// A headless two-state toggle: one per mounted instance.
#[derive(Debug)]
pub struct Toggle {
    shell: Shell,
}

impl Toggle {
    /// A toggle whose mode and initial state come from the first pass's props.
    pub fn new(props: &ToggleProps) -> Self {
        Self {
            shell: Shell::new(ActivationKind::Toggle, props.pressed, props.default_pressed),
        }
    }

    /// Like [`Toggle::new`], with a render delegation configuration.
    pub fn with_slot_config(props: &ToggleProps, config: SlotConfig) -> Self {
        let mut toggle = Self::new(props);
        toggle.shell.set_slot_config(config);
        toggle
    }

    /// Current pressed state.
    pub fn pressed(&self) -> bool {
        self.shell.controller().value()
    }

    /// The activation controller behind this toggle.
    pub fn controller(&self) -> &ActivationController {
        self.shell.controller()
    }

    /// The mounted instance, if any.
    pub fn instance(&self) -> Option<InstanceHandle> {
        self.shell.instance()
    }

    /// The props this toggle injects for `props`.
    pub fn injected_props(&self, props: &ToggleProps) -> PropertyBag {
        let common = props.common();
        let controller = self.shell.controller();
        controller.sync_value(props.pressed);
        self.shell.sync(&common);
        controller.set_on_change(props.on_pressed_change.clone());

        let pressed = controller.value();
        self.shell.injected(
            TOGGLE_ROLE,
            &common,
            &[("checked", Value::Bool(pressed))],
            &[(keys::ARIA_CHECKED, Value::Bool(pressed))],
        )
    }

    /// Produce the element for one render pass.
    ///
    /// Fails only when delegating to something other than one element.
    pub fn render(&self, merger: &PropMerger, props: &ToggleProps) -> Result<Element, SlotError> {
        let injected = self.injected_props(props);
        self.shell.render(
            merger,
            &injected,
            &props.host_props,
            props.ref_slot.clone(),
            &props.render,
            &props.children,
        )
    }
}
