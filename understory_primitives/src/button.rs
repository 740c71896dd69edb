// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A press-activatable button.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use understory_activation::{ActivationController, ActivationKind, ChangeHandler};
use understory_props::{Handler, InstanceHandle, PropMerger, PropertyBag, RefSlot, Value};
use understory_slot::{Element, Node, RenderMode, SlotConfig, SlotError};

use crate::shell::{Common, Shell};

/// Accessibility role a [`Button`] announces.
pub const BUTTON_ROLE: &str = "button";

/// Caller props for one [`Button`] render pass.
#[derive(Clone, Default)]
pub struct ButtonProps {
    /// Ignore activation.
    pub disabled: bool,
    /// Keep the button in focus and tab order while disabled.
    pub focusable_when_disabled: bool,
    /// Announce the button as busy. Activation is unaffected.
    pub loading: bool,
    /// Extra description read by assistive technology.
    pub accessibility_hint: Option<Rc<str>>,
    /// Called on pointer activation.
    pub on_press: Option<Handler>,
    /// Called on every activation, with its source.
    pub on_activate: Option<ChangeHandler>,
    /// Called for keys that do not activate.
    pub on_key_down: Option<Handler>,
    /// Called for accessibility actions that do not activate.
    pub on_accessibility_action: Option<Handler>,
    /// Any other host-view properties, passed through the merge rules.
    pub host_props: PropertyBag,
    /// Caller ref, notified alongside the button's own.
    pub ref_slot: Option<RefSlot>,
    /// Render the default host view or delegate to one caller element.
    pub render: RenderMode,
    /// Content of the default host view.
    pub children: Vec<Node>,
}

impl fmt::Debug for ButtonProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonProps")
            .field("disabled", &self.disabled)
            .field("focusable_when_disabled", &self.focusable_when_disabled)
            .field("loading", &self.loading)
            .field("accessibility_hint", &self.accessibility_hint)
            .field("on_press", &self.on_press)
            .field("on_activate", &self.on_activate.is_some())
            .field("on_key_down", &self.on_key_down)
            .field("on_accessibility_action", &self.on_accessibility_action)
            .field("host_props", &self.host_props)
            .field("ref_slot", &self.ref_slot)
            .field("render", &self.render)
            .field("children", &self.children)
            .finish()
    }
}

impl ButtonProps {
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

/// A headless button: one per mounted instance.
///
/// ```
/// use understory_primitives::{Button, ButtonProps};
/// use understory_props::{keys, Event, PropMerger, Value};
///
/// let merger = PropMerger::default();
/// let button = Button::new();
/// let element = button.render(&merger, &ButtonProps::default()).unwrap();
///
/// assert_eq!(element.props.get(keys::ACCESSIBILITY_ROLE), Some(&Value::from("button")));
/// let press = element.props.get(keys::ON_PRESS).and_then(Value::as_handler).unwrap();
/// press.call(&mut Event::press());
/// ```
#[derive(Debug)]
pub struct Button {
    shell: Shell,
}

impl Button {
    /// A button with the default slot configuration.
    pub fn new() -> Self {
        Self {
            shell: Shell::new(ActivationKind::Press, None, false),
        }
    }

    /// A button whose render delegation uses `config`.
    pub fn with_slot_config(config: SlotConfig) -> Self {
        let mut button = Self::new();
        button.shell.set_slot_config(config);
        button
    }

    /// The activation controller behind this button.
    pub fn controller(&self) -> &ActivationController {
        self.shell.controller()
    }

    /// The mounted instance, if any.
    pub fn instance(&self) -> Option<InstanceHandle> {
        self.shell.instance()
    }

    /// The props this button injects for `props`.
    pub fn injected_props(&self, props: &ButtonProps) -> PropertyBag {
        let common = props.common();
        self.shell.sync(&common);
        let controller = self.shell.controller();
        controller.set_on_press(props.on_press.clone());
        controller.set_on_change(props.on_activate.clone());
        self.shell.injected(
            BUTTON_ROLE,
            &common,
            &[("busy", Value::Bool(props.loading))],
            &[],
        )
    }

    /// Produce the element for one render pass.
    ///
    /// Fails only when delegating to something other than one element.
    pub fn render(&self, merger: &PropMerger, props: &ButtonProps) -> Result<Element, SlotError> {
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

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}
