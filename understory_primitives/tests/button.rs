// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Button rendering against a caller's props, refs, and delegate elements.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use understory_activation::{ActivationEvent, ActivationSource, ChangeHandler};
use understory_primitives::{Button, ButtonProps, DEFAULT_HOST};
use understory_props::{
    Event, Handler, InstanceHandle, PropMerger, PropertyBag, RefHolder, RefSlot, Value, keys,
};
use understory_slot::{ChildShape, Element, ElementKind, Node, RenderMode, SlotConfig, SlotError};

fn handler(props: &PropertyBag, key: &str) -> Handler {
    props
        .get(key)
        .and_then(Value::as_handler)
        .cloned()
        .expect("handler is injected")
}

fn log() -> Rc<RefCell<Vec<&'static str>>> {
    Rc::new(RefCell::new(Vec::new()))
}

/// A change handler that records whether it ever ran.
fn tripwire() -> (ChangeHandler, Rc<Cell<bool>>) {
    let fired = Rc::new(Cell::new(false));
    let flag = fired.clone();
    (Rc::new(move |_: ActivationEvent| flag.set(true)), fired)
}

#[test]
fn default_render_is_an_accessible_host_view() {
    let merger = PropMerger::default();
    let button = Button::new();
    let props = ButtonProps {
        children: vec![Node::from("Save")],
        ..ButtonProps::default()
    };
    let element = button.render(&merger, &props).unwrap();

    assert_eq!(element.kind, ElementKind::Host(DEFAULT_HOST.into()));
    assert_eq!(element.props.get(keys::ACCESSIBLE), Some(&Value::Bool(true)));
    assert_eq!(element.props.get(keys::ACCESSIBILITY_ROLE), Some(&Value::from("button")));
    assert_eq!(element.props.get(keys::FOCUSABLE), Some(&Value::Bool(true)));
    assert_eq!(element.props.get(keys::TAB_INDEX), Some(&Value::Int(0)));
    assert_eq!(element.props.get(keys::ARIA_DISABLED), Some(&Value::Bool(false)));
    assert_eq!(element.children.len(), 1);
}

#[test]
fn caller_cannot_override_accessibility_keys() {
    let merger = PropMerger::default();
    let button = Button::new();
    let props = ButtonProps {
        host_props: PropertyBag::new()
            .with(keys::ACCESSIBILITY_ROLE, "image")
            .with(keys::FOCUSABLE, false)
            .with(keys::ACCESSIBLE, false)
            .with("testID", "save-button"),
        ..ButtonProps::default()
    };
    let element = button.render(&merger, &props).unwrap();

    assert_eq!(element.props.get(keys::ACCESSIBILITY_ROLE), Some(&Value::from("button")));
    assert_eq!(element.props.get(keys::FOCUSABLE), Some(&Value::Bool(true)));
    assert_eq!(element.props.get(keys::ACCESSIBLE), Some(&Value::Bool(true)));
    assert_eq!(element.props.get("testID"), Some(&Value::from("save-button")));
}

#[test]
fn caller_accessibility_state_is_merged_per_field() {
    let merger = PropMerger::default();
    let button = Button::new();
    let props = ButtonProps {
        disabled: true,
        host_props: PropertyBag::new().with(
            keys::ACCESSIBILITY_STATE,
            PropertyBag::new()
                .with("disabled", false)
                .with("expanded", true),
        ),
        ..ButtonProps::default()
    };
    let element = button.render(&merger, &props).unwrap();
    let state = element
        .props
        .get(keys::ACCESSIBILITY_STATE)
        .and_then(Value::as_object)
        .unwrap();
    assert_eq!(state.get("disabled"), Some(&Value::Bool(true)));
    assert_eq!(state.get("expanded"), Some(&Value::Bool(true)));
    assert_eq!(state.get("busy"), Some(&Value::Bool(false)));
}

#[test]
fn pointer_press_runs_primitive_then_caller() {
    let merger = PropMerger::default();
    let button = Button::new();
    let calls = log();
    let (raw, extra, change) = (calls.clone(), calls.clone(), calls.clone());
    let props = ButtonProps {
        on_press: Some(Handler::new(move |_| raw.borrow_mut().push("on_press"))),
        on_activate: Some(Rc::new(move |ev: ActivationEvent| {
            assert_eq!(ev.source, ActivationSource::Pointer);
            change.borrow_mut().push("on_activate");
        })),
        host_props: PropertyBag::new().with(
            keys::ON_PRESS,
            Handler::new(move |_| extra.borrow_mut().push("host onPress")),
        ),
        ..ButtonProps::default()
    };
    let element = button.render(&merger, &props).unwrap();
    handler(&element.props, keys::ON_PRESS).call(&mut Event::press());

    assert_eq!(*calls.borrow(), ["on_activate", "on_press", "host onPress"]);
}

#[test]
fn keyboard_and_assistive_activation_skip_raw_press() {
    let merger = PropMerger::default();
    let button = Button::new();
    let calls = log();
    let sources = Rc::new(RefCell::new(Vec::new()));
    let (raw, seen) = (calls.clone(), sources.clone());
    let props = ButtonProps {
        on_press: Some(Handler::new(move |_| raw.borrow_mut().push("on_press"))),
        on_activate: Some(Rc::new(move |ev: ActivationEvent| {
            seen.borrow_mut().push(ev.source);
        })),
        ..ButtonProps::default()
    };
    let element = button.render(&merger, &props).unwrap();
    handler(&element.props, keys::ON_KEY_DOWN).call(&mut Event::key("Enter"));
    handler(&element.props, keys::ON_ACCESSIBILITY_ACTION)
        .call(&mut Event::accessibility_action("activate"));

    assert!(calls.borrow().is_empty());
    assert_eq!(
        *sources.borrow(),
        [ActivationSource::Keyboard, ActivationSource::AssistiveAction]
    );
}

#[test]
fn other_keys_reach_the_raw_key_handler() {
    let merger = PropMerger::default();
    let button = Button::new();
    let keys_seen = log();
    let sink = keys_seen.clone();
    let (on_activate, fired) = tripwire();
    let props = ButtonProps {
        on_key_down: Some(Handler::new(move |_| sink.borrow_mut().push("key"))),
        on_activate: Some(on_activate),
        ..ButtonProps::default()
    };
    let element = button.render(&merger, &props).unwrap();
    handler(&element.props, keys::ON_KEY_DOWN).call(&mut Event::key("Tab"));
    assert_eq!(*keys_seen.borrow(), ["key"]);
    assert!(!fired.get(), "Tab must not activate");
}

#[test]
fn disabled_button_is_inert_and_unfocusable() {
    let merger = PropMerger::default();
    let button = Button::new();
    let (on_activate, fired) = tripwire();
    let props = ButtonProps {
        disabled: true,
        on_activate: Some(on_activate),
        ..ButtonProps::default()
    };
    let element = button.render(&merger, &props).unwrap();
    handler(&element.props, keys::ON_PRESS).call(&mut Event::press());
    handler(&element.props, keys::ON_KEY_DOWN).call(&mut Event::key(" "));
    assert!(!fired.get(), "disabled button activated");

    assert_eq!(element.props.get(keys::FOCUSABLE), Some(&Value::Bool(false)));
    assert_eq!(element.props.get(keys::TAB_INDEX), Some(&Value::Int(-1)));
    assert_eq!(element.props.get(keys::ARIA_DISABLED), Some(&Value::Bool(true)));
}

#[test]
fn disabled_but_focusable_is_announced_and_inert() {
    let merger = PropMerger::default();
    let button = Button::new();
    let (on_activate, fired) = tripwire();
    let props = ButtonProps {
        disabled: true,
        focusable_when_disabled: true,
        on_activate: Some(on_activate),
        ..ButtonProps::default()
    };
    let element = button.render(&merger, &props).unwrap();
    handler(&element.props, keys::ON_PRESS).call(&mut Event::press());
    assert!(!fired.get(), "disabled button activated");

    assert_eq!(element.props.get(keys::FOCUSABLE), Some(&Value::Bool(true)));
    assert_eq!(element.props.get(keys::TAB_INDEX), Some(&Value::Int(0)));
    let state = element
        .props
        .get(keys::ACCESSIBILITY_STATE)
        .and_then(Value::as_object)
        .unwrap();
    assert_eq!(state.get("disabled"), Some(&Value::Bool(true)));
}

#[test]
fn caller_style_passes_through() {
    let merger = PropMerger::default();
    let button = Button::new();
    let caller_style = PropertyBag::new().with("padding", 8);
    let props = ButtonProps {
        host_props: PropertyBag::new().with(keys::STYLE, caller_style.clone()),
        ..ButtonProps::default()
    };
    let element = button.render(&merger, &props).unwrap();
    // Buttons inject no style, so the caller's passes through untouched.
    let style = element.props.get(keys::STYLE).and_then(Value::as_object).unwrap();
    assert!(PropertyBag::ptr_eq(style, &caller_style));
}

#[test]
fn refs_fan_out_on_default_render() {
    let merger = PropMerger::default();
    let button = Button::new();
    let caller = RefHolder::new();
    let props = ButtonProps {
        ref_slot: Some(RefSlot::from(caller.clone())),
        ..ButtonProps::default()
    };
    let element = button.render(&merger, &props).unwrap();

    element.attach(Some(InstanceHandle(3)));
    assert_eq!(button.instance(), Some(InstanceHandle(3)));
    assert_eq!(caller.get(), Some(InstanceHandle(3)));

    element.attach(None);
    assert_eq!(button.instance(), None);
    assert_eq!(caller.get(), None);
}

#[test]
fn delegation_merges_into_caller_element() {
    let merger = PropMerger::default();
    let button = Button::new();
    let pressed_link = log();
    let sink = pressed_link.clone();
    let shell_ref = RefHolder::new();
    let link_ref = RefHolder::new();
    let link = Element::component("Link")
        .with_prop("href", "/settings")
        .with_prop(keys::ACCESSIBILITY_ROLE, "link")
        .with_prop(keys::ON_PRESS, Handler::new(move |_| sink.borrow_mut().push("link")))
        .with_ref(RefSlot::from(link_ref.clone()))
        .with_child("Settings");
    let props = ButtonProps {
        ref_slot: Some(RefSlot::from(shell_ref.clone())),
        render: RenderMode::delegate(link),
        ..ButtonProps::default()
    };

    let element = button.render(&merger, &props).unwrap();
    assert_eq!(element.kind, ElementKind::Component("Link".into()));
    assert_eq!(element.props.get(keys::ACCESSIBILITY_ROLE), Some(&Value::from("button")));
    assert_eq!(element.props.get("href"), Some(&Value::from("/settings")));
    assert_eq!(element.children.len(), 1);

    handler(&element.props, keys::ON_PRESS).call(&mut Event::press());
    assert_eq!(*pressed_link.borrow(), ["link"]);

    element.attach(Some(InstanceHandle(9)));
    assert_eq!(button.instance(), Some(InstanceHandle(9)));
    assert_eq!(shell_ref.get(), Some(InstanceHandle(9)));
    assert_eq!(link_ref.get(), Some(InstanceHandle(9)));
}

#[test]
fn delegation_rejects_wrong_child_counts() {
    let merger = PropMerger::default();
    let button = Button::new();

    let none = ButtonProps {
        render: RenderMode::Delegate(Vec::new()),
        ..ButtonProps::default()
    };
    assert_eq!(
        button.render(&merger, &none).unwrap_err(),
        SlotError::InvalidChild(ChildShape::None)
    );

    let two = ButtonProps {
        render: RenderMode::Delegate(vec![
            Node::from(Element::host("Text")),
            Node::from(Element::host("Image")),
        ]),
        ..ButtonProps::default()
    };
    assert_eq!(
        button.render(&merger, &two).unwrap_err(),
        SlotError::InvalidChild(ChildShape::Many(2))
    );
}

#[test]
fn strict_slot_rejects_fragments() {
    let merger = PropMerger::default();
    let button = Button::with_slot_config(SlotConfig {
        strict: true,
        ..SlotConfig::default()
    });
    let props = ButtonProps {
        render: RenderMode::delegate(Element::fragment()),
        ..ButtonProps::default()
    };
    assert_eq!(
        button.render(&merger, &props).unwrap_err(),
        SlotError::UnsupportedChild
    );
}

#[test]
fn repeated_passes_keep_handler_identity() {
    let merger = PropMerger::default();
    let button = Button::new();
    let caller_press = Handler::new(|_| {});
    let props = ButtonProps {
        host_props: PropertyBag::new().with(keys::ON_PRESS, caller_press),
        ..ButtonProps::default()
    };
    let first = button.render(&merger, &props).unwrap();
    let second = button.render(&merger, &props).unwrap();

    let a = handler(&first.props, keys::ON_PRESS);
    let b = handler(&second.props, keys::ON_PRESS);
    assert!(Handler::ptr_eq(&a, &b));
    let sa = first.props.get(keys::ACCESSIBILITY_STATE).and_then(Value::as_object).unwrap();
    let sb = second.props.get(keys::ACCESSIBILITY_STATE).and_then(Value::as_object).unwrap();
    assert!(PropertyBag::ptr_eq(sa, sb));
}
