// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Toggle state across render passes.

use std::cell::RefCell;
use std::rc::Rc;

use understory_activation::{ActivationEvent, ActivationSource};
use understory_primitives::{TOGGLE_ROLE, Toggle, ToggleProps};
use understory_props::{Event, Handler, PropMerger, PropertyBag, Value, keys};
use understory_slot::{Element, ElementKind, RenderMode};

fn handler(props: &PropertyBag, key: &str) -> Handler {
    props
        .get(key)
        .and_then(Value::as_handler)
        .cloned()
        .expect("handler is injected")
}

fn checked(props: &PropertyBag) -> Option<bool> {
    props
        .get(keys::ACCESSIBILITY_STATE)
        .and_then(Value::as_object)
        .and_then(|state| state.get("checked"))
        .and_then(Value::as_bool)
}

fn recorder() -> (Rc<RefCell<Vec<ActivationEvent>>>, ToggleProps) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    let props = ToggleProps {
        on_pressed_change: Some(Rc::new(move |ev: ActivationEvent| sink.borrow_mut().push(ev))),
        ..ToggleProps::default()
    };
    (events, props)
}

#[test]
fn uncontrolled_toggle_flips_and_reports_source() {
    let merger = PropMerger::default();
    let (events, props) = recorder();
    let toggle = Toggle::new(&props);

    let element = toggle.render(&merger, &props).unwrap();
    assert_eq!(checked(&element.props), Some(false));
    handler(&element.props, keys::ON_PRESS).call(&mut Event::press());
    assert!(toggle.pressed());

    let element = toggle.render(&merger, &props).unwrap();
    assert_eq!(checked(&element.props), Some(true));
    assert_eq!(element.props.get(keys::ARIA_CHECKED), Some(&Value::Bool(true)));
    handler(&element.props, keys::ON_KEY_DOWN).call(&mut Event::key("Enter"));
    assert!(!toggle.pressed());

    assert_eq!(
        *events.borrow(),
        [
            ActivationEvent {
                next_value: true,
                source: ActivationSource::Pointer
            },
            ActivationEvent {
                next_value: false,
                source: ActivationSource::Keyboard
            },
        ]
    );
}

#[test]
fn controlled_toggle_waits_for_the_caller() {
    let merger = PropMerger::default();
    let (events, mut props) = recorder();
    props.pressed = Some(false);
    let toggle = Toggle::new(&props);

    let element = toggle.render(&merger, &props).unwrap();
    handler(&element.props, keys::ON_PRESS).call(&mut Event::press());
    assert_eq!(
        events.borrow().last().copied(),
        Some(ActivationEvent {
            next_value: true,
            source: ActivationSource::Pointer
        })
    );
    assert!(!toggle.pressed());
    let element = toggle.render(&merger, &props).unwrap();
    assert_eq!(checked(&element.props), Some(false));

    props.pressed = Some(true);
    let element = toggle.render(&merger, &props).unwrap();
    assert!(toggle.pressed());
    assert_eq!(checked(&element.props), Some(true));
}

#[test]
fn switching_modes_later_is_ignored() {
    let merger = PropMerger::default();
    let toggle = Toggle::new(&ToggleProps::default());
    let props = ToggleProps {
        pressed: Some(true),
        ..ToggleProps::default()
    };
    toggle.render(&merger, &props).unwrap();
    assert!(!toggle.controller().is_controlled());
    assert!(!toggle.pressed());
}

#[test]
fn disabled_toggle_keeps_reporting_its_state() {
    let merger = PropMerger::default();
    let (events, mut props) = recorder();
    props.default_pressed = true;
    props.disabled = true;
    props.focusable_when_disabled = true;
    let toggle = Toggle::new(&props);

    let element = toggle.render(&merger, &props).unwrap();
    handler(&element.props, keys::ON_ACCESSIBILITY_ACTION)
        .call(&mut Event::accessibility_action("activate"));
    assert!(events.borrow().is_empty());
    assert_eq!(checked(&element.props), Some(true));
    assert_eq!(element.props.get(keys::FOCUSABLE), Some(&Value::Bool(true)));
}

#[test]
fn caller_prevent_default_cannot_cancel_toggle() {
    let merger = PropMerger::default();
    let (events, mut props) = recorder();
    let calls = Rc::new(RefCell::new(0));
    let count = calls.clone();
    props.host_props = PropertyBag::new().with(
        keys::ON_PRESS,
        Handler::new(move |ev| {
            ev.prevent_default();
            *count.borrow_mut() += 1;
        }),
    );
    let toggle = Toggle::new(&props);
    let element = toggle.render(&merger, &props).unwrap();
    handler(&element.props, keys::ON_PRESS).call(&mut Event::press());

    // The toggle ran first, so preventing default in the caller changes nothing.
    assert_eq!(events.borrow().len(), 1);
    assert_eq!(*calls.borrow(), 1);
    assert!(toggle.pressed());
}

#[test]
fn delegated_toggle_keeps_role_over_caller_role() {
    let merger = PropMerger::default();
    let props = ToggleProps {
        render: RenderMode::delegate(
            Element::host("Pressable")
                .with_prop(keys::ACCESSIBILITY_ROLE, "switch")
                .with_prop(keys::STYLE, PropertyBag::new().with("opacity", 0.5)),
        ),
        ..ToggleProps::default()
    };
    let toggle = Toggle::new(&props);
    let element = toggle.render(&merger, &props).unwrap();

    assert_eq!(element.kind, ElementKind::Host("Pressable".into()));
    assert_eq!(
        element.props.get(keys::ACCESSIBILITY_ROLE),
        Some(&Value::from(TOGGLE_ROLE))
    );
    assert!(element.props.get(keys::STYLE).and_then(Value::as_object).is_some());
}
