// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless Button and Toggle against a host that prints what it mounts.
//!
//! This example shows how to combine:
//! - `understory_primitives` for the Button and Toggle shells,
//! - `understory_slot` render delegation onto a caller's `Link` element,
//! - `understory_activation::PressTracker` to turn a raw pointer stream into
//!   one activation.
//!
//! Run:
//! - `cargo run -p understory_demos --example button_toggle`
//! - `RUST_LOG=trace cargo run -p understory_demos --example button_toggle`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_activation::{ActivationEvent, PressTracker};
use understory_primitives::{Button, ButtonProps, Toggle, ToggleProps};
use understory_props::{Event, Handler, InstanceHandle, PropMerger, PropertyBag, Value, keys};
use understory_slot::{Element, ElementKind, Node, RenderMode};

/// A stand-in for a real renderer: prints the tree and hands out instance ids.
struct PrintingHost {
    next_id: Cell<u64>,
}

impl PrintingHost {
    fn new() -> Self {
        Self {
            next_id: Cell::new(1),
        }
    }

    fn mount(&self, element: &Element) {
        self.mount_at(element, 0);
    }

    fn mount_at(&self, element: &Element, depth: usize) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let name = match &element.kind {
            ElementKind::Host(name) => format!("<{name}>"),
            ElementKind::Component(name) => format!("<{name} />"),
            ElementKind::Fragment => "<>".to_string(),
        };
        println!("{:indent$}{name} #{id}", "", indent = depth * 2);
        for (key, value) in element.props.iter() {
            println!("{:indent$}  {key} = {}", "", describe(value), indent = depth * 2);
        }
        element.attach(Some(InstanceHandle(id)));
        for child in &element.children {
            match child {
                Node::Element(child) => self.mount_at(child, depth + 1),
                Node::Text(text) => println!("{:indent$}  {text:?}", "", indent = depth * 2),
                Node::Empty => {}
            }
        }
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Handler(_) => "<handler>".to_string(),
        Value::Object(bag) => {
            let fields: Vec<_> = bag
                .iter()
                .map(|(k, v)| format!("{k}: {}", describe(v)))
                .collect();
            format!("{{ {} }}", fields.join(", "))
        }
        Value::Array(items) => {
            let items: Vec<_> = items.iter().map(describe).collect();
            format!("[{}]", items.join(", "))
        }
        other => format!("{other:?}"),
    }
}

fn call(element: &Element, key: &str, mut event: Event) {
    if let Some(handler) = element.props.get(key).and_then(Value::as_handler) {
        handler.call(&mut event);
    }
}

fn log_change(label: &'static str) -> Rc<dyn Fn(ActivationEvent)> {
    Rc::new(move |ev: ActivationEvent| {
        println!("  {label}: next = {}, source = {}", ev.next_value, ev.source);
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let merger = PropMerger::default();
    let host = PrintingHost::new();

    println!("== Toggle, uncontrolled, default host view ==");
    let toggle_props = ToggleProps {
        on_pressed_change: Some(log_change("mute")),
        accessibility_hint: Some("Mutes the microphone".into()),
        host_props: PropertyBag::new()
            .with(keys::STYLE, PropertyBag::new().with("padding", 8))
            .with("testID", "mute-toggle"),
        children: vec![Node::from("Mute")],
        ..ToggleProps::default()
    };
    let toggle = Toggle::new(&toggle_props);
    let element = match toggle.render(&merger, &toggle_props) {
        Ok(element) => element,
        Err(err) => {
            eprintln!("toggle render failed: {err}");
            return;
        }
    };
    host.mount(&element);

    // A raw pointer stream: down, a small wobble, release inside.
    let mut tracker = PressTracker::new();
    tracker.on_down(None, Point::new(10.0, 10.0));
    tracker.on_move(None, Point::new(13.0, 12.0));
    let outcome = tracker.on_up(None, true, Point::new(13.0, 12.0));
    println!("pointer release: {outcome:?}");
    toggle.controller().handle_pointer_release(outcome);

    // A drag that leaves the slop never activates.
    tracker.on_down(None, Point::new(10.0, 10.0));
    tracker.on_move(None, Point::new(80.0, 10.0));
    let outcome = tracker.on_up(None, true, Point::new(12.0, 10.0));
    println!("pointer release after drag: {outcome:?}");
    toggle.controller().handle_pointer_release(outcome);
    println!("pressed: {}", toggle.pressed());

    println!();
    println!("== Button delegated onto a Link ==");
    let presses = Rc::new(Cell::new(0));
    let count = presses.clone();
    let link = Element::component("Link")
        .with_prop("href", "/settings")
        .with_prop(keys::ACCESSIBILITY_ROLE, "link")
        .with_prop(
            keys::ON_PRESS,
            Handler::new(|_| println!("  link: navigating to /settings")),
        )
        .with_child("Settings");
    let button_props = ButtonProps {
        on_press: Some(Handler::new(move |_| count.set(count.get() + 1))),
        on_activate: Some(log_change("settings")),
        on_key_down: Some(Handler::new(|ev| println!("  unhandled key: {:?}", ev.payload()))),
        render: RenderMode::delegate(link),
        ..ButtonProps::default()
    };
    let button = Button::new();
    let element = match button.render(&merger, &button_props) {
        Ok(element) => element,
        Err(err) => {
            eprintln!("button render failed: {err}");
            return;
        }
    };
    host.mount(&element);
    println!("button instance: {:?}", button.instance());

    call(&element, keys::ON_PRESS, Event::press());
    call(&element, keys::ON_KEY_DOWN, Event::key("Enter"));
    call(&element, keys::ON_KEY_DOWN, Event::key("Tab"));
    call(
        &element,
        keys::ON_ACCESSIBILITY_ACTION,
        Event::accessibility_action("magicTap"),
    );
    println!("raw presses: {}", presses.get());

    println!();
    println!("== Disabled but focusable Button ==");
    let disabled = ButtonProps {
        disabled: true,
        focusable_when_disabled: true,
        loading: true,
        on_activate: Some(log_change("never")),
        children: vec![Node::from("Saving...")],
        ..ButtonProps::default()
    };
    let button = Button::new();
    match button.render(&merger, &disabled) {
        Ok(element) => {
            host.mount(&element);
            call(&element, keys::ON_PRESS, Event::press());
        }
        Err(err) => eprintln!("button render failed: {err}"),
    }
}
