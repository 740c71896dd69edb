// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Well-known property keys and how the merger classifies them.
//!
//! The key names are the host view's property names. Primitives inject these
//! to keep their accessibility contract; [`CRITICAL_KEYS`] lists the ones a
//! caller can never override.

/// Accessibility role announced by assistive technology.
pub const ACCESSIBILITY_ROLE: &str = "accessibilityRole";
/// Extra usage hint announced after the label.
pub const ACCESSIBILITY_HINT: &str = "accessibilityHint";
/// Whether the view is an accessibility element at all.
pub const ACCESSIBLE: &str = "accessible";
/// Hides the view's subtree from assistive technology.
pub const ACCESSIBILITY_ELEMENTS_HIDDEN: &str = "accessibilityElementsHidden";
/// Live-region politeness for announcements.
pub const ACCESSIBILITY_LIVE_REGION: &str = "accessibilityLiveRegion";
/// Importance of the view for accessibility.
pub const IMPORTANT_FOR_ACCESSIBILITY: &str = "importantForAccessibility";
/// Whether the view can receive focus.
pub const FOCUSABLE: &str = "focusable";
/// Role alias accepted by the host alongside [`ACCESSIBILITY_ROLE`].
pub const ROLE: &str = "role";
/// Position in tab order; `0` is reachable, `-1` is skipped.
pub const TAB_INDEX: &str = "tabIndex";

/// `aria-disabled` equivalent.
pub const ARIA_DISABLED: &str = "aria-disabled";
/// `aria-expanded` equivalent.
pub const ARIA_EXPANDED: &str = "aria-expanded";
/// `aria-selected` equivalent.
pub const ARIA_SELECTED: &str = "aria-selected";
/// `aria-checked` equivalent.
pub const ARIA_CHECKED: &str = "aria-checked";
/// `aria-hidden` equivalent.
pub const ARIA_HIDDEN: &str = "aria-hidden";
/// `aria-controls` equivalent.
pub const ARIA_CONTROLS: &str = "aria-controls";
/// `aria-labelledby` equivalent.
pub const ARIA_LABELLEDBY: &str = "aria-labelledby";
/// `aria-describedby` equivalent.
pub const ARIA_DESCRIBEDBY: &str = "aria-describedby";

/// Nested accessibility state (`{disabled, checked, expanded, busy, selected}`).
pub const ACCESSIBILITY_STATE: &str = "accessibilityState";
/// Nested accessibility value (`{min, max, now, text}`).
pub const ACCESSIBILITY_VALUE: &str = "accessibilityValue";

/// Visual style.
pub const STYLE: &str = "style";

/// Pointer press recognized by the host.
pub const ON_PRESS: &str = "onPress";
/// Pointer went down inside the control.
pub const ON_PRESS_IN: &str = "onPressIn";
/// Pointer left or was released.
pub const ON_PRESS_OUT: &str = "onPressOut";
/// Long press recognized by the host.
pub const ON_LONG_PRESS: &str = "onLongPress";
/// Hardware key down.
pub const ON_KEY_DOWN: &str = "onKeyDown";
/// Hardware key up.
pub const ON_KEY_UP: &str = "onKeyUp";
/// Assistive technology action.
pub const ON_ACCESSIBILITY_ACTION: &str = "onAccessibilityAction";
/// Focus gained.
pub const ON_FOCUS: &str = "onFocus";
/// Focus lost.
pub const ON_BLUR: &str = "onBlur";

/// Keys whose injected value always replaces the caller's value.
pub const CRITICAL_KEYS: &[&str] = &[
    ACCESSIBILITY_ROLE,
    ACCESSIBILITY_HINT,
    ACCESSIBLE,
    ACCESSIBILITY_ELEMENTS_HIDDEN,
    ACCESSIBILITY_LIVE_REGION,
    IMPORTANT_FOR_ACCESSIBILITY,
    FOCUSABLE,
    ROLE,
    TAB_INDEX,
    ARIA_DISABLED,
    ARIA_EXPANDED,
    ARIA_SELECTED,
    ARIA_CHECKED,
    ARIA_HIDDEN,
    ARIA_CONTROLS,
    ARIA_LABELLEDBY,
    ARIA_DESCRIBEDBY,
];

/// Handler keys primitives rely on. These are composed even if a host uses a
/// name outside the `onXxx` convention.
pub const CRITICAL_HANDLER_KEYS: &[&str] = &[
    ON_PRESS,
    ON_PRESS_IN,
    ON_PRESS_OUT,
    ON_LONG_PRESS,
    ON_KEY_DOWN,
    ON_KEY_UP,
    ON_ACCESSIBILITY_ACTION,
    ON_FOCUS,
    ON_BLUR,
];

/// How the merger treats a key, in precedence order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyClass {
    /// Nested accessibility mapping; shallow-merged per field.
    NestedAccessibility,
    /// Injected value wins outright.
    Critical,
    /// Event callback; composed with the caller's callback.
    Handler,
    /// Visual style; injected and caller styles are both kept.
    Style,
    /// Caller wins when it supplies a value.
    Ordinary,
}

/// Whether `key` is in [`CRITICAL_KEYS`].
pub fn is_critical(key: &str) -> bool {
    CRITICAL_KEYS.contains(&key)
}

/// Whether `key` holds a nested accessibility mapping.
pub fn is_nested_accessibility(key: &str) -> bool {
    key == ACCESSIBILITY_STATE || key == ACCESSIBILITY_VALUE
}

/// Whether `key` names an event callback: `on` followed by an uppercase
/// letter, or a member of [`CRITICAL_HANDLER_KEYS`].
pub fn is_handler(key: &str) -> bool {
    let conventional = key
        .strip_prefix("on")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase());
    conventional || CRITICAL_HANDLER_KEYS.contains(&key)
}

/// Whether `key` is a style property (`style` or any `xxxStyle`).
pub fn is_style(key: &str) -> bool {
    key == STYLE || key.ends_with("Style")
}

/// Classify `key` by name alone.
///
/// [`KeyClass::Handler`] is only honored by the merger when the injected
/// value is actually a handler.
pub fn classify(key: &str) -> KeyClass {
    if is_nested_accessibility(key) {
        KeyClass::NestedAccessibility
    } else if is_critical(key) {
        KeyClass::Critical
    } else if is_handler(key) {
        KeyClass::Handler
    } else if is_style(key) {
        KeyClass::Style
    } else {
        KeyClass::Ordinary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_precedence() {
        assert_eq!(classify(ACCESSIBILITY_STATE), KeyClass::NestedAccessibility);
        assert_eq!(classify(ACCESSIBILITY_VALUE), KeyClass::NestedAccessibility);
        assert_eq!(classify(ACCESSIBILITY_ROLE), KeyClass::Critical);
        assert_eq!(classify(ARIA_DESCRIBEDBY), KeyClass::Critical);
        assert_eq!(classify(ON_PRESS), KeyClass::Handler);
        assert_eq!(classify("onHoverIn"), KeyClass::Handler);
        assert_eq!(classify(STYLE), KeyClass::Style);
        assert_eq!(classify("contentContainerStyle"), KeyClass::Style);
        assert_eq!(classify("testID"), KeyClass::Ordinary);
    }

    #[test]
    fn handler_convention_needs_uppercase() {
        assert!(is_handler("onLayout"));
        assert!(!is_handler("once"));
        assert!(!is_handler("on"));
        assert!(!is_handler("online"));
    }

    #[test]
    fn critical_set_is_exact() {
        assert_eq!(CRITICAL_KEYS.len(), 17);
        for key in ["accessibilityLabel", "nativeID", "style", "onPress"] {
            assert!(!is_critical(key), "{key} must not be critical");
        }
    }
}
