// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Merging a primitive's injected properties into a caller's properties.
//!
//! ## Resolution
//!
//! Only keys present in the injected bag are resolved; caller-only keys pass
//! through untouched. For each injected key, in precedence order:
//!
//! 1. An undefined injected value is skipped.
//! 2. Nested accessibility mappings (`accessibilityState`,
//!    `accessibilityValue`) are shallow-merged; injected fields win per field.
//! 3. [Critical keys](crate::keys::CRITICAL_KEYS) take the injected value.
//! 4. Handler keys with a handler value are composed through the
//!    [`HandlerComposer`].
//! 5. Style keys become an array: injected style first, then the caller's
//!    style(s), so the caller's styles apply last.
//! 6. Anything else: the caller's value if defined, otherwise the injected one.
//!
//! When no injected key changes the outcome, the caller's bag is returned
//! with its identity intact ([`PropertyBag::ptr_eq`]). The same holds for
//! nested accessibility mappings.
//!
//! ```
//! use understory_props::{keys, PropMerger, PropertyBag, Value};
//!
//! let merger = PropMerger::default();
//! let injected = PropertyBag::new()
//!     .with(keys::ACCESSIBILITY_ROLE, "button")
//!     .with("testID", "primitive");
//! let child = PropertyBag::new()
//!     .with(keys::ACCESSIBILITY_ROLE, "link")
//!     .with("testID", "mine")
//!     .with("nativeID", "n1");
//!
//! let merged = merger.merge(&injected, &child);
//! assert_eq!(merged.get(keys::ACCESSIBILITY_ROLE), Some(&Value::from("button")));
//! assert_eq!(merged.get("testID"), Some(&Value::from("mine")));
//! assert_eq!(merged.get("nativeID"), Some(&Value::from("n1")));
//! ```

use alloc::vec::Vec;

use crate::bag::PropertyBag;
use crate::handler::HandlerComposer;
use crate::keys;
use crate::value::Value;

/// Merges injected and caller property bags.
///
/// Owns the [`HandlerComposer`] whose cache keeps composed handler
/// identities stable across merges.
#[derive(Debug, Default)]
pub struct PropMerger {
    composer: HandlerComposer,
}

impl PropMerger {
    /// Merger using `composer` for handler keys.
    pub fn new(composer: HandlerComposer) -> Self {
        Self { composer }
    }

    /// The composer used for handler keys.
    pub fn composer(&self) -> &HandlerComposer {
        &self.composer
    }

    /// Merge `injected` into `child`. See the [module docs](self) for the rules.
    pub fn merge(&self, injected: &PropertyBag, child: &PropertyBag) -> PropertyBag {
        let mut out = child.clone();
        for (key, value) in injected.iter() {
            if !value.is_defined() {
                continue;
            }
            let caller = child.get(key);
            let resolved = self.resolve(key, value, caller);
            if caller.is_some_and(|c| *c == resolved) {
                continue;
            }
            out.insert(key.clone(), resolved);
        }
        out
    }

    fn resolve(&self, key: &str, injected: &Value, caller: Option<&Value>) -> Value {
        match keys::classify(key) {
            keys::KeyClass::NestedAccessibility => return merge_nested(injected, caller),
            keys::KeyClass::Critical => return injected.clone(),
            _ => {}
        }
        if let Value::Handler(primitive) = injected
            && keys::is_handler(key)
        {
            let consumer = caller.and_then(Value::as_handler);
            return self
                .composer
                .compose(Some(primitive), consumer)
                .map_or_else(|| injected.clone(), Value::Handler);
        }
        if keys::is_style(key) {
            return combine_styles(injected, caller);
        }
        match caller {
            Some(value) if value.is_defined() => value.clone(),
            _ => injected.clone(),
        }
    }
}

/// Shallow-merge two nested mappings; injected fields win.
///
/// Returns the caller's mapping unchanged when every injected field already
/// matches it. A caller value that is not a mapping is replaced.
fn merge_nested(injected: &Value, caller: Option<&Value>) -> Value {
    let (Value::Object(fields), Some(Value::Object(base))) = (injected, caller) else {
        return injected.clone();
    };
    let mut out = base.clone();
    for (key, value) in fields.iter() {
        if !value.is_defined() || base.get(key) == Some(value) {
            continue;
        }
        out.insert(key.clone(), value.clone());
    }
    Value::Object(out)
}

/// Injected style first, then the caller's style(s) flattened one level.
fn combine_styles(injected: &Value, caller: Option<&Value>) -> Value {
    match caller {
        None | Some(Value::Undefined | Value::Null) => injected.clone(),
        Some(Value::Array(items)) => {
            let mut styles = Vec::with_capacity(items.len() + 1);
            styles.push(injected.clone());
            styles.extend(items.iter().cloned());
            Value::Array(styles.into())
        }
        Some(other) => Value::array([injected.clone(), other.clone()]),
    }
}

#[cfg(feature = "std")]
std::thread_local! {
    static DEFAULT_MERGER: PropMerger = PropMerger::default();
}

/// Run `f` with this thread's default merger.
///
/// Every free function in the Understory crates goes through this merger, so
/// they all share one handler cache.
#[cfg(feature = "std")]
pub fn with_default_merger<R>(f: impl FnOnce(&PropMerger) -> R) -> R {
    DEFAULT_MERGER.with(f)
}

/// [`PropMerger::merge`] using this thread's default merger.
#[cfg(feature = "std")]
pub fn merge_props(injected: &PropertyBag, child: &PropertyBag) -> PropertyBag {
    with_default_merger(|merger| merger.merge(injected, child))
}

/// [`HandlerComposer::compose`] using this thread's default composer
/// ([`ComposeOrder::PrimitiveFirst`](crate::ComposeOrder::PrimitiveFirst)).
#[cfg(feature = "std")]
pub fn merge_handlers(
    primitive: Option<&crate::Handler>,
    consumer: Option<&crate::Handler>,
) -> Option<crate::Handler> {
    with_default_merger(|merger| merger.composer().compose(primitive, consumer))
}
