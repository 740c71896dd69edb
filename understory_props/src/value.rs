// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property values.

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::bag::PropertyBag;
use crate::event::Handler;

/// One value in a [`PropertyBag`].
///
/// Equality follows the host's strict-equality rules: scalars and strings
/// compare by value, while handlers, nested bags, and arrays compare by
/// identity. This is what lets the merger detect "nothing changed" without
/// walking nested data.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Present key with no value. Never overrides a caller value during a merge.
    #[default]
    Undefined,
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// String.
    Str(Rc<str>),
    /// Event callback.
    Handler(Handler),
    /// Nested mapping, for example `accessibilityState`.
    Object(PropertyBag),
    /// Ordered collection, for example a list of styles.
    Array(Rc<[Value]>),
}

impl Value {
    /// Whether this value counts as supplied. Only [`Value::Undefined`] does not.
    pub fn is_defined(&self) -> bool {
        !matches!(self, Self::Undefined)
    }

    /// Returns the handler if this is a [`Value::Handler`].
    pub fn as_handler(&self) -> Option<&Handler> {
        match self {
            Self::Handler(h) => Some(h),
            _ => None,
        }
    }

    /// Returns the nested bag if this is a [`Value::Object`].
    pub fn as_object(&self) -> Option<&PropertyBag> {
        match self {
            Self::Object(bag) => Some(bag),
            _ => None,
        }
    }

    /// Returns the items if this is a [`Value::Array`].
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the boolean if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is a [`Value::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the string if this is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Build an array value.
    pub fn array(items: impl IntoIterator<Item = Self>) -> Self {
        Self::Array(items.into_iter().collect::<Vec<_>>().into())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Handler(a), Self::Handler(b)) => Handler::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => PropertyBag::ptr_eq(a, b),
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.into())
    }
}

impl From<Rc<str>> for Value {
    fn from(v: Rc<str>) -> Self {
        Self::Str(v)
    }
}

impl From<Handler> for Value {
    fn from(v: Handler) -> Self {
        Self::Handler(v)
    }
}

impl From<PropertyBag> for Value {
    fn from(v: PropertyBag) -> Self {
        Self::Object(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Undefined, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_compare_by_value() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from("button"), Value::from("button"));
        assert_eq!(Value::from(3), Value::Int(3));
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Null, Value::Undefined);
    }

    #[test]
    fn floats_compare_bitwise() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_eq!(Value::Float(0.5), Value::from(0.5));
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
    }

    #[test]
    fn containers_compare_by_identity() {
        let a = PropertyBag::new().with("disabled", true);
        let b = PropertyBag::new().with("disabled", true);
        assert_eq!(Value::Object(a.clone()), Value::Object(a.clone()));
        assert_ne!(Value::Object(a), Value::Object(b));

        let arr = Value::array([Value::Int(1)]);
        assert_eq!(arr, arr.clone());
        assert_ne!(arr, Value::array([Value::Int(1)]));
    }

    #[test]
    fn option_maps_none_to_undefined() {
        assert!(!Value::from(None::<bool>).is_defined());
        assert_eq!(Value::from(Some("hint")), Value::from("hint"));
        assert!(Value::Null.is_defined());
    }
}
