// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// What render delegation received instead of exactly one element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChildShape {
    /// No children (empty positions are not counted).
    None,
    /// More than one child.
    Many(usize),
    /// One child that is not an element, for example raw text.
    NotAnElement,
}

impl fmt::Display for ChildShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("no children"),
            Self::Many(n) => write!(f, "{n} children"),
            Self::NotAnElement => f.write_str("a non-element child"),
        }
    }
}

/// Errors raised while delegating rendering to a caller element.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    /// The caller did not supply exactly one element.
    #[error("render delegation expects exactly one element child, got {0}")]
    InvalidChild(ChildShape),
    /// The single child is a fragment, which has no instance to receive the
    /// merged props or the ref. Only returned by a strict [`Slot`](crate::Slot).
    #[error("render delegation cannot target a fragment: it has no instance of its own")]
    UnsupportedChild,
}
