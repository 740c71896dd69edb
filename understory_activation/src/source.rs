// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Activation sources and the fixed key/action tables that count as activation.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

/// Key names that activate a control. Matching is exact.
pub const ACTIVATION_KEYS: &[&str] = &[
    "Enter", " ", "Space", "Spacebar", "Select", "Return", "OK", "Accept",
];

/// Assistive technology action names that activate a control.
pub const ACTIVATION_ACTIONS: &[&str] = &["activate", "click", "magicTap"];

/// Whether `key` is in [`ACTIVATION_KEYS`].
pub fn is_activation_key(key: &str) -> bool {
    ACTIVATION_KEYS.contains(&key)
}

/// Whether `name` is in [`ACTIVATION_ACTIONS`].
pub fn is_activation_action(name: &str) -> bool {
    ACTIVATION_ACTIONS.contains(&name)
}

/// Which input modality triggered an activation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ActivationSource {
    /// Pointer released over the control.
    Pointer,
    /// A key from [`ACTIVATION_KEYS`].
    Keyboard,
    /// An action from [`ACTIVATION_ACTIONS`].
    AssistiveAction,
}

impl ActivationSource {
    /// Stable tag for this source.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pointer => "pointer",
            Self::Keyboard => "keyboard",
            Self::AssistiveAction => "assistive-action",
        }
    }
}

impl fmt::Display for ActivationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source tag that is not one of [`ActivationSource`]'s.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown activation source `{0}`")]
pub struct UnknownSource(pub String);

impl FromStr for ActivationSource {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pointer" => Ok(Self::Pointer),
            "keyboard" => Ok(Self::Keyboard),
            "assistive-action" => Ok(Self::AssistiveAction),
            other => Err(UnknownSource(other.to_string())),
        }
    }
}

/// Emitted once per accepted activation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ActivationEvent {
    /// The value the control asks to move to.
    pub next_value: bool,
    /// What triggered it.
    pub source: ActivationSource,
}
