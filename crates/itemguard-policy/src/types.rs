//! Core types for policy decisions and debouncing.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of evaluating one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    /// Message to show the actor. Only present on denial.
    pub message: Option<String>,
}

impl Decision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            message: None,
        }
    }

    pub fn deny(message: impl Into<String>) -> Self {
        Self {
            allowed: false,
            message: Some(message.into()),
        }
    }

    pub fn is_denied(&self) -> bool {
        !self.allowed
    }
}

/// What one decision reads from configuration.
///
/// Fields past the first one that settles the outcome are left at their
/// defaults: a disabled scope never reports a denylist hit, and `message` is
/// only filled in when the identifier is denylisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecisionInputs {
    pub enabled: bool,
    pub denylisted: bool,
    pub overridden: bool,
    pub message: String,
}

/// Settings for the notification debouncer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Cooldown in milliseconds (default: 1000).
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
    /// Maximum number of actors tracked at once (default: 4096).
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl DebounceConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: default_cooldown_ms(),
            capacity: default_capacity(),
        }
    }
}

fn default_cooldown_ms() -> u64 {
    1_000
}

fn default_capacity() -> usize {
    4_096
}
