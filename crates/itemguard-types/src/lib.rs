//! Shared types, configuration keys and error hierarchy for ItemGuard.

pub mod action;
pub mod error;
pub mod key;

pub use action::*;
pub use error::{ConfigError, DeliveryError, PermissionError};
pub use key::{DefaultValue, Key, NO_ITEM, NO_PERMISSION, ValueType};
