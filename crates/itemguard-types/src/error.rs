//! Error hierarchy for ItemGuard.

use thiserror::Error;

/// Errors from configuration loading and writing.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file parse error at {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from a permission resolver.
#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("Unknown actor: {actor}")]
    UnknownActor { actor: String },

    #[error("Permission backend unavailable: {0}")]
    Unavailable(String),
}

/// Errors from delivering a message to an actor.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Actor {actor} is not connected")]
    Disconnected { actor: String },
}
