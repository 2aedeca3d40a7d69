//! Policy evaluation and notification debouncing for ItemGuard.
//!
//! Decisions: allow / deny (+ message)
//! Override permissions are resolved per identifier: `<permission>.<id>`

pub mod debounce;
pub mod engine;
pub mod matcher;
pub mod resolver;
pub mod sink;
pub mod source;
pub mod types;

pub use debounce::{Debouncer, NotifyOutcome};
pub use engine::PolicyEvaluator;
pub use matcher::GrantTable;
pub use resolver::{PermissionResolver, override_node, resolve_override};
pub use sink::MessageSink;
pub use source::PolicySource;
pub use types::*;
