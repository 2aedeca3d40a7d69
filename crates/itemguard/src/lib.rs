//! ItemGuard: per-world restrictions on using, placing, dropping and
//! picking up items.
//!
//! The host forwards each action as an [`ActionEvent`] to
//! [`ItemGuard::handle`] and cancels the action when it returns `true`.

mod guard;
pub mod telemetry;

pub use guard::{ActionEvent, ItemGuard, WorldConfig};
pub use itemguard_config::{ConfigStore, GlobalSettings, PolicyConfig, config_dir};
pub use itemguard_policy::{
    DebounceConfig, Debouncer, Decision, GrantTable, MessageSink, NotifyOutcome,
    PermissionResolver, PolicySource,
};
pub use itemguard_types::{ActionKind, ActorId, DeliveryError, ItemId, PermissionError, Scope};
