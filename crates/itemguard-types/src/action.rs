//! Scopes, actors, identifiers and the four action kinds.

use crate::key::Key;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer naming an item or block type. Only ever tested for membership.
pub type ItemId = i64;

/// An independent configuration domain, one per world.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope(String);

impl Scope {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Scope {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Stable identifier of the actor attempting an action.
///
/// Debounce state and permission queries are keyed by this, never by the
/// host's actor object, so nothing here keeps a disconnected actor alive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The in-world action being attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Use,
    Drop,
    Pickup,
    /// Placing a block is a use of the item in hand and shares the USE keys.
    Place,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Use,
        ActionKind::Drop,
        ActionKind::Pickup,
        ActionKind::Place,
    ];

    pub fn denylist_key(self) -> Key {
        match self {
            ActionKind::Use | ActionKind::Place => Key::ItemUseDenylist,
            ActionKind::Drop => Key::ItemDropDenylist,
            ActionKind::Pickup => Key::ItemPickupDenylist,
        }
    }

    pub fn permissions_key(self) -> Key {
        match self {
            ActionKind::Use | ActionKind::Place => Key::ItemUsePermissions,
            ActionKind::Drop => Key::ItemDropPermissions,
            ActionKind::Pickup => Key::ItemPickupPermissions,
        }
    }

    pub fn message_key(self) -> Key {
        match self {
            ActionKind::Use | ActionKind::Place => Key::ItemUseMessage,
            ActionKind::Drop => Key::ItemDropMessage,
            ActionKind::Pickup => Key::ItemPickupMessage,
        }
    }

    /// Verb used in log lines ("tried to drop forbidden item 7").
    pub fn verb(self) -> &'static str {
        match self {
            ActionKind::Use => "use",
            ActionKind::Drop => "drop",
            ActionKind::Pickup => "pick up",
            ActionKind::Place => "place",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::Use => "use",
            ActionKind::Drop => "drop",
            ActionKind::Pickup => "pickup",
            ActionKind::Place => "place",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_shares_use_keys() {
        assert_eq!(ActionKind::Place.denylist_key(), ActionKind::Use.denylist_key());
        assert_eq!(
            ActionKind::Place.permissions_key(),
            ActionKind::Use.permissions_key()
        );
        assert_eq!(ActionKind::Place.message_key(), ActionKind::Use.message_key());
    }

    #[test]
    fn test_kinds_have_distinct_lists() {
        assert_ne!(ActionKind::Use.denylist_key(), ActionKind::Drop.denylist_key());
        assert_ne!(ActionKind::Drop.denylist_key(), ActionKind::Pickup.denylist_key());
        assert_ne!(
            ActionKind::Use.permissions_key(),
            ActionKind::Pickup.permissions_key()
        );
    }

    #[test]
    fn test_scope_and_actor_display() {
        assert_eq!(Scope::from("world1").to_string(), "world1");
        assert_eq!(ActorId::from("Alice").as_str(), "Alice");
    }
}
