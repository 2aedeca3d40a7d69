//! The fixed table of known configuration keys.
//!
//! Each key carries the name used in the settings file, the type of its value
//! and the default written back when the key is missing.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Reserved identifier meaning "no id configured". Never a real item.
pub const NO_ITEM: i64 = -1;

/// Reserved permission name meaning "nobody may override". Never resolved.
pub const NO_PERMISSION: &str = "NOBODY";

/// How a key's value is stored and read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Boolean,
    IntList,
    PermissionList,
    String,
}

/// A key's built-in default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Bool(bool),
    IntList(&'static [i64]),
    PermissionList(&'static [&'static str]),
    Text(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    ItemEnable,
    ItemUseDenylist,
    ItemUsePermissions,
    ItemUseMessage,
    ItemDropDenylist,
    ItemDropPermissions,
    ItemDropMessage,
    ItemPickupDenylist,
    ItemPickupPermissions,
    ItemPickupMessage,
}

const NO_ITEMS: &[i64] = &[NO_ITEM];
const NO_PERMISSIONS: &[&str] = &[NO_PERMISSION];

impl Key {
    pub const ALL: [Key; 10] = [
        Key::ItemEnable,
        Key::ItemUseDenylist,
        Key::ItemUsePermissions,
        Key::ItemUseMessage,
        Key::ItemDropDenylist,
        Key::ItemDropPermissions,
        Key::ItemDropMessage,
        Key::ItemPickupDenylist,
        Key::ItemPickupPermissions,
        Key::ItemPickupMessage,
    ];

    /// The dotted name as it appears in the settings file.
    pub fn property_name(self) -> &'static str {
        match self {
            Key::ItemEnable => "item.protection-enable",
            Key::ItemUseDenylist => "item.use-blacklist",
            Key::ItemUsePermissions => "item.use-override-permissions",
            Key::ItemUseMessage => "item.use-message",
            Key::ItemDropDenylist => "item.drop-blacklist",
            Key::ItemDropPermissions => "item.drop-override-permissions",
            Key::ItemDropMessage => "item.drop-message",
            Key::ItemPickupDenylist => "item.pickup-blacklist",
            Key::ItemPickupPermissions => "item.pickup-override-permissions",
            Key::ItemPickupMessage => "item.pickup-message",
        }
    }

    pub fn value_type(self) -> ValueType {
        match self {
            Key::ItemEnable => ValueType::Boolean,
            Key::ItemUseDenylist | Key::ItemDropDenylist | Key::ItemPickupDenylist => {
                ValueType::IntList
            }
            Key::ItemUsePermissions | Key::ItemDropPermissions | Key::ItemPickupPermissions => {
                ValueType::PermissionList
            }
            Key::ItemUseMessage | Key::ItemDropMessage | Key::ItemPickupMessage => {
                ValueType::String
            }
        }
    }

    pub fn default_value(self) -> DefaultValue {
        match self {
            Key::ItemEnable => DefaultValue::Bool(false),
            Key::ItemUseDenylist | Key::ItemDropDenylist | Key::ItemPickupDenylist => {
                DefaultValue::IntList(NO_ITEMS)
            }
            Key::ItemUsePermissions | Key::ItemDropPermissions | Key::ItemPickupPermissions => {
                DefaultValue::PermissionList(NO_PERMISSIONS)
            }
            Key::ItemUseMessage => {
                DefaultValue::Text("You do not have permission to use this item.")
            }
            Key::ItemDropMessage => {
                DefaultValue::Text("You do not have permission to drop this item.")
            }
            Key::ItemPickupMessage => {
                DefaultValue::Text("You do not have permission to pick up this item")
            }
        }
    }

    /// Look up a key by its file-level name.
    pub fn from_property_name(name: &str) -> Option<Key> {
        static BY_NAME: OnceLock<HashMap<&'static str, Key>> = OnceLock::new();
        BY_NAME
            .get_or_init(|| Key::ALL.iter().map(|k| (k.property_name(), *k)).collect())
            .get(name)
            .copied()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.property_name())
    }
}
