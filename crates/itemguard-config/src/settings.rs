//! One world's settings table and typed reads against the key table.

use itemguard_types::{DefaultValue, ItemId, Key, ValueType};
use toml::{Table, Value};

/// Parsed contents of `worlds/<world>.toml`.
///
/// Dotted property names map onto nested tables, so `item.use-blacklist`
/// lives at `[item] use-blacklist`. Integer and permission lists may also
/// be written as comma-separated strings (`"7, 46"`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldSettings {
    table: Table,
}

impl WorldSettings {
    pub fn new(table: Table) -> Self {
        Self { table }
    }

    /// Parse settings from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Table>(content).map(Self::new)
    }

    /// A settings table holding every known key at its default.
    pub fn with_defaults() -> Self {
        let mut settings = Self::default();
        for key in Key::ALL {
            settings.insert_default(key);
        }
        settings
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&self.table)
    }

    pub fn contains_key(&self, key: Key) -> bool {
        self.lookup(key).is_some()
    }

    pub fn get_bool(&self, key: Key) -> bool {
        match self.lookup(key) {
            Some(Value::Boolean(b)) => *b,
            Some(other) => {
                wrong_type(key, other);
                default_bool(key)
            }
            None => default_bool(key),
        }
    }

    pub fn get_ints(&self, key: Key) -> Vec<ItemId> {
        let parsed: Option<Vec<ItemId>> = match self.lookup(key) {
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::Integer(i) => Some(*i),
                        Value::String(s) => parse_int(key, s),
                        other => {
                            wrong_type(key, other);
                            None
                        }
                    })
                    .collect(),
            ),
            Some(Value::Integer(i)) => Some(vec![*i]),
            Some(Value::String(s)) => {
                Some(split_csv(s).filter_map(|p| parse_int(key, p)).collect())
            }
            Some(other) => {
                wrong_type(key, other);
                None
            }
            None => None,
        };
        parsed.unwrap_or_else(|| match key.default_value() {
            DefaultValue::IntList(ids) => ids.to_vec(),
            _ => Vec::new(),
        })
    }

    /// Exact membership test against an integer list key.
    pub fn contains_int(&self, key: Key, id: ItemId) -> bool {
        self.get_ints(key).contains(&id)
    }

    pub fn get_permissions(&self, key: Key) -> Vec<String> {
        let parsed: Option<Vec<String>> = match self.lookup(key) {
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.trim().to_string()),
                        other => {
                            wrong_type(key, other);
                            None
                        }
                    })
                    .filter(|s| !s.is_empty())
                    .collect(),
            ),
            Some(Value::String(s)) => Some(split_csv(s).map(str::to_string).collect()),
            Some(other) => {
                wrong_type(key, other);
                None
            }
            None => None,
        };
        parsed.unwrap_or_else(|| match key.default_value() {
            DefaultValue::PermissionList(names) => names.iter().map(|s| s.to_string()).collect(),
            _ => Vec::new(),
        })
    }

    pub fn get_string(&self, key: Key) -> String {
        match self.lookup(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                wrong_type(key, other);
                default_text(key)
            }
            None => default_text(key),
        }
    }

    /// Insert `key` at its default if it is missing. Returns whether the
    /// table changed.
    pub fn insert_default(&mut self, key: Key) -> bool {
        if self.contains_key(key) {
            return false;
        }

        let mut segments: Vec<&str> = key.property_name().split('.').collect();
        let Some(leaf) = segments.pop() else {
            return false;
        };

        let mut table = &mut self.table;
        for segment in segments {
            let entry = table
                .entry(segment.to_string())
                .or_insert_with(|| Value::Table(Table::new()));
            match entry {
                Value::Table(inner) => table = inner,
                _ => {
                    tracing::warn!(
                        "Cannot add default for '{}': '{}' is not a table",
                        key,
                        segment
                    );
                    return false;
                }
            }
        }

        table.insert(leaf.to_string(), default_as_value(key));
        true
    }

    fn lookup(&self, key: Key) -> Option<&Value> {
        let mut segments = key.property_name().split('.');
        let first = segments.next()?;
        let mut value = self.table.get(first)?;
        for segment in segments {
            value = value.as_table()?.get(segment)?;
        }
        Some(value)
    }
}

fn default_as_value(key: Key) -> Value {
    match key.default_value() {
        DefaultValue::Bool(b) => Value::Boolean(b),
        DefaultValue::IntList(ids) => {
            Value::Array(ids.iter().map(|i| Value::Integer(*i)).collect())
        }
        DefaultValue::PermissionList(names) => Value::Array(
            names
                .iter()
                .map(|s| Value::String(s.to_string()))
                .collect(),
        ),
        DefaultValue::Text(text) => Value::String(text.to_string()),
    }
}

fn default_bool(key: Key) -> bool {
    matches!(key.default_value(), DefaultValue::Bool(true))
}

fn default_text(key: Key) -> String {
    match key.default_value() {
        DefaultValue::Text(text) => text.to_string(),
        _ => String::new(),
    }
}

fn split_csv(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|p| !p.is_empty())
}

fn parse_int(key: Key, s: &str) -> Option<ItemId> {
    match s.trim().parse::<ItemId>() {
        Ok(i) => Some(i),
        Err(_) => {
            tracing::warn!("Ignoring non-integer '{}' in '{}'", s, key);
            None
        }
    }
}

fn wrong_type(key: Key, value: &Value) {
    let expected = match key.value_type() {
        ValueType::Boolean => "boolean",
        ValueType::IntList => "integer list",
        ValueType::PermissionList => "permission list",
        ValueType::String => "string",
    };
    tracing::warn!(
        "Expected {} for '{}', found {}; using default",
        expected,
        key,
        value.type_str()
    );
}
