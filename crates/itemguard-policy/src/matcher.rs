//! Grant table: an in-memory permission resolver with glob patterns.

use crate::resolver::PermissionResolver;
use itemguard_types::{ActorId, PermissionError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Permission patterns granted to each actor.
///
/// Patterns are exact nodes (`vip.drop.7`) or globs (`vip.drop.*`, `*`).
/// Actors with no entry hold nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrantTable {
    #[serde(default)]
    grants: HashMap<ActorId, Vec<String>>,
}

impl GrantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `pattern` to `actor`.
    pub fn grant(&mut self, actor: impl Into<ActorId>, pattern: impl Into<String>) -> &mut Self {
        self.grants
            .entry(actor.into())
            .or_default()
            .push(pattern.into());
        self
    }

    /// Drop every grant held by `actor`. Returns whether anything was held.
    pub fn revoke_all(&mut self, actor: &ActorId) -> bool {
        self.grants.remove(actor).is_some()
    }

    pub fn patterns(&self, actor: &ActorId) -> &[String] {
        self.grants.get(actor).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check a single pattern against a permission node.
    pub fn matches(pattern: &str, node: &str) -> bool {
        if pattern == "*" {
            return true;
        }

        match globset::GlobBuilder::new(pattern)
            .case_insensitive(false)
            .build()
        {
            Ok(glob) => glob.compile_matcher().is_match(node),
            // If glob fails to parse, fall back to exact match
            Err(_) => pattern == node,
        }
    }
}

impl PermissionResolver for GrantTable {
    fn has_permission(&self, actor: &ActorId, node: &str) -> Result<bool, PermissionError> {
        Ok(self
            .patterns(actor)
            .iter()
            .any(|pattern| Self::matches(pattern, node)))
    }
}
