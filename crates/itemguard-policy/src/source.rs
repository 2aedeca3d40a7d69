//! Read access to per-scope configuration and permission state.

use crate::types::DecisionInputs;
use itemguard_types::{ActionKind, ActorId, ConfigError, ItemId, Key, Scope};

/// The configuration and permission collaborator the evaluator consults.
///
/// Every read is parameterized by scope and must resolve to a well-defined
/// value: unset keys, bad values and backend faults read as the key's
/// default. A permission query that cannot be answered reads as "not held".
pub trait PolicySource: Send + Sync {
    /// Whether item protection is enabled for this scope (default: false).
    fn enabled(&self, scope: &Scope) -> bool;

    /// Exact membership test against the scope's integer list for `list`.
    fn contains_identifier(&self, scope: &Scope, list: Key, id: ItemId) -> bool;

    /// Whether `actor` holds at least one permission named in `permissions`,
    /// resolved for the identifier `id`.
    fn has_override(
        &self,
        scope: &Scope,
        permissions: Key,
        actor: &ActorId,
        id: ItemId,
    ) -> bool;

    /// The configured (or default) string for `message`.
    fn message(&self, scope: &Scope, message: Key) -> String;

    /// Make sure every key in `keys` exists with its default. Idempotent.
    /// Returns the number of settings files that had to be written.
    fn ensure_keys_present(&self, keys: &[Key]) -> Result<usize, ConfigError>;

    /// Everything needed to decide `kind` on `id` for `actor`.
    ///
    /// The default chains the individual reads and stops as soon as the
    /// outcome is known. Sources whose settings can change at runtime should
    /// take every read from one view of the scope.
    fn decision_inputs(
        &self,
        scope: &Scope,
        kind: ActionKind,
        id: ItemId,
        actor: &ActorId,
    ) -> DecisionInputs {
        let mut inputs = DecisionInputs {
            enabled: self.enabled(scope),
            ..DecisionInputs::default()
        };
        if !inputs.enabled {
            return inputs;
        }

        inputs.denylisted = self.contains_identifier(scope, kind.denylist_key(), id);
        if !inputs.denylisted {
            return inputs;
        }

        inputs.overridden = self.has_override(scope, kind.permissions_key(), actor, id);
        inputs.message = self.message(scope, kind.message_key());
        inputs
    }
}
