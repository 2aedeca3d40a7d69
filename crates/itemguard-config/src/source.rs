//! [`PolicySource`] over the world settings and a permission resolver.

use crate::store::ConfigStore;
use itemguard_policy::{DecisionInputs, PermissionResolver, PolicySource, resolve_override};
use itemguard_types::{ActionKind, ActorId, ConfigError, ItemId, Key, Scope};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The configuration collaborator handed to the policy evaluator.
pub struct PolicyConfig<R: ?Sized> {
    store: RwLock<ConfigStore>,
    resolver: Arc<R>,
}

impl<R: PermissionResolver + ?Sized> PolicyConfig<R> {
    pub fn new(store: ConfigStore, resolver: Arc<R>) -> Self {
        Self {
            store: RwLock::new(store),
            resolver,
        }
    }

    /// Re-read every world file from disk.
    pub fn reload(&self) -> Result<(), ConfigError> {
        self.write().reload()
    }

    /// Create a defaults-filled settings file for a newly seen world.
    pub fn ensure_scope(&self, scope: &Scope) -> Result<bool, ConfigError> {
        self.write().ensure_scope(scope)
    }

    fn read(&self) -> RwLockReadGuard<'_, ConfigStore> {
        self.store.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, ConfigStore> {
        self.store
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<R: PermissionResolver + ?Sized> PolicySource for PolicyConfig<R> {
    fn enabled(&self, scope: &Scope) -> bool {
        self.read().settings(scope).get_bool(Key::ItemEnable)
    }

    fn contains_identifier(&self, scope: &Scope, list: Key, id: ItemId) -> bool {
        self.read().settings(scope).contains_int(list, id)
    }

    fn has_override(
        &self,
        scope: &Scope,
        permissions: Key,
        actor: &ActorId,
        id: ItemId,
    ) -> bool {
        // Release the lock before calling out to the resolver.
        let names = self.read().settings(scope).get_permissions(permissions);
        resolve_override(self.resolver.as_ref(), actor, &names, id)
    }

    fn message(&self, scope: &Scope, message: Key) -> String {
        self.read().settings(scope).get_string(message)
    }

    fn ensure_keys_present(&self, keys: &[Key]) -> Result<usize, ConfigError> {
        self.write().ensure_keys_present(keys)
    }

    /// All settings come from one read guard, so a concurrent reload never
    /// mixes old and new tables in a single decision.
    fn decision_inputs(
        &self,
        scope: &Scope,
        kind: ActionKind,
        id: ItemId,
        actor: &ActorId,
    ) -> DecisionInputs {
        let mut inputs = DecisionInputs::default();
        let names = {
            let store = self.read();
            let settings = store.settings(scope);
            inputs.enabled = settings.get_bool(Key::ItemEnable);
            inputs.denylisted = inputs.enabled && settings.contains_int(kind.denylist_key(), id);
            if !inputs.denylisted {
                return inputs;
            }
            inputs.message = settings.get_string(kind.message_key());
            settings.get_permissions(kind.permissions_key())
        };

        // The resolver runs without the lock held.
        inputs.overridden = resolve_override(self.resolver.as_ref(), actor, &names, id);
        inputs
    }
}
