//! Policy evaluator: decides whether an actor may perform an action.

use crate::source::PolicySource;
use crate::types::Decision;
use itemguard_types::{ActionKind, ActorId, ItemId, Key, Scope};
use std::sync::Arc;

/// Stateless decision function over a [`PolicySource`].
#[derive(Clone)]
pub struct PolicyEvaluator {
    source: Arc<dyn PolicySource>,
}

impl PolicyEvaluator {
    pub fn new(source: Arc<dyn PolicySource>) -> Self {
        Self { source }
    }

    /// Decide whether `actor` may perform `kind` on `id` in `scope`.
    ///
    /// Evaluation order:
    /// 1. Protection disabled for the scope: allow.
    /// 2. Identifier not on the kind's denylist: allow.
    /// 3. Actor holds an override permission for the identifier: allow.
    /// 4. Otherwise deny with the kind's configured message.
    ///
    /// Each kind is checked against its own lists only; PLACE uses USE's.
    pub fn evaluate(
        &self,
        scope: &Scope,
        kind: ActionKind,
        id: ItemId,
        actor: &ActorId,
    ) -> Decision {
        let inputs = self.source.decision_inputs(scope, kind, id, actor);
        if !inputs.enabled || !inputs.denylisted {
            return Decision::allow();
        }

        if inputs.overridden {
            tracing::debug!("{} holds an override to {} item {} in {}", actor, kind, id, scope);
            return Decision::allow();
        }

        Decision::deny(inputs.message)
    }

    /// Make sure every known key exists in the configuration.
    pub fn ensure_defaults(&self) -> Result<usize, itemguard_types::ConfigError> {
        self.source.ensure_keys_present(&Key::ALL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemguard_types::{ConfigError, DefaultValue};
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    /// In-memory source: one enable flag, denylists and grants per scope.
    #[derive(Default)]
    struct FakeSource {
        enabled: HashSet<String>,
        lists: HashMap<(String, Key), Vec<ItemId>>,
        overrides: HashSet<(String, Key, String, ItemId)>,
        messages: HashMap<(String, Key), String>,
        ensured: Mutex<Vec<Key>>,
    }

    impl FakeSource {
        fn enable(mut self, scope: &str) -> Self {
            self.enabled.insert(scope.to_string());
            self
        }

        fn deny(mut self, scope: &str, key: Key, ids: &[ItemId]) -> Self {
            self.lists.insert((scope.to_string(), key), ids.to_vec());
            self
        }

        fn allow_override(mut self, scope: &str, key: Key, actor: &str, id: ItemId) -> Self {
            self.overrides
                .insert((scope.to_string(), key, actor.to_string(), id));
            self
        }

        fn with_message(mut self, scope: &str, key: Key, text: &str) -> Self {
            self.messages
                .insert((scope.to_string(), key), text.to_string());
            self
        }
    }

    impl PolicySource for FakeSource {
        fn enabled(&self, scope: &Scope) -> bool {
            self.enabled.contains(scope.as_str())
        }

        fn contains_identifier(&self, scope: &Scope, list: Key, id: ItemId) -> bool {
            self.lists
                .get(&(scope.as_str().to_string(), list))
                .is_some_and(|ids| ids.contains(&id))
        }

        fn has_override(
            &self,
            scope: &Scope,
            permissions: Key,
            actor: &ActorId,
            id: ItemId,
        ) -> bool {
            self.overrides.contains(&(
                scope.as_str().to_string(),
                permissions,
                actor.as_str().to_string(),
                id,
            ))
        }

        fn message(&self, scope: &Scope, message: Key) -> String {
            match self.messages.get(&(scope.as_str().to_string(), message)) {
                Some(text) => text.clone(),
                None => match message.default_value() {
                    DefaultValue::Text(text) => text.to_string(),
                    _ => String::new(),
                },
            }
        }

        fn ensure_keys_present(&self, keys: &[Key]) -> Result<usize, ConfigError> {
            self.ensured.lock().unwrap().extend_from_slice(keys);
            Ok(0)
        }
    }

    fn evaluator(source: FakeSource) -> PolicyEvaluator {
        PolicyEvaluator::new(Arc::new(source))
    }

    fn world1() -> Scope {
        Scope::from("world1")
    }

    fn alice() -> ActorId {
        ActorId::from("Alice")
    }

    #[test]
    fn test_disabled_scope_allows_everything() {
        let e = evaluator(
            FakeSource::default().deny("world1", Key::ItemUseDenylist, &[7]),
        );
        for kind in ActionKind::ALL {
            let d = e.evaluate(&world1(), kind, 7, &alice());
            assert_eq!(d, Decision::allow());
        }
    }

    #[test]
    fn test_denied_item_uses_configured_message() {
        let e = evaluator(
            FakeSource::default()
                .enable("world1")
                .deny("world1", Key::ItemUseDenylist, &[7]),
        );
        let d = e.evaluate(&world1(), ActionKind::Use, 7, &alice());
        assert!(d.is_denied());
        assert_eq!(
            d.message.as_deref(),
            Some("You do not have permission to use this item.")
        );
    }

    #[test]
    fn test_item_not_on_denylist_allowed() {
        let e = evaluator(
            FakeSource::default()
                .enable("world1")
                .deny("world1", Key::ItemUseDenylist, &[7]),
        );
        let d = e.evaluate(&world1(), ActionKind::Use, 3, &ActorId::from("Bob"));
        assert_eq!(d, Decision::allow());
    }

    #[test]
    fn test_override_allows() {
        let e = evaluator(
            FakeSource::default()
                .enable("world1")
                .deny("world1", Key::ItemDropDenylist, &[7])
                .allow_override("world1", Key::ItemDropPermissions, "Alice", 7),
        );
        assert!(e.evaluate(&world1(), ActionKind::Drop, 7, &alice()).allowed);
        assert!(
            e.evaluate(&world1(), ActionKind::Drop, 7, &ActorId::from("Bob"))
                .is_denied()
        );
    }

    #[test]
    fn test_kinds_are_independent() {
        let e = evaluator(
            FakeSource::default()
                .enable("world1")
                .deny("world1", Key::ItemUseDenylist, &[7])
                .deny("world1", Key::ItemDropDenylist, &[7])
                .allow_override("world1", Key::ItemUsePermissions, "Alice", 7),
        );
        assert!(e.evaluate(&world1(), ActionKind::Use, 7, &alice()).allowed);
        assert!(e.evaluate(&world1(), ActionKind::Drop, 7, &alice()).is_denied());
        // nothing on the pickup list
        assert!(e.evaluate(&world1(), ActionKind::Pickup, 7, &alice()).allowed);
    }

    #[test]
    fn test_place_checks_use_lists() {
        let e = evaluator(
            FakeSource::default()
                .enable("world1")
                .deny("world1", Key::ItemUseDenylist, &[46])
                .with_message("world1", Key::ItemUseMessage, "No TNT here."),
        );
        let d = e.evaluate(&world1(), ActionKind::Place, 46, &alice());
        assert_eq!(d, Decision::deny("No TNT here."));
    }

    #[test]
    fn test_scopes_do_not_inherit() {
        let e = evaluator(
            FakeSource::default()
                .enable("world1")
                .enable("nether")
                .deny("world1", Key::ItemPickupDenylist, &[7]),
        );
        assert!(
            e.evaluate(&world1(), ActionKind::Pickup, 7, &alice())
                .is_denied()
        );
        assert!(
            e.evaluate(&Scope::from("nether"), ActionKind::Pickup, 7, &alice())
                .allowed
        );
    }

    #[test]
    fn test_sentinel_never_matches_real_ids() {
        let e = evaluator(
            FakeSource::default()
                .enable("world1")
                .deny("world1", Key::ItemUseDenylist, &[itemguard_types::NO_ITEM]),
        );
        for id in [0, 1, 7, 255, 4096] {
            assert!(e.evaluate(&world1(), ActionKind::Use, id, &alice()).allowed);
        }
    }

    #[test]
    fn test_ensure_defaults_passes_all_keys() {
        let source = Arc::new(FakeSource::default());
        let e = PolicyEvaluator::new(source.clone());
        e.ensure_defaults().unwrap();
        assert_eq!(source.ensured.lock().unwrap().as_slice(), &Key::ALL);
    }
}
