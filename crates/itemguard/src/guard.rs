//! The event entry point: evaluate, veto, warn.

use anyhow::{Context, Result};
use itemguard_config::{ConfigStore, GlobalSettings, PolicyConfig, worlds_dir};
use itemguard_policy::{
    DebounceConfig, Debouncer, Decision, MessageSink, NotifyOutcome, PermissionResolver,
    PolicyEvaluator,
};
use itemguard_types::{ActionKind, ActorId, ConfigError, ItemId, Scope};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One action reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEvent {
    pub kind: ActionKind,
    pub actor: ActorId,
    pub scope: Scope,
    pub item: ItemId,
}

impl ActionEvent {
    pub fn new(
        kind: ActionKind,
        actor: impl Into<ActorId>,
        scope: impl Into<Scope>,
        item: ItemId,
    ) -> Self {
        Self {
            kind,
            actor: actor.into(),
            scope: scope.into(),
            item,
        }
    }
}

/// World settings paired with whatever permission resolver the host uses.
pub type WorldConfig = PolicyConfig<dyn PermissionResolver>;

pub struct ItemGuard {
    config: Arc<WorldConfig>,
    evaluator: PolicyEvaluator,
    debouncer: Arc<Debouncer>,
    sink: Arc<dyn MessageSink>,
}

impl ItemGuard {
    pub fn new(
        config: Arc<WorldConfig>,
        sink: Arc<dyn MessageSink>,
        debounce: &DebounceConfig,
    ) -> Self {
        Self {
            evaluator: PolicyEvaluator::new(config.clone()),
            config,
            debouncer: Arc::new(Debouncer::new(debounce)),
            sink,
        }
    }

    /// Load configuration from `config_dir`, add any missing keys to the
    /// world files, and build a guard.
    pub fn enable<R>(
        config_dir: &Path,
        resolver: Arc<R>,
        sink: Arc<dyn MessageSink>,
    ) -> Result<Self>
    where
        R: PermissionResolver + 'static,
    {
        let global = GlobalSettings::load(config_dir);
        let worlds = worlds_dir(config_dir);
        let store = ConfigStore::load(&worlds)
            .with_context(|| format!("Failed to load world settings from {}", worlds.display()))?;
        let resolver: Arc<dyn PermissionResolver> = resolver;
        let config = Arc::new(PolicyConfig::new(store, resolver));

        let guard = Self::new(config, sink, &global.debounce);
        let written = guard
            .evaluator
            .ensure_defaults()
            .context("Failed to write default settings")?;
        tracing::info!(
            "ItemGuard enabled ({} world files updated, cooldown {:?})",
            written,
            guard.debouncer.cooldown()
        );
        Ok(guard)
    }

    pub fn evaluate(&self, event: &ActionEvent) -> Decision {
        self.evaluator
            .evaluate(&event.scope, event.kind, event.item, &event.actor)
    }

    /// Handle one action. Returns true when the host must cancel it.
    ///
    /// A denied actor is warned at most once per cooldown.
    pub fn handle(&self, event: &ActionEvent) -> bool {
        tracing::debug!(
            "{} {} item {} in {}",
            event.actor,
            event.kind,
            event.item,
            event.scope
        );
        let decision = self.evaluate(event);
        if decision.allowed {
            return false;
        }

        tracing::info!(
            "{} tried to {} forbidden item {}",
            event.actor,
            event.kind.verb(),
            event.item
        );
        if let Some(message) = decision.message {
            let outcome = self
                .debouncer
                .notify(&event.actor, &message, self.sink.as_ref());
            if outcome == NotifyOutcome::Suppressed {
                tracing::trace!("Warning to {} suppressed", event.actor);
            }
        }
        true
    }

    /// Re-read every world file. On error the previous settings stay in use.
    pub fn reload(&self) -> Result<(), ConfigError> {
        self.config.reload()
    }

    /// Write a defaults-filled settings file for a world seen for the first
    /// time. Returns whether a file was created.
    pub fn ensure_scope(&self, scope: &Scope) -> Result<bool, ConfigError> {
        self.config.ensure_scope(scope)
    }

    /// Drop debounce state for an actor that left.
    pub fn on_disconnect(&self, actor: &ActorId) {
        self.debouncer.forget(actor);
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    /// Periodically remove expired debounce entries. Must be called from
    /// within a tokio runtime; abort the handle to stop.
    pub fn spawn_sweeper(&self, period: Duration) -> tokio::task::JoinHandle<()> {
        let debouncer = Arc::clone(&self.debouncer);
        let period = period.max(Duration::from_millis(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let removed = debouncer.sweep(Instant::now());
                if removed > 0 {
                    tracing::trace!("Swept {} expired debounce entries", removed);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemguard_policy::GrantTable;
    use itemguard_types::DeliveryError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Inbox {
        delivered: Mutex<Vec<(String, String)>>,
    }

    impl MessageSink for Inbox {
        fn deliver(&self, actor: &ActorId, message: &str) -> Result<(), DeliveryError> {
            self.delivered
                .lock()
                .unwrap()
                .push((actor.to_string(), message.to_string()));
            Ok(())
        }
    }

    fn guard_in(dir: &Path, world1: &str) -> (ItemGuard, Arc<Inbox>) {
        std::fs::create_dir_all(dir.join("worlds")).unwrap();
        std::fs::write(dir.join("worlds/world1.toml"), world1).unwrap();
        let inbox = Arc::new(Inbox::default());
        let guard = ItemGuard::enable(dir, Arc::new(GrantTable::new()), inbox.clone()).unwrap();
        (guard, inbox)
    }

    #[test]
    fn test_enable_writes_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let (_guard, _inbox) = guard_in(dir.path(), "[item]\nprotection-enable = true\n");
        let content = std::fs::read_to_string(dir.path().join("worlds/world1.toml")).unwrap();
        assert!(content.contains("pickup-override-permissions"));
        assert!(content.contains("protection-enable = true"));
    }

    #[test]
    fn test_enable_with_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let guard = ItemGuard::enable(
            dir.path(),
            Arc::new(GrantTable::new()),
            Arc::new(Inbox::default()),
        )
        .unwrap();
        let event = ActionEvent::new(ActionKind::Use, "Alice", "world1", 7);
        assert!(!guard.handle(&event));
    }

    #[test]
    fn test_denied_event_vetoed_and_warned_once() {
        let dir = tempfile::tempdir().unwrap();
        let (guard, inbox) = guard_in(
            dir.path(),
            "[item]\nprotection-enable = true\npickup-blacklist = [7]\n",
        );
        let event = ActionEvent::new(ActionKind::Pickup, "Alice", "world1", 7);

        assert!(guard.handle(&event));
        assert!(guard.handle(&event));
        let delivered = inbox.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(
            delivered[0].1,
            "You do not have permission to pick up this item"
        );
    }

    #[test]
    fn test_disconnect_clears_cooldown() {
        let dir = tempfile::tempdir().unwrap();
        let (guard, inbox) = guard_in(
            dir.path(),
            "[item]\nprotection-enable = true\nuse-blacklist = [7]\n",
        );
        let event = ActionEvent::new(ActionKind::Place, "Alice", "world1", 7);

        assert!(guard.handle(&event));
        guard.on_disconnect(&ActorId::from("Alice"));
        assert!(guard.debouncer().is_empty());
        assert!(guard.handle(&event));
        assert_eq!(inbox.delivered.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_reload_applies_edited_world_file() {
        let dir = tempfile::tempdir().unwrap();
        let (guard, _inbox) = guard_in(dir.path(), "[item]\nprotection-enable = false\n");
        let event = ActionEvent::new(ActionKind::Drop, "Alice", "world1", 7);
        assert!(!guard.handle(&event));

        std::fs::write(
            dir.path().join("worlds/world1.toml"),
            "[item]\nprotection-enable = true\ndrop-blacklist = [7]\n",
        )
        .unwrap();
        assert!(!guard.handle(&event));

        guard.reload().unwrap();
        assert!(guard.handle(&event));
    }

    #[test]
    fn test_ensure_scope_writes_new_world() {
        let dir = tempfile::tempdir().unwrap();
        let (guard, _inbox) = guard_in(dir.path(), "[item]\nprotection-enable = true\n");
        let nether = Scope::from("nether");

        assert!(guard.ensure_scope(&nether).unwrap());
        assert!(!guard.ensure_scope(&nether).unwrap());
        let content = std::fs::read_to_string(dir.path().join("worlds/nether.toml")).unwrap();
        assert!(content.contains("protection-enable = false"));
        assert!(!guard.handle(&ActionEvent::new(ActionKind::Use, "Alice", "nether", 7)));
    }

    #[tokio::test]
    async fn test_sweeper_removes_expired_entries() {
        let inbox = Arc::new(Inbox::default());
        let dir = tempfile::tempdir().unwrap();
        let resolver: Arc<dyn PermissionResolver> = Arc::new(GrantTable::new());
        let config = PolicyConfig::new(ConfigStore::load(dir.path()).unwrap(), resolver);
        let guard = ItemGuard::new(
            Arc::new(config),
            inbox.clone(),
            &DebounceConfig {
                cooldown_ms: 20,
                capacity: 16,
            },
        );
        guard
            .debouncer()
            .notify(&ActorId::from("Alice"), "msg", inbox.as_ref());
        assert_eq!(guard.debouncer().len(), 1);

        let handle = guard.spawn_sweeper(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();
        assert!(guard.debouncer().is_empty());
    }
}
