//! Notification debouncer: at most one warning per actor per cooldown.
//!
//! Entries are keyed by [`ActorId`] with an explicit expiry instant. Expired
//! entries are replaced lazily on the next notify and removed in bulk by
//! [`Debouncer::sweep`].

use crate::sink::MessageSink;
use crate::types::DebounceConfig;
use itemguard_types::ActorId;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// What happened to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// Message handed to the sink; actor is now suppressed.
    Delivered,
    /// Actor already inside a cooldown; message dropped.
    Suppressed,
    /// Sink rejected the message. The cooldown still applies.
    Failed,
}

pub struct Debouncer {
    cooldown: Duration,
    capacity: usize,
    /// Actor -> instant their cooldown ends.
    suppressed: Mutex<HashMap<ActorId, Instant>>,
}

impl Debouncer {
    pub fn new(config: &DebounceConfig) -> Self {
        Self {
            cooldown: config.cooldown(),
            capacity: config.capacity.max(1),
            suppressed: Mutex::new(HashMap::new()),
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Deliver `message` to `actor` unless they were warned within the cooldown.
    pub fn notify(&self, actor: &ActorId, message: &str, sink: &dyn MessageSink) -> NotifyOutcome {
        self.notify_at(actor, message, sink, Instant::now())
    }

    /// [`notify`](Self::notify) with an explicit clock reading.
    pub fn notify_at(
        &self,
        actor: &ActorId,
        message: &str,
        sink: &dyn MessageSink,
        now: Instant,
    ) -> NotifyOutcome {
        if !self.try_suppress(actor, now) {
            return NotifyOutcome::Suppressed;
        }

        // Deliver outside the lock; the entry stays whatever the sink does.
        match sink.deliver(actor, message) {
            Ok(()) => NotifyOutcome::Delivered,
            Err(e) => {
                tracing::debug!("Dropped warning for {}: {}", actor, e);
                NotifyOutcome::Failed
            }
        }
    }

    /// Whether `actor` is inside a cooldown at `now`.
    pub fn is_suppressed(&self, actor: &ActorId, now: Instant) -> bool {
        self.entries()
            .get(actor)
            .is_some_and(|expires_at| *expires_at > now)
    }

    /// Forget `actor` entirely, e.g. on disconnect.
    pub fn forget(&self, actor: &ActorId) -> bool {
        self.entries().remove(actor).is_some()
    }

    /// Remove every expired entry. Returns how many were removed.
    pub fn sweep(&self, now: Instant) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at > now);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Enter the suppressed state unless already there. Returns true when
    /// the caller should deliver.
    fn try_suppress(&self, actor: &ActorId, now: Instant) -> bool {
        let mut entries = self.entries();

        if let Some(expires_at) = entries.get(actor) {
            if *expires_at > now {
                return false;
            }
        } else if entries.len() >= self.capacity {
            entries.retain(|_, expires_at| *expires_at > now);
            if entries.len() >= self.capacity {
                evict_soonest(&mut entries);
            }
        }

        entries.insert(actor.clone(), now + self.cooldown);
        true
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<ActorId, Instant>> {
        // A panic elsewhere never blocks warnings; the map is always valid.
        self.suppressed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn evict_soonest(entries: &mut HashMap<ActorId, Instant>) {
    let soonest = entries
        .iter()
        .min_by_key(|(_, expires_at)| **expires_at)
        .map(|(actor, _)| actor.clone());
    if let Some(actor) = soonest {
        tracing::debug!("Debounce table full, evicting {}", actor);
        entries.remove(&actor);
    }
}
