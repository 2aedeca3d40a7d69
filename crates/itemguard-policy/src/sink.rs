//! Outbound message delivery.

use itemguard_types::{ActorId, DeliveryError};

/// Delivers a chat message to an actor.
///
/// Implemented by the host. Delivery may fail if the actor disconnected
/// mid-flight; callers never retry.
pub trait MessageSink: Send + Sync {
    fn deliver(&self, actor: &ActorId, message: &str) -> Result<(), DeliveryError>;
}
