//! Permission resolver trait and per-identifier override resolution.

use itemguard_types::{ActorId, ItemId, NO_PERMISSION, PermissionError};

/// Answers "does this actor hold permission node N".
///
/// How permissions are granted is up to the implementation.
pub trait PermissionResolver: Send + Sync {
    fn has_permission(&self, actor: &ActorId, node: &str) -> Result<bool, PermissionError>;
}

/// The node an override permission resolves to for one identifier.
///
/// `vip.drop` covering item 7 is checked as `vip.drop.7`.
pub fn override_node(permission: &str, id: ItemId) -> String {
    format!("{permission}.{id}")
}

/// Check whether `actor` holds any of `permissions` for `id`.
///
/// The `NOBODY` sentinel is never resolved. Resolver errors count as
/// "not held" and evaluation moves on to the next permission.
pub fn resolve_override<R>(
    resolver: &R,
    actor: &ActorId,
    permissions: &[String],
    id: ItemId,
) -> bool
where
    R: PermissionResolver + ?Sized,
{
    permissions
        .iter()
        .filter(|p| p.as_str() != NO_PERMISSION && !p.is_empty())
        .any(|permission| {
            let node = override_node(permission, id);
            match resolver.has_permission(actor, &node) {
                Ok(held) => held,
                Err(e) => {
                    tracing::warn!("Permission check {} for {} failed: {}", node, actor, e);
                    false
                }
            }
        })
}
