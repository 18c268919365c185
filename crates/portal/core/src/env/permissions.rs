//! Permission checks against the host's permission system.

use crate::world::Actor;

/// Answers whether an actor holds a permission node.
pub trait PermissionChecker: Send + Sync {
    fn has(&self, actor: &Actor, permission: &str) -> bool;
}
