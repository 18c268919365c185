//! Command dispatch on behalf of an actor.

use crate::error::HostError;
use crate::world::Actor;

/// Runs command lines as if the actor had typed them.
///
/// Commands execute with the actor's own privileges; a command the actor may
/// not run fails inside the host regardless of the portal's own gate.
pub trait CommandDispatcher: Send + Sync {
    /// Dispatches `command` for `actor`.
    ///
    /// Returns `Ok(false)` when the host declined the command without raising
    /// (unknown command, usage error) and `Err` when dispatch itself broke.
    fn dispatch(&self, actor: &Actor, command: &str) -> Result<bool, HostError>;
}
