//! Actor relocation.

use crate::error::HostError;
use crate::world::{Actor, Location};

/// Moves an actor to a destination, applying both position and facing.
pub trait TeleportService: Send + Sync {
    fn teleport(&self, actor: &Actor, destination: &Location) -> Result<(), HostError>;
}
