//! Spatial region membership.

use crate::world::{BlockPoint, WorldId};

/// Narrow view of a region-tracking backend.
///
/// Any backend able to list the regions covering a block can serve portal
/// gates; the core never sees region geometry.
pub trait RegionMembership: Send + Sync {
    /// Returns the ids of every region in `world` that contains `point`.
    fn regions_containing(&self, world: WorldId, point: BlockPoint) -> Vec<String>;

    /// Returns true if any region containing `point` is named `region`,
    /// ignoring ASCII case.
    fn contains(&self, world: WorldId, point: BlockPoint, region: &str) -> bool {
        self.regions_containing(world, point)
            .iter()
            .any(|id| id.eq_ignore_ascii_case(region))
    }
}
