//! Spatial value types shared between the host and the rule engine.
//!
//! The host owns worlds and actors; the core only sees lightweight handles
//! and per-event snapshots of them.

/// Opaque identity of a loaded world, as handed out by the host.
///
/// Two locations are in the same world exactly when their ids are equal.
/// Ids are not names: a world that is unloaded and loaded again may receive
/// a fresh id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldId(pub u64);

/// Continuous position inside a world.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the block containing this position.
    pub fn block(self) -> BlockPoint {
        BlockPoint::new(
            self.x.floor() as i64,
            self.y.floor() as i64,
            self.z.floor() as i64,
        )
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Integer block coordinate; the granularity region services work at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockPoint {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl BlockPoint {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }
}

/// Facing direction in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Orientation {
    pub const fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    pub fn is_finite(self) -> bool {
        self.yaw.is_finite() && self.pitch.is_finite()
    }
}

/// A fully qualified point: world, position and facing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub world: WorldId,
    pub position: Position,
    pub orientation: Orientation,
}

impl Location {
    pub const fn new(world: WorldId, position: Position, orientation: Orientation) -> Self {
        Self {
            world,
            position,
            orientation,
        }
    }

    pub fn block(&self) -> BlockPoint {
        self.position.block()
    }
}

/// Stable identifier of an actor within the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u64);

/// Snapshot of the actor that triggered a portal.
///
/// The host builds one per trigger event; the core never mutates it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub location: Location,
}

impl Actor {
    pub fn new(id: ActorId, name: impl Into<String>, location: Location) -> Self {
        Self {
            id,
            name: name.into(),
            location,
        }
    }

    pub fn world(&self) -> WorldId {
        self.location.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_point_floors_negative_coordinates() {
        let position = Position::new(-0.5, 64.99, 12.0);
        assert_eq!(position.block(), BlockPoint::new(-1, 64, 12));
    }

    #[test]
    fn non_finite_positions_are_detected() {
        assert!(Position::ORIGIN.is_finite());
        assert!(!Position::new(f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Orientation::new(0.0, f32::INFINITY).is_finite());
    }
}
