//! In-memory host collaborators that record what the engine asked of them.
//!
//! Compiled for unit tests and behind the `testing` feature for downstream
//! crates.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::env::{
    CommandDispatcher, Env, PermissionChecker, RegionMembership, TeleportService, WorldResolver,
};
use crate::error::HostError;
use crate::world::{Actor, ActorId, BlockPoint, Location, Orientation, Position, WorldId};

/// A side effect observed by the recording collaborators.
#[derive(Clone, Debug, PartialEq)]
pub enum HostCall {
    Dispatch(ActorId, String),
    Teleport(ActorId, Location),
}

type CallLog = Arc<Mutex<Vec<HostCall>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Permission table keyed by actor.
#[derive(Debug, Default)]
pub struct StaticPermissions {
    granted: Mutex<HashMap<ActorId, HashSet<String>>>,
}

impl StaticPermissions {
    pub fn grant(&self, actor: ActorId, permission: impl Into<String>) {
        lock(&self.granted)
            .entry(actor)
            .or_default()
            .insert(permission.into());
    }
}

impl PermissionChecker for StaticPermissions {
    fn has(&self, actor: &Actor, permission: &str) -> bool {
        lock(&self.granted)
            .get(&actor.id)
            .is_some_and(|granted| granted.contains(permission))
    }
}

/// World names mapped to ids.
#[derive(Debug, Default)]
pub struct NamedWorlds {
    worlds: Mutex<HashMap<String, WorldId>>,
}

impl NamedWorlds {
    pub fn insert(&self, name: impl Into<String>, id: WorldId) {
        lock(&self.worlds).insert(name.into(), id);
    }

    pub fn unload(&self, name: &str) {
        lock(&self.worlds).remove(name);
    }
}

impl WorldResolver for NamedWorlds {
    fn resolve(&self, name: &str) -> Option<WorldId> {
        lock(&self.worlds).get(name).copied()
    }
}

#[derive(Clone, Debug)]
struct Cuboid {
    id: String,
    min: BlockPoint,
    max: BlockPoint,
}

impl Cuboid {
    fn contains(&self, point: BlockPoint) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }
}

/// Cuboid regions per world; counts every membership query.
#[derive(Debug, Default)]
pub struct RecordingRegions {
    regions: Mutex<HashMap<WorldId, Vec<Cuboid>>>,
    queries: AtomicUsize,
}

impl RecordingRegions {
    /// Adds a region covering the whole world.
    pub fn place(&self, world: WorldId, id: impl Into<String>) {
        self.place_cuboid(
            world,
            id,
            BlockPoint::new(i64::MIN, i64::MIN, i64::MIN),
            BlockPoint::new(i64::MAX, i64::MAX, i64::MAX),
        );
    }

    /// Adds a region spanning `min..=max` on every axis.
    pub fn place_cuboid(
        &self,
        world: WorldId,
        id: impl Into<String>,
        min: BlockPoint,
        max: BlockPoint,
    ) {
        lock(&self.regions).entry(world).or_default().push(Cuboid {
            id: id.into(),
            min,
            max,
        });
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl RegionMembership for RecordingRegions {
    fn regions_containing(&self, world: WorldId, point: BlockPoint) -> Vec<String> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        lock(&self.regions)
            .get(&world)
            .map(|cuboids| {
                cuboids
                    .iter()
                    .filter(|cuboid| cuboid.contains(point))
                    .map(|cuboid| cuboid.id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Records dispatched commands; individual commands can be declined or failed.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    log: CallLog,
    declined: Mutex<HashSet<String>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingDispatcher {
    /// The host will answer `Ok(false)` for this command.
    pub fn decline(&self, command: impl Into<String>) {
        lock(&self.declined).insert(command.into());
    }

    /// The host will answer `Err` for this command.
    pub fn fail(&self, command: impl Into<String>) {
        lock(&self.failing).insert(command.into());
    }
}

impl CommandDispatcher for RecordingDispatcher {
    fn dispatch(&self, actor: &Actor, command: &str) -> Result<bool, HostError> {
        lock(&self.log).push(HostCall::Dispatch(actor.id, command.to_owned()));
        if lock(&self.failing).contains(command) {
            return Err(HostError::new(format!("command '{command}' threw")));
        }
        Ok(!lock(&self.declined).contains(command))
    }
}

/// Records teleports; can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingTeleport {
    log: CallLog,
    failure: Mutex<Option<String>>,
}

impl RecordingTeleport {
    pub fn fail_with(&self, message: impl Into<String>) {
        *lock(&self.failure) = Some(message.into());
    }
}

impl TeleportService for RecordingTeleport {
    fn teleport(&self, actor: &Actor, destination: &Location) -> Result<(), HostError> {
        if let Some(message) = lock(&self.failure).clone() {
            return Err(HostError::new(message));
        }
        lock(&self.log).push(HostCall::Teleport(actor.id, *destination));
        Ok(())
    }
}

/// A complete fake host: `world` and `world_nether` are loaded, nobody holds
/// any permission, and no regions exist.
#[derive(Debug)]
pub struct HostFixture {
    pub permissions: StaticPermissions,
    pub worlds: NamedWorlds,
    pub regions: RecordingRegions,
    pub commands: RecordingDispatcher,
    pub teleport: RecordingTeleport,
    log: CallLog,
}

impl HostFixture {
    pub const OVERWORLD: WorldId = WorldId(1);
    pub const NETHER: WorldId = WorldId(2);

    pub fn new() -> Self {
        let log = CallLog::default();
        let worlds = NamedWorlds::default();
        worlds.insert("world", Self::OVERWORLD);
        worlds.insert("world_nether", Self::NETHER);

        Self {
            permissions: StaticPermissions::default(),
            worlds,
            regions: RecordingRegions::default(),
            commands: RecordingDispatcher {
                log: Arc::clone(&log),
                ..RecordingDispatcher::default()
            },
            teleport: RecordingTeleport {
                log: Arc::clone(&log),
                ..RecordingTeleport::default()
            },
            log,
        }
    }

    pub fn env(
        &self,
    ) -> Env<
        '_,
        StaticPermissions,
        NamedWorlds,
        RecordingRegions,
        RecordingDispatcher,
        RecordingTeleport,
    > {
        Env::with_all(
            &self.permissions,
            &self.worlds,
            &self.regions,
            &self.commands,
            &self.teleport,
        )
    }

    pub fn env_without_regions(
        &self,
    ) -> Env<
        '_,
        StaticPermissions,
        NamedWorlds,
        RecordingRegions,
        RecordingDispatcher,
        RecordingTeleport,
    > {
        Env::new(
            &self.permissions,
            &self.worlds,
            None,
            &self.commands,
            &self.teleport,
        )
    }

    /// Every dispatch and teleport, in the order they happened.
    pub fn calls(&self) -> Vec<HostCall> {
        lock(&self.log).clone()
    }

    pub fn dispatches(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Dispatch(_, command) => Some(command),
                HostCall::Teleport(..) => None,
            })
            .collect()
    }

    pub fn teleports(&self) -> Vec<Location> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Teleport(_, destination) => Some(destination),
                HostCall::Dispatch(..) => None,
            })
            .collect()
    }
}

impl Default for HostFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// The fixture actor, standing at block (0, 64, 0) of `world`.
pub fn actor_at(world: WorldId) -> Actor {
    Actor::new(
        ActorId(7),
        "steve",
        Location::new(world, Position::new(0.5, 64.0, 0.5), Orientation::default()),
    )
}
