//! Traits describing the host services the engine consumes.
//!
//! The gate queries permissions, worlds and regions; the executor dispatches
//! commands and teleports. The [`Env`] aggregate bundles them so the engine
//! can reach everything it needs without coupling to a concrete host.
mod commands;
mod permissions;
mod regions;
mod teleport;
mod worlds;

pub use commands::CommandDispatcher;
pub use permissions::PermissionChecker;
pub use regions::RegionMembership;
pub use teleport::TeleportService;
pub use worlds::WorldResolver;

/// Aggregates the host collaborators required by the gate and executor.
///
/// The region service is optional: hosts without a region backend can still
/// serve portals that do not restrict by region.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, P, W, R, C, T>
where
    P: PermissionChecker + ?Sized,
    W: WorldResolver + ?Sized,
    R: RegionMembership + ?Sized,
    C: CommandDispatcher + ?Sized,
    T: TeleportService + ?Sized,
{
    permissions: &'a P,
    worlds: &'a W,
    regions: Option<&'a R>,
    commands: &'a C,
    teleport: &'a T,
}

pub type HostEnv<'a> = Env<
    'a,
    dyn PermissionChecker + 'a,
    dyn WorldResolver + 'a,
    dyn RegionMembership + 'a,
    dyn CommandDispatcher + 'a,
    dyn TeleportService + 'a,
>;

impl<'a, P, W, R, C, T> Env<'a, P, W, R, C, T>
where
    P: PermissionChecker + ?Sized,
    W: WorldResolver + ?Sized,
    R: RegionMembership + ?Sized,
    C: CommandDispatcher + ?Sized,
    T: TeleportService + ?Sized,
{
    pub fn new(
        permissions: &'a P,
        worlds: &'a W,
        regions: Option<&'a R>,
        commands: &'a C,
        teleport: &'a T,
    ) -> Self {
        Self {
            permissions,
            worlds,
            regions,
            commands,
            teleport,
        }
    }

    pub fn with_all(
        permissions: &'a P,
        worlds: &'a W,
        regions: &'a R,
        commands: &'a C,
        teleport: &'a T,
    ) -> Self {
        Self::new(permissions, worlds, Some(regions), commands, teleport)
    }

    pub fn permissions(&self) -> &'a P {
        self.permissions
    }

    pub fn worlds(&self) -> &'a W {
        self.worlds
    }

    /// Returns the region service, or `None` if the host has no region backend.
    pub fn regions(&self) -> Option<&'a R> {
        self.regions
    }

    pub fn commands(&self) -> &'a C {
        self.commands
    }

    pub fn teleport(&self) -> &'a T {
        self.teleport
    }
}

impl<'a, P, W, R, C, T> Env<'a, P, W, R, C, T>
where
    P: PermissionChecker + 'a,
    W: WorldResolver + 'a,
    R: RegionMembership + 'a,
    C: CommandDispatcher + 'a,
    T: TeleportService + 'a,
{
    /// Converts this environment into a trait-object based `HostEnv` (consumes self).
    pub fn into_host_env(self) -> HostEnv<'a> {
        self.as_host_env()
    }

    /// Converts this environment into a trait-object based `HostEnv` (borrows self).
    pub fn as_host_env(&self) -> HostEnv<'a> {
        let permissions: &'a dyn PermissionChecker = self.permissions;
        let worlds: &'a dyn WorldResolver = self.worlds;
        let regions: Option<&'a dyn RegionMembership> = self.regions.map(|regions| regions as _);
        let commands: &'a dyn CommandDispatcher = self.commands;
        let teleport: &'a dyn TeleportService = self.teleport;
        Env::new(permissions, worlds, regions, commands, teleport)
    }
}
