//! Portal definitions: one configured override, immutable once built.

use std::str::FromStr;

use crate::action::{ActionError, ActionExecutor};
use crate::config::{ConfigError, PortalConfig, TeleportConfig};
use crate::env::{
    CommandDispatcher, Env, PermissionChecker, RegionMembership, TeleportService, WorldResolver,
};
use crate::gate::GateEvaluator;
use crate::kind::PortalKind;
use crate::world::{Actor, Orientation, Position, WorldId};

/// Gate requirements of a portal. `None` means unconstrained.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Requirements {
    region: Option<String>,
    world: Option<String>,
    permission: Option<String>,
}

impl Requirements {
    pub fn new(
        region: Option<String>,
        world: Option<String>,
        permission: Option<String>,
    ) -> Self {
        Self {
            region: normalize(region),
            world: normalize(world),
            permission: normalize(permission),
        }
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn world(&self) -> Option<&str> {
        self.world.as_deref()
    }

    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    /// True if the gate of a portal with these requirements is always open.
    pub fn is_unconstrained(&self) -> bool {
        self.region.is_none() && self.world.is_none() && self.permission.is_none()
    }
}

/// Fixed destination an actor is moved to when a portal fires.
///
/// The world is kept by name and resolved when the portal fires, so the
/// destination survives world reloads.
#[derive(Clone, Debug, PartialEq)]
pub struct TeleportTarget {
    world: String,
    position: Position,
    orientation: Orientation,
}

impl TeleportTarget {
    pub fn new(world: impl Into<String>, position: Position, orientation: Orientation) -> Self {
        Self {
            world: world.into(),
            position,
            orientation,
        }
    }

    pub fn world(&self) -> &str {
        &self.world
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn from_config(id: &str, config: &TeleportConfig) -> Result<Option<Self>, ConfigError> {
        if config.is_empty() {
            return Ok(None);
        }

        let (Some(world), Some(x), Some(y), Some(z), Some(yaw), Some(pitch)) = (
            config.world.as_ref(),
            config.x,
            config.y,
            config.z,
            config.yaw,
            config.pitch,
        ) else {
            return Err(ConfigError::IncompleteTeleport {
                id: id.to_owned(),
                missing: config.missing_fields(),
            });
        };

        let target = Self::new(
            world.clone(),
            Position::new(x, y, z),
            Orientation::new(yaw, pitch),
        );
        target.validate(id)?;
        Ok(Some(target))
    }

    fn validate(&self, id: &str) -> Result<(), ConfigError> {
        let fields = [
            ("x", self.position.x.is_finite()),
            ("y", self.position.y.is_finite()),
            ("z", self.position.z.is_finite()),
            ("yaw", self.orientation.yaw.is_finite()),
            ("pitch", self.orientation.pitch.is_finite()),
        ];
        match fields.into_iter().find(|(_, finite)| !finite) {
            Some((field, _)) => Err(ConfigError::InvalidTeleport {
                id: id.to_owned(),
                field,
            }),
            None => Ok(()),
        }
    }
}

/// One configured portal override.
///
/// Built once from configuration and never mutated; a reload builds fresh
/// definitions and swaps the whole registry.
#[derive(Clone, Debug, PartialEq)]
pub struct PortalDefinition {
    id: String,
    kind: PortalKind,
    requirements: Requirements,
    commands: Vec<String>,
    teleport: Option<TeleportTarget>,
}

impl PortalDefinition {
    /// Builds a definition from the `Portals.<id>` configuration node.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the type is missing or unknown, or if the
    /// teleport target is partially specified or not finite.
    pub fn from_config(id: impl Into<String>, config: &PortalConfig) -> Result<Self, ConfigError> {
        let id = id.into();

        let raw_kind = config
            .kind
            .as_deref()
            .map(str::trim)
            .filter(|kind| !kind.is_empty())
            .ok_or_else(|| ConfigError::MissingKind { id: id.clone() })?;
        let kind = PortalKind::from_str(raw_kind).map_err(|_| ConfigError::UnknownKind {
            id: id.clone(),
            value: raw_kind.to_owned(),
        })?;

        let teleport = match &config.actions.teleport {
            Some(teleport) => TeleportTarget::from_config(&id, teleport)?,
            None => None,
        };

        let requirements = Requirements::new(
            config.requirements.region.clone(),
            config.requirements.world.clone(),
            config.requirements.permission.clone(),
        );

        Ok(Self {
            id,
            kind,
            requirements,
            commands: config.actions.commands.clone(),
            teleport,
        })
    }

    /// Starts a definition built in code rather than from configuration.
    pub fn builder(id: impl Into<String>, kind: PortalKind) -> PortalDefinitionBuilder {
        PortalDefinitionBuilder::new(id, kind)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> PortalKind {
        self.kind
    }

    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    pub fn required_region(&self) -> Option<&str> {
        self.requirements.region()
    }

    pub fn required_world(&self) -> Option<&str> {
        self.requirements.world()
    }

    pub fn required_permission(&self) -> Option<&str> {
        self.requirements.permission()
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn teleport(&self) -> Option<&TeleportTarget> {
        self.teleport.as_ref()
    }

    /// Resolves the required world, if any.
    ///
    /// Returns `None` both when no world is required and when the configured
    /// name does not match a loaded world.
    pub fn world<W>(&self, worlds: &W) -> Option<WorldId>
    where
        W: WorldResolver + ?Sized,
    {
        self.requirements.world().and_then(|name| worlds.resolve(name))
    }

    /// Runs the gate and, if it opens, the actions of this portal.
    ///
    /// Returns `Ok(false)` when the gate is closed; nothing has happened and
    /// the host should fall back to its default behavior.
    ///
    /// # Errors
    ///
    /// Propagates any [`ActionError`] raised while applying the actions.
    pub fn attempt_use<P, W, R, C, T>(
        &self,
        actor: &Actor,
        env: &Env<'_, P, W, R, C, T>,
    ) -> Result<bool, ActionError>
    where
        P: PermissionChecker + ?Sized,
        W: WorldResolver + ?Sized,
        R: RegionMembership + ?Sized,
        C: CommandDispatcher + ?Sized,
        T: TeleportService + ?Sized,
    {
        if !GateEvaluator::evaluate(actor, self, env) {
            return Ok(false);
        }
        ActionExecutor::apply(actor, self, env)
    }
}

/// Fluent construction of a [`PortalDefinition`] in code.
#[derive(Clone, Debug)]
pub struct PortalDefinitionBuilder {
    id: String,
    kind: PortalKind,
    region: Option<String>,
    world: Option<String>,
    permission: Option<String>,
    commands: Vec<String>,
    teleport: Option<TeleportTarget>,
}

impl PortalDefinitionBuilder {
    pub fn new(id: impl Into<String>, kind: PortalKind) -> Self {
        Self {
            id: id.into(),
            kind,
            region: None,
            world: None,
            permission: None,
            commands: Vec::new(),
            teleport: None,
        }
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn world(mut self, world: impl Into<String>) -> Self {
        self.world = Some(world.into());
        self
    }

    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.commands.push(command.into());
        self
    }

    pub fn teleport(mut self, target: TeleportTarget) -> Self {
        self.teleport = Some(target);
        self
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTeleport`] for a non-finite destination.
    pub fn build(self) -> Result<PortalDefinition, ConfigError> {
        if let Some(target) = &self.teleport {
            target.validate(&self.id)?;
        }
        Ok(PortalDefinition {
            id: self.id,
            kind: self.kind,
            requirements: Requirements::new(self.region, self.world, self.permission),
            commands: self.commands,
            teleport: self.teleport,
        })
    }
}

/// An empty string means "not set".
fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
