//! Portal override rules: who may use a configured portal, and what it does.
//!
//! `portal-core` holds the rule engine only. Hosts hand it an [`Actor`]
//! snapshot, the [`PortalKind`] that was triggered, and an [`Env`] of host
//! services; the [`PortalService`] picks the first matching definition whose
//! gate opens and applies its actions. Configuration arrives as plain
//! [`PortalConfig`] values; reading files is left to `portal-content`.
pub mod action;
pub mod config;
pub mod definition;
pub mod env;
pub mod error;
pub mod gate;
pub mod kind;
pub mod registry;
pub mod service;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod world;

pub use action::{ActionError, ActionExecutor};
pub use config::{ActionsConfig, ConfigError, PortalConfig, RequirementsConfig, TeleportConfig};
pub use definition::{PortalDefinition, PortalDefinitionBuilder, Requirements, TeleportTarget};
pub use env::{
    CommandDispatcher, Env, HostEnv, PermissionChecker, RegionMembership, TeleportService,
    WorldResolver,
};
pub use error::{ErrorSeverity, HostError, PortalError};
pub use gate::{DenyReason, GateEvaluator, GateOutcome};
pub use kind::PortalKind;
pub use registry::{PortalRegistry, RegistryBuild, RegistryError, SharedRegistry};
pub use service::{PortalService, ServiceError, try_use_portal};
pub use world::{Actor, ActorId, BlockPoint, Location, Orientation, Position, WorldId};
