//! Portal service: the entry point a host calls on every portal trigger.
//!
//! Candidate selection is first-match in registry order. The first
//! definition of the triggered kind whose gate opens is applied and no other
//! definition is looked at.

use crate::action::{ActionError, ActionExecutor};
use crate::definition::PortalDefinition;
use crate::env::{
    CommandDispatcher, Env, PermissionChecker, RegionMembership, TeleportService, WorldResolver,
};
use crate::error::{ErrorSeverity, PortalError};
use crate::gate::GateEvaluator;
use crate::kind::PortalKind;
use crate::registry::{RegistryError, SharedRegistry};
use crate::world::Actor;

/// Errors surfaced by [`PortalService::try_use_portal`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Action(#[from] ActionError),
}

impl PortalError for ServiceError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Registry(err) => err.severity(),
            Self::Action(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Registry(err) => err.error_code(),
            Self::Action(err) => err.error_code(),
        }
    }
}

/// Applies the first candidate of `kind` whose gate opens.
///
/// Returns `Ok(true)` if a portal fired (the host should cancel its default
/// portal behavior) and `Ok(false)` if no gate opened, in which case no
/// command was dispatched and no teleport happened.
///
/// # Errors
///
/// Propagates the [`ActionError`] of the portal that fired.
pub fn try_use_portal<'d, I, P, W, R, C, T>(
    actor: &Actor,
    kind: PortalKind,
    candidates: I,
    env: &Env<'_, P, W, R, C, T>,
) -> Result<bool, ActionError>
where
    I: IntoIterator<Item = &'d PortalDefinition>,
    P: PermissionChecker + ?Sized,
    W: WorldResolver + ?Sized,
    R: RegionMembership + ?Sized,
    C: CommandDispatcher + ?Sized,
    T: TeleportService + ?Sized,
{
    let selected = candidates
        .into_iter()
        .filter(|definition| definition.kind() == kind)
        .find(|definition| GateEvaluator::evaluate(actor, definition, env));

    match selected {
        Some(definition) => ActionExecutor::apply(actor, definition, env),
        None => Ok(false),
    }
}

/// Composition root binding the shared registry to portal triggers.
#[derive(Clone, Debug, Default)]
pub struct PortalService {
    registry: SharedRegistry,
}

impl PortalService {
    pub fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    /// Handle to the registry this service reads; reload through it.
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    /// Handles one portal trigger against the current registry generation.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Registry`] if the registry lock is poisoned
    /// - [`ServiceError::Action`] if the selected portal's actions fail
    pub fn try_use_portal<P, W, R, C, T>(
        &self,
        actor: &Actor,
        kind: PortalKind,
        env: &Env<'_, P, W, R, C, T>,
    ) -> Result<bool, ServiceError>
    where
        P: PermissionChecker + ?Sized,
        W: WorldResolver + ?Sized,
        R: RegionMembership + ?Sized,
        C: CommandDispatcher + ?Sized,
        T: TeleportService + ?Sized,
    {
        let registry = self.registry.snapshot()?;
        try_use_portal(actor, kind, registry.iter(), env)
            .inspect_err(|err| {
                tracing::warn!(
                    portal = err.portal_id(),
                    actor = %actor.name,
                    code = err.error_code(),
                    recoverable = err.severity().is_recoverable(),
                    "portal actions failed: {err}"
                );
            })
            .map_err(ServiceError::from)
    }
}
