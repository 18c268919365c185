//! Gate evaluation: may this actor use this portal right now?
//!
//! ## Check order
//!
//! 1. Permission - a single lookup in the host's permission system
//! 2. World - identity comparison against the resolved required world
//! 3. Region - a query against the region service, the most expensive step
//!
//! Each check short-circuits, so a portal denied by permission never issues
//! a region query. A check whose requirement is absent always passes.
//!
//! Evaluation only reads from collaborators; it never dispatches, teleports
//! or logs above `trace` for an ordinary denial.

use crate::definition::PortalDefinition;
use crate::env::{
    CommandDispatcher, Env, PermissionChecker, RegionMembership, TeleportService, WorldResolver,
};
use crate::world::{Actor, WorldId};

/// Why a gate stayed closed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DenyReason {
    /// The actor lacks the required permission node.
    MissingPermission(String),
    /// The actor is in a different world than the one required.
    WrongWorld { required: WorldId, actual: WorldId },
    /// No region containing the actor matches the required region id.
    OutsideRegion(String),
    /// A region is required but the host has no region service installed.
    RegionServiceUnavailable(String),
}

/// Result of a gate check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    Open,
    Denied(DenyReason),
}

impl GateOutcome {
    pub fn is_open(&self) -> bool {
        matches!(self, GateOutcome::Open)
    }

    pub fn deny_reason(&self) -> Option<&DenyReason> {
        match self {
            GateOutcome::Open => None,
            GateOutcome::Denied(reason) => Some(reason),
        }
    }
}

/// Decides whether a portal's requirements hold for an actor.
pub struct GateEvaluator;

impl GateEvaluator {
    /// Returns true if every configured requirement of `definition` is met.
    pub fn evaluate<P, W, R, C, T>(
        actor: &Actor,
        definition: &PortalDefinition,
        env: &Env<'_, P, W, R, C, T>,
    ) -> bool
    where
        P: PermissionChecker + ?Sized,
        W: WorldResolver + ?Sized,
        R: RegionMembership + ?Sized,
        C: CommandDispatcher + ?Sized,
        T: TeleportService + ?Sized,
    {
        Self::check(actor, definition, env).is_open()
    }

    /// Like [`evaluate`](Self::evaluate), but reports which check failed.
    pub fn check<P, W, R, C, T>(
        actor: &Actor,
        definition: &PortalDefinition,
        env: &Env<'_, P, W, R, C, T>,
    ) -> GateOutcome
    where
        P: PermissionChecker + ?Sized,
        W: WorldResolver + ?Sized,
        R: RegionMembership + ?Sized,
        C: CommandDispatcher + ?Sized,
        T: TeleportService + ?Sized,
    {
        let outcome = check_permission(actor, definition, env.permissions())
            .and_then(|| check_world(actor, definition, env.worlds()))
            .and_then(|| check_region(actor, definition, env.regions()));

        if let GateOutcome::Denied(reason) = &outcome {
            tracing::trace!(
                portal = definition.id(),
                actor = %actor.name,
                ?reason,
                "portal gate denied"
            );
        }
        outcome
    }
}

impl GateOutcome {
    fn and_then(self, next: impl FnOnce() -> GateOutcome) -> GateOutcome {
        match self {
            GateOutcome::Open => next(),
            denied => denied,
        }
    }
}

fn check_permission<P>(actor: &Actor, definition: &PortalDefinition, permissions: &P) -> GateOutcome
where
    P: PermissionChecker + ?Sized,
{
    match definition.required_permission() {
        Some(permission) if !permissions.has(actor, permission) => {
            GateOutcome::Denied(DenyReason::MissingPermission(permission.to_owned()))
        }
        _ => GateOutcome::Open,
    }
}

fn check_world<W>(actor: &Actor, definition: &PortalDefinition, worlds: &W) -> GateOutcome
where
    W: WorldResolver + ?Sized,
{
    let Some(name) = definition.required_world() else {
        return GateOutcome::Open;
    };

    // An unresolvable world name places no constraint.
    let Some(required) = worlds.resolve(name) else {
        tracing::warn!(
            portal = definition.id(),
            world = name,
            "required world is not loaded; ignoring world requirement"
        );
        return GateOutcome::Open;
    };

    let actual = actor.world();
    if actual == required {
        GateOutcome::Open
    } else {
        GateOutcome::Denied(DenyReason::WrongWorld { required, actual })
    }
}

fn check_region<R>(actor: &Actor, definition: &PortalDefinition, regions: Option<&R>) -> GateOutcome
where
    R: RegionMembership + ?Sized,
{
    let Some(region) = definition.required_region() else {
        return GateOutcome::Open;
    };

    let Some(regions) = regions else {
        tracing::warn!(
            portal = definition.id(),
            region,
            "portal requires a region but no region service is installed"
        );
        return GateOutcome::Denied(DenyReason::RegionServiceUnavailable(region.to_owned()));
    };

    if regions.contains(actor.world(), actor.location.block(), region) {
        GateOutcome::Open
    } else {
        GateOutcome::Denied(DenyReason::OutsideRegion(region.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::PortalKind;
    use crate::testing::{HostFixture, actor_at};

    #[test]
    fn unconstrained_gate_is_open() {
        let host = HostFixture::new();
        let definition = PortalDefinition::builder("free", PortalKind::Nether)
            .build()
            .expect("valid portal");

        let outcome = GateEvaluator::check(&actor_at(HostFixture::OVERWORLD), &definition, &host.env());
        assert_eq!(outcome, GateOutcome::Open);
    }

    #[test]
    fn permission_denial_skips_region_query() {
        let host = HostFixture::new();
        host.regions.place(HostFixture::OVERWORLD, "arena");
        let definition = PortalDefinition::builder("vip", PortalKind::Nether)
            .permission("use.vip")
            .region("arena")
            .build()
            .expect("valid portal");

        let outcome = GateEvaluator::check(&actor_at(HostFixture::OVERWORLD), &definition, &host.env());

        assert_eq!(
            outcome.deny_reason(),
            Some(&DenyReason::MissingPermission("use.vip".into()))
        );
        assert_eq!(host.regions.query_count(), 0);
    }

    #[test]
    fn wrong_world_is_denied() {
        let host = HostFixture::new();
        let definition = PortalDefinition::builder("nether_only", PortalKind::Nether)
            .world("world_nether")
            .build()
            .expect("valid portal");

        let outcome = GateEvaluator::check(&actor_at(HostFixture::OVERWORLD), &definition, &host.env());
        assert_eq!(
            outcome,
            GateOutcome::Denied(DenyReason::WrongWorld {
                required: HostFixture::NETHER,
                actual: HostFixture::OVERWORLD,
            })
        );
    }

    #[test]
    fn unloaded_required_world_is_ignored() {
        let host = HostFixture::new();
        let definition = PortalDefinition::builder("ghost", PortalKind::Nether)
            .world("not_loaded")
            .build()
            .expect("valid portal");

        assert!(GateEvaluator::evaluate(
            &actor_at(HostFixture::OVERWORLD),
            &definition,
            &host.env()
        ));
    }

    #[test]
    fn region_match_ignores_case() {
        let host = HostFixture::new();
        host.regions.place(HostFixture::OVERWORLD, "arena1");
        let definition = PortalDefinition::builder("arena", PortalKind::Custom)
            .region("Arena1")
            .build()
            .expect("valid portal");

        assert!(GateEvaluator::evaluate(
            &actor_at(HostFixture::OVERWORLD),
            &definition,
            &host.env()
        ));
        assert_eq!(host.regions.query_count(), 1);
    }

    #[test]
    fn region_required_without_service_is_denied() {
        let host = HostFixture::new();
        let definition = PortalDefinition::builder("arena", PortalKind::Custom)
            .region("arena")
            .build()
            .expect("valid portal");

        let outcome = GateEvaluator::check(
            &actor_at(HostFixture::OVERWORLD),
            &definition,
            &host.env_without_regions(),
        );
        assert_eq!(
            outcome,
            GateOutcome::Denied(DenyReason::RegionServiceUnavailable("arena".into()))
        );
    }
}
