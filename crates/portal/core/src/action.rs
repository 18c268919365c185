//! Action execution: the effects of a portal whose gate opened.
//!
//! Commands are dispatched first, in configuration order, then the actor is
//! teleported. Nothing is rolled back: when a step fails, the steps before
//! it have already happened and the error is returned to the caller.

use crate::definition::PortalDefinition;
use crate::env::{
    CommandDispatcher, Env, PermissionChecker, RegionMembership, TeleportService, WorldResolver,
};
use crate::error::{ErrorSeverity, HostError, PortalError};
use crate::world::{Actor, Location};

/// Errors raised while applying a portal's actions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The host failed to dispatch a command.
    #[error("portal '{portal}' failed to dispatch '{command}': {source}")]
    CommandFailed {
        portal: String,
        command: String,
        #[source]
        source: HostError,
    },

    /// The teleport destination names a world the host does not know.
    #[error("portal '{portal}' teleport world '{world}' is not loaded")]
    UnresolvedWorld { portal: String, world: String },

    /// The host failed to move the actor.
    #[error("portal '{portal}' failed to teleport actor: {source}")]
    TeleportFailed {
        portal: String,
        #[source]
        source: HostError,
    },
}

impl ActionError {
    pub fn portal_id(&self) -> &str {
        match self {
            Self::CommandFailed { portal, .. }
            | Self::UnresolvedWorld { portal, .. }
            | Self::TeleportFailed { portal, .. } => portal,
        }
    }
}

impl PortalError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CommandFailed { .. } => "ACTION_COMMAND_FAILED",
            Self::UnresolvedWorld { .. } => "ACTION_UNRESOLVED_WORLD",
            Self::TeleportFailed { .. } => "ACTION_TELEPORT_FAILED",
        }
    }
}

/// Applies a portal's configured effects to an actor.
pub struct ActionExecutor;

impl ActionExecutor {
    /// Dispatches the portal's commands, then teleports the actor if a
    /// destination is configured.
    ///
    /// The caller must already have opened the gate. A command the host
    /// declines silently does not stop the sequence.
    ///
    /// Returns `Ok(true)`: the portal fired and the host should cancel its
    /// default behavior.
    ///
    /// # Errors
    ///
    /// - [`ActionError::CommandFailed`] if a dispatch errors; later commands
    ///   and the teleport are not attempted.
    /// - [`ActionError::UnresolvedWorld`] if the destination world is not
    ///   loaded; the commands have already run.
    /// - [`ActionError::TeleportFailed`] if the host rejects the move.
    pub fn apply<P, W, R, C, T>(
        actor: &Actor,
        definition: &PortalDefinition,
        env: &Env<'_, P, W, R, C, T>,
    ) -> Result<bool, ActionError>
    where
        P: PermissionChecker + ?Sized,
        W: WorldResolver + ?Sized,
        R: RegionMembership + ?Sized,
        C: CommandDispatcher + ?Sized,
        T: TeleportService + ?Sized,
    {
        dispatch_commands(actor, definition, env.commands())?;

        if let Some(target) = definition.teleport() {
            let world = env.worlds().resolve(target.world()).ok_or_else(|| {
                ActionError::UnresolvedWorld {
                    portal: definition.id().to_owned(),
                    world: target.world().to_owned(),
                }
            })?;
            let destination = Location::new(world, target.position(), target.orientation());

            env.teleport()
                .teleport(actor, &destination)
                .map_err(|source| ActionError::TeleportFailed {
                    portal: definition.id().to_owned(),
                    source,
                })?;
        }

        tracing::debug!(
            portal = definition.id(),
            actor = %actor.name,
            commands = definition.commands().len(),
            teleported = definition.teleport().is_some(),
            "portal fired"
        );
        Ok(true)
    }
}

fn dispatch_commands<C>(
    actor: &Actor,
    definition: &PortalDefinition,
    commands: &C,
) -> Result<(), ActionError>
where
    C: CommandDispatcher + ?Sized,
{
    for command in definition.commands() {
        let accepted = commands
            .dispatch(actor, command)
            .map_err(|source| ActionError::CommandFailed {
                portal: definition.id().to_owned(),
                command: command.clone(),
                source,
            })?;

        if !accepted {
            tracing::debug!(
                portal = definition.id(),
                actor = %actor.name,
                command = command.as_str(),
                "host declined portal command"
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::TeleportTarget;
    use crate::kind::PortalKind;
    use crate::testing::{HostCall, HostFixture, actor_at};
    use crate::world::{Orientation, Position};

    fn spawn_target() -> TeleportTarget {
        TeleportTarget::new(
            "world",
            Position::new(0.0, 100.0, 0.0),
            Orientation::new(0.0, 0.0),
        )
    }

    #[test]
    fn commands_run_in_order_before_teleport() {
        let host = HostFixture::new();
        let actor = actor_at(HostFixture::NETHER);
        let definition = PortalDefinition::builder("hub", PortalKind::Nether)
            .command("say leaving")
            .command("give @s compass")
            .teleport(spawn_target())
            .build()
            .expect("valid portal");

        let fired = ActionExecutor::apply(&actor, &definition, &host.env()).expect("apply");

        assert!(fired);
        assert_eq!(
            host.calls(),
            vec![
                HostCall::Dispatch(actor.id, "say leaving".into()),
                HostCall::Dispatch(actor.id, "give @s compass".into()),
                HostCall::Teleport(
                    actor.id,
                    Location::new(
                        HostFixture::OVERWORLD,
                        Position::new(0.0, 100.0, 0.0),
                        Orientation::new(0.0, 0.0)
                    )
                ),
            ]
        );
    }

    #[test]
    fn declined_command_still_reaches_teleport() {
        let host = HostFixture::new();
        host.commands.decline("warp nowhere");
        let actor = actor_at(HostFixture::NETHER);
        let definition = PortalDefinition::builder("hub", PortalKind::Nether)
            .command("warp nowhere")
            .teleport(spawn_target())
            .build()
            .expect("valid portal");

        assert_eq!(ActionExecutor::apply(&actor, &definition, &host.env()), Ok(true));
        assert_eq!(host.teleports().len(), 1);
    }

    #[test]
    fn failing_command_stops_the_sequence() {
        let host = HostFixture::new();
        host.commands.fail("explode");
        let actor = actor_at(HostFixture::NETHER);
        let definition = PortalDefinition::builder("hub", PortalKind::Nether)
            .command("explode")
            .command("say never")
            .teleport(spawn_target())
            .build()
            .expect("valid portal");

        let err = ActionExecutor::apply(&actor, &definition, &host.env()).unwrap_err();

        assert_eq!(err.error_code(), "ACTION_COMMAND_FAILED");
        assert_eq!(host.dispatches(), vec!["explode".to_string()]);
        assert!(host.teleports().is_empty());
    }

    #[test]
    fn unresolved_destination_is_reported_after_commands() {
        let host = HostFixture::new();
        let actor = actor_at(HostFixture::OVERWORLD);
        let definition = PortalDefinition::builder("lost", PortalKind::Ender)
            .command("say bye")
            .teleport(TeleportTarget::new(
                "unloaded",
                Position::ORIGIN,
                Orientation::default(),
            ))
            .build()
            .expect("valid portal");

        let err = ActionExecutor::apply(&actor, &definition, &host.env()).unwrap_err();

        assert_eq!(
            err,
            ActionError::UnresolvedWorld {
                portal: "lost".into(),
                world: "unloaded".into()
            }
        );
        assert_eq!(host.dispatches(), vec!["say bye".to_string()]);
        assert!(host.teleports().is_empty());
    }

    #[test]
    fn teleport_failure_propagates() {
        let host = HostFixture::new();
        host.teleport.fail_with("actor is mounted");
        let actor = actor_at(HostFixture::OVERWORLD);
        let definition = PortalDefinition::builder("hub", PortalKind::Nether)
            .teleport(spawn_target())
            .build()
            .expect("valid portal");

        let err = ActionExecutor::apply(&actor, &definition, &host.env()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "portal 'hub' failed to teleport actor: actor is mounted"
        );
    }
}
