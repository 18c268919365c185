//! `PortalConfig` against the operator-facing configuration schema.

use portal_core::{ConfigError, PortalConfig, PortalDefinition, PortalKind, Position};

#[test]
fn deserializes_full_portal_node() {
    let node: PortalConfig = toml::from_str(
        r#"
        type = "NETHER"

        [requirements]
        region = "Arena1"
        world = "world"
        permission = "use.nether"

        [actions]
        commands = ["say entering", "effect give @s speed 5"]

        [actions.teleport]
        world = "world_nether"
        x = 10
        y = 70.5
        z = -4
        yaw = 180
        pitch = 0
        "#,
    )
    .expect("schema parses");

    let definition = PortalDefinition::from_config("arena", &node).expect("valid portal");
    assert_eq!(definition.kind(), PortalKind::Nether);
    assert_eq!(definition.required_region(), Some("Arena1"));
    assert_eq!(definition.required_world(), Some("world"));
    assert_eq!(definition.required_permission(), Some("use.nether"));
    assert_eq!(definition.commands().len(), 2);

    let target = definition.teleport().expect("teleport target");
    assert_eq!(target.world(), "world_nether");
    assert_eq!(target.position(), Position::new(10.0, 70.5, -4.0));
    assert_eq!(target.orientation().yaw, 180.0);
}

#[test]
fn type_only_node_is_a_bare_override() {
    let node: PortalConfig = toml::from_str(r#"type = "custom""#).expect("schema parses");
    let definition = PortalDefinition::from_config("bare", &node).expect("valid portal");

    assert_eq!(definition.kind(), PortalKind::Custom);
    assert!(definition.requirements().is_unconstrained());
    assert!(definition.commands().is_empty());
    assert!(definition.teleport().is_none());
}

#[test]
fn teleport_without_coordinates_is_rejected_at_load() {
    let node: PortalConfig = toml::from_str(
        r#"
        type = "ENDER"
        actions.teleport.world = "world"
        "#,
    )
    .expect("schema parses");

    let err = PortalDefinition::from_config("partial", &node).unwrap_err();
    assert_eq!(
        err,
        ConfigError::IncompleteTeleport {
            id: "partial".into(),
            missing: vec!["x", "y", "z", "yaw", "pitch"],
        }
    );
}
