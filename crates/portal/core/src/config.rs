//! Raw configuration nodes and load-time validation errors.
//!
//! A [`PortalConfig`] mirrors one `Portals.<id>` section exactly as written by
//! the operator. Nothing here is validated; [`PortalDefinition::from_config`]
//! turns a node into a definition or a [`ConfigError`].
//!
//! [`PortalDefinition::from_config`]: crate::definition::PortalDefinition::from_config

use crate::error::{ErrorSeverity, PortalError};

/// One `Portals.<id>` node.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PortalConfig {
    /// Portal kind name, e.g. `NETHER`.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: Option<String>,
    pub requirements: RequirementsConfig,
    pub actions: ActionsConfig,
}

/// `Portals.<id>.requirements`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RequirementsConfig {
    pub region: Option<String>,
    pub world: Option<String>,
    pub permission: Option<String>,
}

/// `Portals.<id>.actions`
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ActionsConfig {
    pub commands: Vec<String>,
    pub teleport: Option<TeleportConfig>,
}

/// `Portals.<id>.actions.teleport`
///
/// Every field is optional at this level so that a partially written target
/// can be reported by name instead of failing deserialization.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TeleportConfig {
    pub world: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub yaw: Option<f32>,
    pub pitch: Option<f32>,
}

impl TeleportConfig {
    pub const FIELDS: [&'static str; 6] = ["world", "x", "y", "z", "yaw", "pitch"];

    /// Names of the fields that are not set, in schema order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let present = [
            self.world.is_some(),
            self.x.is_some(),
            self.y.is_some(),
            self.z.is_some(),
            self.yaw.is_some(),
            self.pitch.is_some(),
        ];
        Self::FIELDS
            .iter()
            .zip(present)
            .filter(|(_, set)| !set)
            .map(|(name, _)| *name)
            .collect()
    }

    /// True when no field at all is set; the node is then treated as absent.
    pub fn is_empty(&self) -> bool {
        self.missing_fields().len() == Self::FIELDS.len()
    }
}

/// Errors raised while turning configuration into a portal definition.
///
/// Each error is fatal to its own definition only; how the rest of a load
/// reacts is up to the registry build mode.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The `type` key is absent.
    #[error("portal '{id}' has no type")]
    MissingKind { id: String },

    /// The `type` key names no known portal kind.
    #[error("portal '{id}' has unknown type '{value}'")]
    UnknownKind { id: String, value: String },

    /// Some, but not all, teleport fields are set.
    #[error("portal '{id}' teleport target is missing {}", .missing.join(", "))]
    IncompleteTeleport {
        id: String,
        missing: Vec<&'static str>,
    },

    /// A teleport coordinate or angle is NaN or infinite.
    #[error("portal '{id}' teleport field '{field}' is not a finite number")]
    InvalidTeleport { id: String, field: &'static str },

    /// The node does not have the shape of a portal, e.g. a string where a
    /// list of commands is expected.
    #[error("portal '{id}' is malformed: {message}")]
    Malformed { id: String, message: String },
}

impl ConfigError {
    /// Id of the portal this error rejects.
    pub fn portal_id(&self) -> &str {
        match self {
            Self::MissingKind { id }
            | Self::UnknownKind { id, .. }
            | Self::IncompleteTeleport { id, .. }
            | Self::InvalidTeleport { id, .. }
            | Self::Malformed { id, .. } => id,
        }
    }
}

impl PortalError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingKind { .. } => "CONFIG_MISSING_KIND",
            Self::UnknownKind { .. } => "CONFIG_UNKNOWN_KIND",
            Self::IncompleteTeleport { .. } => "CONFIG_INCOMPLETE_TELEPORT",
            Self::InvalidTeleport { .. } => "CONFIG_INVALID_TELEPORT",
            Self::Malformed { .. } => "CONFIG_MALFORMED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_missing_teleport_fields_in_schema_order() {
        let teleport = TeleportConfig {
            world: Some("world".into()),
            x: Some(1.0),
            z: Some(3.0),
            ..TeleportConfig::default()
        };
        assert_eq!(teleport.missing_fields(), vec!["y", "yaw", "pitch"]);
        assert!(!teleport.is_empty());
        assert!(TeleportConfig::default().is_empty());
    }

    #[test]
    fn incomplete_teleport_message_lists_fields() {
        let err = ConfigError::IncompleteTeleport {
            id: "hub".into(),
            missing: vec!["yaw", "pitch"],
        };
        assert_eq!(
            err.to_string(),
            "portal 'hub' teleport target is missing yaw, pitch"
        );
        assert_eq!(err.portal_id(), "hub");
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }
}
