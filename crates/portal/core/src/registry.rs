//! Portal registry: every configured definition, in configuration order.
//!
//! A registry is built once and never edited. Reloading builds a new
//! registry and swaps it into a [`SharedRegistry`]; evaluations that already
//! hold a snapshot keep seeing the generation they started with.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::config::{ConfigError, PortalConfig};
use crate::definition::PortalDefinition;
use crate::error::{ErrorSeverity, PortalError};
use crate::kind::PortalKind;

/// Errors raised while assembling or sharing a registry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Two definitions share an id.
    #[error("duplicate portal id '{0}'")]
    DuplicateId(String),

    /// A writer panicked while holding the registry lock.
    #[error("portal registry lock poisoned: {0}")]
    LockPoisoned(String),
}

impl PortalError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DuplicateId(_) => ErrorSeverity::Validation,
            Self::LockPoisoned(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateId(_) => "REGISTRY_DUPLICATE_ID",
            Self::LockPoisoned(_) => "REGISTRY_LOCK_POISONED",
        }
    }
}

/// Outcome of a skip-and-report build.
#[derive(Clone, Debug, Default)]
pub struct RegistryBuild {
    pub registry: PortalRegistry,
    /// Definitions left out of the registry, in configuration order.
    pub rejected: Vec<ConfigError>,
}

impl RegistryBuild {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Immutable, ordered collection of portal definitions keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PortalRegistry {
    definitions: Vec<PortalDefinition>,
    index: HashMap<String, usize>,
}

impl PortalRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a registry from ready definitions, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateId`] if two definitions share an id.
    pub fn new(definitions: Vec<PortalDefinition>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(definitions.len());
        for (position, definition) in definitions.iter().enumerate() {
            if index.insert(definition.id().to_owned(), position).is_some() {
                return Err(RegistryError::DuplicateId(definition.id().to_owned()));
            }
        }
        Ok(Self { definitions, index })
    }

    /// Builds a registry from configuration nodes, skipping malformed ones.
    ///
    /// Every rejected node is logged and returned in
    /// [`RegistryBuild::rejected`]; the remaining definitions keep their
    /// configuration order. A repeated id keeps its first occurrence.
    pub fn from_configs<I, S>(configs: I) -> RegistryBuild
    where
        I: IntoIterator<Item = (S, PortalConfig)>,
        S: Into<String>,
    {
        Self::from_parsed(configs.into_iter().map(|(id, config)| (id, Ok(config))))
    }

    /// Like [`from_configs`](Self::from_configs), for nodes that were decoded
    /// one at a time. A node that failed to decode carries its
    /// [`ConfigError`] and is rejected in place.
    pub fn from_parsed<I, S>(nodes: I) -> RegistryBuild
    where
        I: IntoIterator<Item = (S, Result<PortalConfig, ConfigError>)>,
        S: Into<String>,
    {
        let mut registry = Self::empty();
        let mut rejected = Vec::new();

        for (id, node) in nodes {
            let id = id.into();
            if registry.contains(&id) {
                tracing::warn!(portal = %id, "duplicate portal id; keeping first definition");
                continue;
            }
            match node.and_then(|config| PortalDefinition::from_config(id, &config)) {
                Ok(definition) => registry.push(definition),
                Err(err) => {
                    tracing::warn!(
                        portal = err.portal_id(),
                        code = err.error_code(),
                        severity = err.severity().as_str(),
                        "skipping portal: {err}"
                    );
                    rejected.push(err);
                }
            }
        }

        RegistryBuild { registry, rejected }
    }

    /// Builds a registry from configuration nodes, failing on the first
    /// malformed one.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered.
    pub fn from_configs_strict<I, S>(configs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, PortalConfig)>,
        S: Into<String>,
    {
        let mut registry = Self::empty();
        for (id, config) in configs {
            let id = id.into();
            if registry.contains(&id) {
                continue;
            }
            registry.push(PortalDefinition::from_config(id, &config)?);
        }
        Ok(registry)
    }

    fn push(&mut self, definition: PortalDefinition) {
        self.index
            .insert(definition.id().to_owned(), self.definitions.len());
        self.definitions.push(definition);
    }

    pub fn get(&self, id: &str) -> Option<&PortalDefinition> {
        self.index.get(id).map(|&position| &self.definitions[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All definitions in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &PortalDefinition> {
        self.definitions.iter()
    }

    /// Definitions of one kind, in registry order.
    pub fn of_kind(&self, kind: PortalKind) -> impl Iterator<Item = &PortalDefinition> {
        self.definitions
            .iter()
            .filter(move |definition| definition.kind() == kind)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(PortalDefinition::id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<'a> IntoIterator for &'a PortalRegistry {
    type Item = &'a PortalDefinition;
    type IntoIter = std::slice::Iter<'a, PortalDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.iter()
    }
}

/// Cloneable handle to the current registry generation.
///
/// - `Arc<PortalRegistry>` snapshots for readers (one pointer copy per event)
/// - `RwLock` held only for the pointer read or swap, never during evaluation
#[derive(Clone, Debug, Default)]
pub struct SharedRegistry {
    current: Arc<RwLock<Arc<PortalRegistry>>>,
}

impl SharedRegistry {
    pub fn new(registry: PortalRegistry) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(registry))),
        }
    }

    /// Returns the current generation.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::LockPoisoned`] if a writer panicked mid-swap.
    pub fn snapshot(&self) -> Result<Arc<PortalRegistry>, RegistryError> {
        let current = self
            .current
            .read()
            .map_err(|e| RegistryError::LockPoisoned(e.to_string()))?;
        Ok(Arc::clone(&*current))
    }

    /// Installs `registry` as the current generation and returns the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::LockPoisoned`] if a writer panicked mid-swap.
    pub fn replace(&self, registry: PortalRegistry) -> Result<Arc<PortalRegistry>, RegistryError> {
        let next = Arc::new(registry);
        let mut current = self
            .current
            .write()
            .map_err(|e| RegistryError::LockPoisoned(e.to_string()))?;
        Ok(std::mem::replace(&mut *current, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ActionsConfig, TeleportConfig};

    fn config(kind: &str) -> PortalConfig {
        PortalConfig {
            kind: Some(kind.into()),
            ..PortalConfig::default()
        }
    }

    fn definition(id: &str, kind: PortalKind) -> PortalDefinition {
        PortalDefinition::builder(id, kind)
            .build()
            .expect("valid portal")
    }

    #[test]
    fn skips_malformed_definitions_and_keeps_order() {
        let partial_teleport = PortalConfig {
            actions: ActionsConfig {
                commands: Vec::new(),
                teleport: Some(TeleportConfig {
                    world: Some("world".into()),
                    ..TeleportConfig::default()
                }),
            },
            ..config("nether")
        };

        let build = PortalRegistry::from_configs([
            ("first", config("NETHER")),
            ("broken", config("WORMHOLE")),
            ("second", config("ender")),
            ("half", partial_teleport),
            ("third", config("NETHER")),
        ]);

        assert_eq!(
            build.registry.ids().collect::<Vec<_>>(),
            ["first", "second", "third"]
        );
        let rejected: Vec<_> = build.rejected.iter().map(ConfigError::portal_id).collect();
        assert_eq!(rejected, ["broken", "half"]);
        assert!(!build.is_clean());
    }

    #[test]
    fn strict_build_fails_on_first_malformed_definition() {
        let err = PortalRegistry::from_configs_strict([
            ("ok", config("NETHER")),
            ("broken", config("WORMHOLE")),
            ("blank", PortalConfig::default()),
        ])
        .unwrap_err();
        assert_eq!(err.portal_id(), "broken");
    }

    #[test]
    fn undecodable_node_is_rejected_in_document_order() {
        let build = PortalRegistry::from_parsed([
            ("first", Ok(config("NETHER"))),
            (
                "shapeless",
                Err(ConfigError::Malformed {
                    id: "shapeless".into(),
                    message: "invalid type: string \"spawn\", expected a sequence".into(),
                }),
            ),
            ("unknown", Ok(config("WORMHOLE"))),
            ("second", Ok(config("ENDER"))),
        ]);

        assert_eq!(
            build.registry.ids().collect::<Vec<_>>(),
            ["first", "second"]
        );
        let rejected: Vec<_> = build
            .rejected
            .iter()
            .map(|err| (err.portal_id(), err.error_code()))
            .collect();
        assert_eq!(
            rejected,
            [
                ("shapeless", "CONFIG_MALFORMED"),
                ("unknown", "CONFIG_UNKNOWN_KIND")
            ]
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = PortalRegistry::new(vec![
            definition("a", PortalKind::Nether),
            definition("a", PortalKind::Ender),
        ])
        .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId("a".into()));
    }

    #[test]
    fn of_kind_filters_in_registry_order() {
        let registry = PortalRegistry::new(vec![
            definition("n1", PortalKind::Nether),
            definition("e1", PortalKind::Ender),
            definition("n2", PortalKind::Nether),
        ])
        .expect("unique ids");

        let nether: Vec<_> = registry
            .of_kind(PortalKind::Nether)
            .map(PortalDefinition::id)
            .collect();
        assert_eq!(nether, ["n1", "n2"]);
        assert_eq!(registry.get("e1").map(PortalDefinition::kind), Some(PortalKind::Ender));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn replace_swaps_generation_without_touching_snapshots() {
        let shared = SharedRegistry::new(
            PortalRegistry::new(vec![definition("old", PortalKind::Nether)]).expect("unique ids"),
        );
        let before = shared.snapshot().expect("snapshot");

        let previous = shared
            .replace(PortalRegistry::new(vec![definition("new", PortalKind::Nether)]).expect("unique ids"))
            .expect("replace");

        assert!(Arc::ptr_eq(&before, &previous));
        assert!(before.contains("old"));
        let after = shared.snapshot().expect("snapshot");
        assert!(after.contains("new"));
        assert!(!after.contains("old"));
    }
}
