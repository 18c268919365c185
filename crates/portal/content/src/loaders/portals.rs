//! Portal definition loader.

use std::path::Path;

use indexmap::IndexMap;
use portal_core::{ConfigError, PortalConfig, PortalRegistry, RegistryBuild};
use ron::extensions::Extensions;

use crate::loaders::{ContentFormat, LoadResult, read_file};

/// Root of a portal document: `Portals.<id>` nodes in document order.
///
/// Nodes stay undecoded here so that a badly shaped portal is rejected on its
/// own. `toml::Value` is the holding type for both formats.
#[derive(Debug, Default, serde::Deserialize)]
struct PortalsDocument {
    #[serde(rename = "Portals", alias = "portals", default)]
    portals: IndexMap<String, toml::Value>,
}

impl PortalsDocument {
    fn into_build(self) -> RegistryBuild {
        let nodes = self.portals.into_iter().map(|(id, node)| {
            let config = decode_node(&id, node);
            (id, config)
        });
        let build = PortalRegistry::from_parsed(nodes);
        tracing::info!(
            loaded = build.registry.len(),
            rejected = build.rejected.len(),
            "portal definitions loaded"
        );
        build
    }
}

fn decode_node(id: &str, node: toml::Value) -> Result<PortalConfig, ConfigError> {
    node.try_into::<PortalConfig>()
        .map_err(|e| ConfigError::Malformed {
            id: id.to_owned(),
            message: e.message().to_owned(),
        })
}

/// Loader for portal definitions from TOML or RON documents.
///
/// Malformed portals, including ones with wrongly typed fields, are skipped
/// and listed in [`RegistryBuild::rejected`]; only a document that cannot be
/// parsed at all is an error.
pub struct PortalLoader;

impl PortalLoader {
    /// Load portal definitions from a `.toml` or `.ron` file.
    pub fn load(path: &Path) -> LoadResult<RegistryBuild> {
        let content = read_file(path)?;
        Self::parse(&content, ContentFormat::from_path(path)?)
            .map_err(|e| anyhow::anyhow!("Failed to load portals from {}: {}", path.display(), e))
    }

    /// Parse portal definitions from a document in the given format.
    pub fn parse(content: &str, format: ContentFormat) -> LoadResult<RegistryBuild> {
        match format {
            ContentFormat::Toml => Self::parse_toml(content),
            ContentFormat::Ron => Self::parse_ron(content),
        }
    }

    /// Parse portal definitions from a TOML document.
    pub fn parse_toml(content: &str) -> LoadResult<RegistryBuild> {
        let document: PortalsDocument = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse portals TOML: {}", e))?;
        Ok(document.into_build())
    }

    /// Parse portal definitions from a RON document.
    ///
    /// Optional fields may be written bare (`world: "world"`) instead of
    /// wrapped in `Some(..)`.
    pub fn parse_ron(content: &str) -> LoadResult<RegistryBuild> {
        let document: PortalsDocument = ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse portals RON: {}", e))?;
        Ok(document.into_build())
    }

    /// Load the portal set bundled with this crate.
    pub fn bundled() -> LoadResult<RegistryBuild> {
        Self::parse_toml(include_str!("../../data/portals.toml"))
    }
}
