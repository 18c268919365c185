//! Live reload of a running registry.

use std::path::Path;

use portal_core::{ConfigError, SharedRegistry};

use crate::loaders::{LoadResult, PortalLoader};

/// What a reload installed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReloadReport {
    /// Number of portals in the new registry generation.
    pub loaded: usize,
    /// Portals skipped because their configuration was malformed.
    pub rejected: Vec<ConfigError>,
}

/// Reads `path` and swaps the resulting registry into `shared`.
///
/// A file that cannot be read or parsed leaves the current generation in
/// place. Malformed individual portals do not block the swap; they are
/// reported in the returned [`ReloadReport`].
pub fn reload(path: &Path, shared: &SharedRegistry) -> LoadResult<ReloadReport> {
    let build = PortalLoader::load(path)?;
    let report = ReloadReport {
        loaded: build.registry.len(),
        rejected: build.rejected,
    };

    let previous = shared.replace(build.registry)?;
    tracing::info!(
        path = %path.display(),
        previous = previous.len(),
        loaded = report.loaded,
        rejected = report.rejected.len(),
        "portal registry reloaded"
    );

    Ok(report)
}
