//! Content loaders for reading portal data from files.

pub mod format;
pub mod portals;
pub mod reload;

pub use format::ContentFormat;
pub use portals::PortalLoader;
pub use reload::{ReloadReport, reload};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
