//! World lookup by configured name.

use crate::world::WorldId;

/// Resolves configured world names into the host's live world handles.
///
/// Resolution happens at evaluation time, so a world loaded after the
/// registry was built is still found.
pub trait WorldResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Option<WorldId>;
}
