//! Supported document formats.

use std::path::Path;

use crate::loaders::LoadResult;

/// Document format, chosen from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentFormat {
    Toml,
    Ron,
}

impl ContentFormat {
    /// Picks the format for `path` from its extension (`.toml` or `.ron`, any case).
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(anyhow::anyhow!(
                "Unsupported portal file {}: expected a .toml or .ron extension",
                path.display()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(
            ContentFormat::from_path(Path::new("portals.toml")).ok(),
            Some(ContentFormat::Toml)
        );
        assert_eq!(
            ContentFormat::from_path(Path::new("config/Portals.RON")).ok(),
            Some(ContentFormat::Ron)
        );
        assert!(ContentFormat::from_path(Path::new("config.yml")).is_err());
        assert!(ContentFormat::from_path(Path::new("portals")).is_err());
    }
}
