//! Portal kind enumeration.

/// Kinds of portal a host can report an actor crossing.
///
/// A definition is only eligible for trigger events of its own kind.
/// Parsing is ASCII case-insensitive, so configuration may say `NETHER`,
/// `nether` or `Nether`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PortalKind {
    /// Obsidian frame portal leading between the overworld and the nether.
    Nether,
    /// End portal frame.
    #[strum(to_string = "ender", serialize = "end")]
    Ender,
    /// Any portal the host raises outside of the natural kinds.
    Custom,
}

impl PortalKind {
    /// Iterates every kind in declaration order.
    pub fn all() -> impl Iterator<Item = PortalKind> {
        <Self as strum::IntoEnumIterator>::iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(PortalKind::from_str("NETHER"), Ok(PortalKind::Nether));
        assert_eq!(PortalKind::from_str("Custom"), Ok(PortalKind::Custom));
        assert_eq!(PortalKind::from_str("ENDER"), Ok(PortalKind::Ender));
        assert_eq!(PortalKind::from_str("end"), Ok(PortalKind::Ender));
    }

    #[test]
    fn rejects_unknown_kinds() {
        assert!(PortalKind::from_str("wormhole").is_err());
        assert!(PortalKind::from_str("").is_err());
    }

    #[test]
    fn displays_canonical_name() {
        assert_eq!(PortalKind::Ender.to_string(), "ender");
        assert_eq!(PortalKind::Nether.as_ref(), "nether");
        assert_eq!(PortalKind::all().count(), 3);
    }
}
