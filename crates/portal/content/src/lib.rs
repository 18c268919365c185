//! Data-driven portal definitions and loaders.
//!
//! Operators describe portals in a TOML or RON document under a root
//! `Portals` table keyed by portal id:
//!
//! ```toml
//! [Portals.spawn]
//! type = "NETHER"
//! requirements = { permission = "use.nether" }
//! actions.teleport = { world = "world", x = 0.0, y = 100.0, z = 0.0, yaw = 0.0, pitch = 0.0 }
//! ```
//!
//! Loaders turn such documents into a [`portal_core::PortalRegistry`], skipping
//! and reporting malformed portals, and can swap the result into a running
//! [`portal_core::SharedRegistry`].

pub mod loaders;

pub use loaders::{ContentFormat, LoadResult, PortalLoader, ReloadReport, reload};
