//! Content loaders for reading data files.
//!
//! TOML carries tunables ([`ConfigLoader`]); RON carries scenario layouts
//! ([`ScenarioLoader`]). [`ContentFactory`] ties both to a data directory.

pub mod config;
pub mod factory;
pub mod scenario;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use scenario::{ItemDef, NamedItem, PlacementDef, Scenario, ScenarioDef, ScenarioLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
