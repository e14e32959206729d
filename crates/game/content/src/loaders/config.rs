//! Content configuration loader.

use std::path::Path;

use crate::config::ContentConfig;
use crate::loaders::{LoadResult, read_file};

/// Loader for content configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing sections and fields keep their defaults.
    pub fn load(path: &Path) -> LoadResult<ContentConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ContentConfig> {
        let config: ContentConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        if config.hero.capacity_per_strength < 0.0 || config.monster.capacity < 0.0 {
            anyhow::bail!("capacities in config must not be negative");
        }
        Ok(config)
    }
}
