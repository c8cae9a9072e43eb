//! Game configuration loader.

use std::path::Path;

use tactics_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing tables and keys fall back to [`GameConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if !(0.0..=1.0).contains(&config.ai.aggressiveness) {
            anyhow::bail!(
                "AI aggressiveness must be within [0, 1], got {}",
                config.ai.aggressiveness
            );
        }
        Ok(config)
    }
}
