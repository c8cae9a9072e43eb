//! Content factory for loading everything a battle needs from a directory.

use std::path::{Path, PathBuf};

use tactics_core::GameConfig;

use crate::loaders::{ConfigLoader, LoadResult, ScenarioLoader};
use crate::scenario::ScenarioSpec;

/// Content factory that loads game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── scenarios/
///     └── skirmish.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load `scenarios/{name}.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<ScenarioSpec> {
        let path = self.data_dir.join("scenarios").join(format!("{name}.ron"));
        ScenarioLoader::load(&path)
    }
}
