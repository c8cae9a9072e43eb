//! Scenario loader.

use std::path::Path;

use tactics_core::GameState;

use crate::loaders::{LoadResult, read_file};
use crate::scenario::ScenarioSpec;

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario description from a RON file.
    pub fn load(path: &Path) -> LoadResult<ScenarioSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ScenarioSpec> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))
    }

    /// Load a scenario and build its initial state.
    pub fn load_state(path: &Path) -> LoadResult<GameState> {
        let scenario = Self::load(path)?;
        scenario.build().map_err(|e| {
            anyhow::anyhow!("Failed to build scenario '{}': {}", scenario.name, e)
        })
    }
}
