//! Runtime configuration structures and loaders.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::repository::SnapshotFormat;

/// Settings for driving battles outside the core rules.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    /// Seed for combat rolls; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Overrides the AI profile's aggressiveness, clamped to `[0, 1]`.
    pub ai_aggressiveness: Option<f32>,
    /// Pause between automated units, purely cosmetic.
    pub turn_delay: Duration,
    pub save_data_dir: Option<PathBuf>,
    pub save_format: SnapshotFormat,
    /// Turn cap after which an automated battle is abandoned.
    pub max_turns: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            ai_aggressiveness: None,
            turn_delay: Self::DEFAULT_TURN_DELAY,
            save_data_dir: None,
            save_format: SnapshotFormat::default(),
            max_turns: Self::DEFAULT_MAX_TURNS,
        }
    }
}

impl RuntimeConfig {
    pub const DEFAULT_TURN_DELAY: Duration = Duration::from_millis(500);
    pub const DEFAULT_MAX_TURNS: u32 = 100;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GAME_SEED` - Seed for combat rolls (default: entropy)
    /// - `AI_AGGRESSIVENESS` - AI aggressiveness in `[0, 1]` (default: profile value)
    /// - `TURN_DELAY_MS` - Delay between automated units (default: 500)
    /// - `SAVE_DATA_DIR` - Directory for save slots (default: platform-specific)
    /// - `SAVE_FORMAT` - `json` or `binary` (default: json)
    /// - `MAX_TURNS` - Turn cap for automated battles (default: 100)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.seed = read_var(&lookup, "GAME_SEED");

        config.ai_aggressiveness =
            read_var::<f32, _>(&lookup, "AI_AGGRESSIVENESS").map(|value| value.clamp(0.0, 1.0));

        if let Some(millis) = read_var::<u64, _>(&lookup, "TURN_DELAY_MS") {
            config.turn_delay = Duration::from_millis(millis);
        }

        config.save_data_dir = lookup("SAVE_DATA_DIR").map(PathBuf::from);

        if let Some(format) = read_var(&lookup, "SAVE_FORMAT") {
            config.save_format = format;
        }

        if let Some(turns) = read_var::<u32, _>(&lookup, "MAX_TURNS") {
            config.max_turns = turns.max(1);
        }

        config
    }

    /// Save directory, falling back to the platform data directory.
    pub fn save_dir(&self) -> PathBuf {
        self.save_data_dir.clone().unwrap_or_else(default_save_dir)
    }
}

/// Platform-specific directory for save slots.
///
/// - Linux: `~/.local/share/hex-tactics/saves`
/// - macOS: `~/Library/Application Support/hex-tactics/saves`
/// - Fallback: `./save_data`
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "hex-tactics")
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn read_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> RuntimeConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        RuntimeConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        assert_eq!(config_from(&[]), RuntimeConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            ("GAME_SEED", "42"),
            ("AI_AGGRESSIVENESS", "1.7"),
            ("TURN_DELAY_MS", "0"),
            ("SAVE_DATA_DIR", "/tmp/saves"),
            ("SAVE_FORMAT", "Binary"),
            ("MAX_TURNS", "0"),
        ]);

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.ai_aggressiveness, Some(1.0));
        assert_eq!(config.turn_delay, Duration::ZERO);
        assert_eq!(config.save_dir(), PathBuf::from("/tmp/saves"));
        assert_eq!(config.save_format, SnapshotFormat::Binary);
        assert_eq!(config.max_turns, 1);
    }

    #[test]
    fn malformed_values_are_ignored() {
        let config = config_from(&[("GAME_SEED", "soon"), ("SAVE_FORMAT", "yaml")]);
        assert_eq!(config.seed, None);
        assert_eq!(config.save_format, SnapshotFormat::Json);
    }
}
