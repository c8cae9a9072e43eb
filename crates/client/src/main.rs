//! Skirmish runner.
//!
//! Loads a scenario and plays it out with both sides under AI control,
//! narrating each event on stdout.
//!
//! Environment variables (a `.env` file is honoured):
//! - `CONTENT_DIR` - data directory with `config.toml` and `scenarios/` (default: bundled)
//! - `SCENARIO` - scenario name under `scenarios/` (default: `skirmish`)
//! - `LOG_DIR` - also write logs to `LOG_DIR/skirmish.log`
//! - everything read by [`tactics_runtime::RuntimeConfig::from_env`]

mod battle;
mod logging;
mod narration;

use std::env;

use anyhow::Result;
use tactics_content::ContentFactory;
use tactics_runtime::RuntimeConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _guard = logging::setup_logging()?;

    let config = RuntimeConfig::from_env();
    let content = match env::var("CONTENT_DIR") {
        Ok(dir) => ContentFactory::new(dir),
        Err(_) => ContentFactory::bundled(),
    };
    let scenario_name = env::var("SCENARIO").unwrap_or_else(|_| "skirmish".to_owned());

    tracing::info!(
        data_dir = %content.data_dir().display(),
        scenario = %scenario_name,
        seed = ?config.seed,
        "Starting skirmish"
    );

    let game_config = content.load_config()?;
    let scenario = content.load_scenario(&scenario_name)?;

    let outcome = battle::run(&scenario, &game_config, &config).await?;
    println!("{outcome}");
    Ok(())
}
