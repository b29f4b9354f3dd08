//! Application configuration.
//!
//! Values are layered: built-in defaults, then `~/.config/yard/config.toml`
//! when present, then `YARD_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Directory under the user's config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "yard";
/// Name of the configuration file.
pub const CONFIG_FILE: &str = "config.toml";

const DEFAULT_CATALOGUE_PATH: &str = "station_locations.json";
const DEFAULT_LOG_DIR: &str = "logs";

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Station catalogue: a JSON list of {"x", "y", "id"} records.
catalogue_path = "station_locations.json"

# Directory receiving yard.log.
log_dir = "logs"

# Uncomment to make random starting stations reproducible.
# rng_seed = 42
"#;

/// Runtime settings shared by the core and the frontends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Station catalogue read once at startup.
    pub catalogue_path: PathBuf,
    /// Where log files are written.
    pub log_dir: PathBuf,
    /// Seed for random starting stations; entropy when absent.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalogue_path: PathBuf::from(DEFAULT_CATALOGUE_PATH),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            rng_seed: None,
        }
    }
}

impl AppConfig {
    /// Load from the default config file location.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load with `path` as the file layer. A missing file is not an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .set_default("catalogue_path", DEFAULT_CATALOGUE_PATH)?
            .set_default("log_dir", DEFAULT_LOG_DIR)?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("YARD").try_parsing(true))
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid config {}", path.display()))
    }
}

/// Location of the user's config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write the commented default config if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    write_default_config(config_path())
}

fn write_default_config(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE)
        .with_context(|| format!("failed to write config {}", path.display()))?;
    info!(path = %path.display(), "Wrote default config");
    Ok(())
}
