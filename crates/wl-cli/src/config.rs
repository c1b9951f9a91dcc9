//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use wl_core::AnalyzerConfig;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Calendar export to read when `--events` is not given.
    pub events_path: PathBuf,

    /// Travel, threshold and trend tuning.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            events_path: data_dir.join("events.json"),
            analyzer: AnalyzerConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default locations, plus `config_path`
    /// when given.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        Self::figment(config_path).extract()
    }

    fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (WL_*, nested keys split on `__`)
        figment.merge(Env::prefixed("WL_").split("__"))
    }
}

/// Returns the platform-specific config directory for wl.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("wl"))
}

/// Returns the platform-specific data directory for wl.
///
/// On Linux: `~/.local/share/wl`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("wl"))
}
