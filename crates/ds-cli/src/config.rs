//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the data file.
    pub data_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_path: data_dir.join("days-since.dat"),
        }
    }
}

impl Config {
    /// Loads configuration from default locations, optionally layering a
    /// specific file on top.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (DS_*)
        figment = figment.merge(Env::prefixed("DS_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for days-since.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("days-since"))
}

/// Returns the platform-specific data directory for days-since.
///
/// On Linux: `~/.local/share/days-since`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("days-since"))
}
