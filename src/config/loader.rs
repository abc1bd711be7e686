//! Config directory discovery and settings loading.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::schema::Settings;
use crate::error::{IpydepsError, Result};

/// Environment variable that relocates the config directory.
pub const CONFIG_DIR_ENV: &str = "IPYDEPS_CONFIG_DIR";

/// Settings file name inside the config directory.
pub const SETTINGS_FILE: &str = "ipydeps.yml";

/// Resolve the config directory.
///
/// `IPYDEPS_CONFIG_DIR` wins; otherwise the platform config directory
/// (`~/.config/ipydeps` on Linux) is used.
pub fn config_dir() -> Option<PathBuf> {
    config_dir_with_env(|key: &str| std::env::var(key))
}

/// Resolve the config directory with a custom env var lookup function.
pub fn config_dir_with_env<F>(env_fn: F) -> Option<PathBuf>
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    if let Ok(dir) = env_fn(CONFIG_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Some(PathBuf::from(dir));
        }
    }

    dirs::config_dir().map(|d| d.join("ipydeps"))
}

/// Parse YAML content into [`Settings`].
///
/// An empty document yields the defaults.
pub fn parse_settings(content: &str, source_path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    serde_yaml::from_str(content).map_err(|e| IpydepsError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a single settings file.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)?;
    parse_settings(&content, path)
}

/// Load settings from the config directory.
///
/// A missing directory or settings file is not an error; defaults apply.
pub fn load_config(config_dir: Option<&Path>) -> Result<Settings> {
    let Some(dir) = config_dir else {
        debug!("No config directory, using default settings");
        return Ok(Settings::default());
    };

    let path = dir.join(SETTINGS_FILE);
    if !path.is_file() {
        debug!("No settings at {}, using defaults", path.display());
        return Ok(Settings::default());
    }

    debug!("Loading settings from {}", path.display());
    load_settings_file(&path)
}
