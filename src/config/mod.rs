//! Configuration loading for ipydeps.
//!
//! - Schema definitions in [`schema`]
//! - Directory discovery and loading in [`loader`]
//! - Named pip config lookup in [`pip_config`]
//!
//! # Example
//!
//! ```
//! use ipydeps::config::{load_config, SETTINGS_FILE};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(SETTINGS_FILE), "settle_delay_ms: 0").unwrap();
//!
//! let settings = load_config(Some(temp.path())).unwrap();
//! assert_eq!(settings.settle_delay_ms, 0);
//! ```
//!
//! # Configuration Directory
//!
//! 1. `--config-dir` on the command line
//! 2. `IPYDEPS_CONFIG_DIR`
//! 3. The platform config directory, e.g. `~/.config/ipydeps`
//!
//! The directory holds `ipydeps.yml` and any named pip configs.

pub mod loader;
pub mod pip_config;
pub mod schema;

pub use loader::{
    config_dir, config_dir_with_env, load_config, load_settings_file, parse_settings,
    CONFIG_DIR_ENV, SETTINGS_FILE,
};
pub use pip_config::{find_pip_config_path, pip_config_found};
pub use schema::{PkiSettings, Settings};
