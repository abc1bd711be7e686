//! Named pip configuration files.
//!
//! `ipydeps install --pip-config internal` points pip at
//! `<config dir>/internal` through `PIP_CONFIG_FILE`.

use std::path::{Path, PathBuf};

use tracing::error;

use crate::error::IpydepsError;

/// Path of the pip config called `name`, if one was asked for.
pub fn find_pip_config_path(name: Option<&str>, config_dir: Option<&Path>) -> Option<PathBuf> {
    Some(config_dir?.join(name?))
}

/// Whether the requested pip config can be used.
///
/// No request is always fine. A request that resolves to nothing, or to a
/// file that does not exist, is logged as an error.
pub fn pip_config_found(name: Option<&str>, path: Option<&Path>) -> bool {
    let Some(name) = name else {
        return true;
    };

    match path {
        Some(path) if path.exists() => true,
        Some(path) => {
            let err = IpydepsError::PipConfigNotFound {
                name: name.to_string(),
                path: path.to_path_buf(),
            };
            error!("{}", err);
            false
        }
        None => {
            error!(
                "Could not find pip config named {}: no config directory",
                name
            );
            false
        }
    }
}
