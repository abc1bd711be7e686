//! Installing missing packages.
//!
//! [`Installer::pip`] runs the whole flow against injected collaborators;
//! [`pip`] wires up the real ones from the default config directory.
//!
//! # Example
//!
//! ```no_run
//! use ipydeps::installer::{pip, InstallOptions};
//!
//! let report = pip(vec!["numpy", "pandas>=2.0"], &InstallOptions::default()).unwrap();
//! if let Some(report) = report {
//!     println!("new: {:?}", report.new_packages);
//! }
//! ```

pub mod flow;
pub mod pip;
pub mod report;

use crate::config::{config_dir, load_config};
use crate::error::Result;
use crate::packages::PackageRequest;
use crate::pki::{CredentialSource, PemFiles};
use crate::shell::SystemRunner;
use crate::site::SitePackagesRegistry;

pub use flow::{InstallOptions, Installer};
pub use pip::{run_pip, PipInstall, PIP_CONFIG_ENV};
pub use report::{log_before_after, log_currently_installed, InstallReport};

/// Install packages using the settings in the default config directory.
pub fn pip(
    request: impl Into<PackageRequest>,
    options: &InstallOptions,
) -> Result<Option<InstallReport>> {
    let dir = config_dir();
    let settings = load_config(dir.as_deref())?;
    let credentials = credentials_from(&settings, options.use_pki)?;

    let runner = SystemRunner;
    let mut registry = SitePackagesRegistry::new();
    let mut installer = Installer::new(settings, dir, &runner, &mut registry);

    if let Some(credentials) = &credentials {
        installer = installer.with_credentials(credentials as &dyn CredentialSource);
    }

    installer.pip(request, options)
}

/// PEM credentials named in the settings, when this run needs them.
///
/// They are needed for a PKI install or when the override document
/// requires a client certificate. Otherwise the `pki` section is not
/// looked at, so an incomplete one does not get in the way.
pub fn credentials_from(
    settings: &crate::config::Settings,
    use_pki: bool,
) -> Result<Option<PemFiles>> {
    let needed = use_pki || settings.dependencies_link_requires_pki;
    if !needed || settings.pki.is_empty() {
        Ok(None)
    } else {
        PemFiles::from_settings(&settings.pki).map(Some)
    }
}
