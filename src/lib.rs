//! ipydeps - Install missing Python packages on demand.
//!
//! ipydeps drives `pip` for a Python interpreter: it filters a request down
//! to names that are valid, not part of the standard library and not
//! installed yet, runs any site-specific override commands for them, and
//! hands the rest to a single `pip install`.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings file and pip config lookup
//! - [`error`] - Error types and result aliases
//! - [`installer`] - The install flow and its report
//! - [`overrides`] - Fetching and running per-package override commands
//! - [`packages`] - Name validation, the standard library list, installed packages
//! - [`pki`] - Client certificate material
//! - [`python`] - The managed interpreter and its version
//! - [`shell`] - External command execution
//! - [`site`] - Scanning installation directories for distributions
//!
//! # Example
//!
//! ```
//! use ipydeps::packages::{get_pkg_names, subtract_stdlib, PackageRequest};
//!
//! let names = get_pkg_names(&PackageRequest::from("numpy, os"));
//! let missing = subtract_stdlib(&names);
//! assert!(missing.contains("numpy"));
//! assert!(!missing.contains("os"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod installer;
pub mod overrides;
pub mod packages;
pub mod pki;
pub mod python;
pub mod shell;
pub mod site;

pub use error::{IpydepsError, Result};
pub use installer::{pip, InstallOptions, InstallReport};
