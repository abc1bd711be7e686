//! Package name handling and installed-set arithmetic.
//!
//! - [`names`] - safelist extraction and canonical names
//! - [`stdlib`] - standard library filtering
//! - [`installed`] - `pip freeze` parsing and installed-set computation

pub mod installed;
pub mod names;
pub mod stdlib;

pub use installed::{
    currently_installed, get_freeze_package_name, pip_freeze_packages,
    process_pip_freeze_output, subtract_installed,
};
pub use names::{
    canonicalize, get_pkg_names, is_valid_pkg_name, normalize_package_names, split_specifier,
    PackageRequest, PACKAGE_NAME_PATTERN,
};
pub use stdlib::{stdlib_packages, subtract_stdlib};
