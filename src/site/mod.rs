//! The interpreter's view of installed distributions.
//!
//! A [`PackageRegistry`] stands in for the process-wide working set and
//! import cache a notebook kernel keeps. After pip changes the environment
//! the registry is told to rescan the search path and drop anything it
//! cached.

pub mod scanner;

use std::collections::BTreeSet;
use std::path::PathBuf;

pub use scanner::{distribution_name, scan_entry, SitePackagesRegistry};

/// Registry of installed distributions.
pub trait PackageRegistry {
    /// Names of every distribution currently known to the registry.
    fn installed(&self) -> BTreeSet<String>;

    /// Re-read the given search path entries.
    fn rescan(&mut self, search_paths: &[PathBuf]);

    /// Forget cached lookups so the next rescan starts from scratch.
    fn invalidate(&mut self);
}
