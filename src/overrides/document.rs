//! The override document and per-version resolution.
//!
//! The document maps version tags to packages to command lists:
//!
//! ```json
//! {
//!   "python-3":      { "numpy": [["pip", "install", "numpy<2"]] },
//!   "python-3.11":   { "numpy": [["echo", "hi"]] },
//!   "python-3.11.4": { "gdal":  [["conda", "install", "-y", "gdal"]] }
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use crate::packages::canonicalize;
use crate::python::PythonVersion;

/// One command as an argument vector.
pub type OverrideCommand = Vec<String>;

/// Ordered commands that replace the normal install of one package.
pub type OverrideCommands = Vec<OverrideCommand>;

/// Shape of the document as served.
pub type RawOverrideDocument = BTreeMap<String, BTreeMap<String, OverrideCommands>>;

/// Override commands keyed by version tag, then canonical package name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    versions: BTreeMap<String, BTreeMap<String, OverrideCommands>>,
}

impl OverrideTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document and normalize its package names.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        let raw: RawOverrideDocument = serde_json::from_str(content)?;
        Ok(case_insensitive_dependencies_json(raw))
    }

    /// Whether the table has no version sections.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Packages listed under one version tag.
    pub fn version(&self, tag: &str) -> Option<&BTreeMap<String, OverrideCommands>> {
        self.versions.get(tag)
    }

    /// Commands to run for each requested package on `version`.
    ///
    /// Tags are consulted from least to most specific, so a
    /// `python-3.11.4` entry beats `python-3.11`, which beats `python-3`.
    pub fn find_overrides(
        &self,
        packages: &BTreeSet<String>,
        version: &PythonVersion,
    ) -> BTreeMap<String, OverrideCommands> {
        let mut overrides = BTreeMap::new();

        if packages.is_empty() {
            return overrides;
        }

        for tag in version.tags() {
            let Some(section) = self.versions.get(&tag) else {
                continue;
            };

            for pkg in packages {
                if let Some(cmds) = section.get(pkg) {
                    overrides.insert(pkg.clone(), cmds.clone());
                }
            }
        }

        overrides
    }
}

/// Canonicalize package keys in every version section.
///
/// Names differing only in case (or `_` versus `-`) collide; the later one
/// in key order wins and a warning is logged.
pub fn case_insensitive_dependencies_json(raw: RawOverrideDocument) -> OverrideTable {
    let mut versions = BTreeMap::new();

    for (version, packages) in raw {
        let mut section = BTreeMap::new();

        for (pkg, cmds) in packages {
            let pkg = canonicalize(&pkg);

            if section.contains_key(&pkg) {
                warn!(
                    "Duplicate package name {} in dependencies JSON.  \
                     Package names are case-insensitive.  Overwriting!",
                    pkg
                );
            }

            section.insert(pkg, cmds);
        }

        versions.insert(version, section);
    }

    OverrideTable { versions }
}
