//! Registry backed by `*.dist-info` and `*.egg-info` metadata on disk.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::PackageRegistry;

const METADATA_SUFFIXES: &[&str] = &[".dist-info", ".egg-info"];

/// Scans search path directories for installed distribution metadata.
#[derive(Debug, Default)]
pub struct SitePackagesRegistry {
    entries: BTreeMap<PathBuf, BTreeSet<String>>,
}

impl SitePackagesRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Search path entries scanned so far.
    pub fn entries(&self) -> impl Iterator<Item = &Path> {
        self.entries.keys().map(PathBuf::as_path)
    }
}

impl PackageRegistry for SitePackagesRegistry {
    fn installed(&self) -> BTreeSet<String> {
        self.entries.values().flatten().cloned().collect()
    }

    fn rescan(&mut self, search_paths: &[PathBuf]) {
        for entry in search_paths {
            let found = scan_entry(entry);
            debug!("{} distributions in {}", found.len(), entry.display());
            self.entries.insert(entry.clone(), found);
        }
    }

    fn invalidate(&mut self) {
        self.entries.clear();
    }
}

/// Distribution names found directly under `entry`.
///
/// Missing or unreadable entries (zip files, removed directories) yield an
/// empty set.
pub fn scan_entry(entry: &Path) -> BTreeSet<String> {
    let Ok(dir) = fs::read_dir(entry) else {
        return BTreeSet::new();
    };

    dir.filter_map(|e| e.ok())
        .filter_map(|e| distribution_name(&e.path()))
        .map(|name| name.to_lowercase())
        .collect()
}

/// Project name for a metadata directory or file, if `path` is one.
///
/// The `Name:` header of the metadata is preferred; the file name up to
/// the first `-` is used when it cannot be read.
pub fn distribution_name(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let stem = METADATA_SUFFIXES
        .iter()
        .find_map(|suffix| file_name.strip_suffix(suffix))?;

    if let Some(name) = read_metadata_name(path) {
        return Some(name);
    }

    let name = stem.split('-').next().unwrap_or(stem).trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn read_metadata_name(path: &Path) -> Option<String> {
    let metadata = if path.is_dir() {
        ["METADATA", "PKG-INFO"]
            .iter()
            .find_map(|f| fs::read_to_string(path.join(f)).ok())?
    } else {
        fs::read_to_string(path).ok()?
    };

    metadata
        .lines()
        .take_while(|line| !line.is_empty())
        .find_map(|line| line.strip_prefix("Name:"))
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn scans_dist_info_and_egg_info() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("requests-2.31.0.dist-info")).unwrap();
        fs::create_dir(temp.path().join("Legacy_Pkg-0.1-py3.11.egg-info")).unwrap();
        fs::create_dir(temp.path().join("requests")).unwrap();
        fs::write(temp.path().join("six.py"), "").unwrap();

        assert_eq!(scan_entry(temp.path()), set(&["legacy_pkg", "requests"]));
    }

    #[test]
    fn prefers_metadata_name_header() {
        let temp = TempDir::new().unwrap();
        let dist = temp.path().join("typing_extensions-4.9.0.dist-info");
        fs::create_dir(&dist).unwrap();
        fs::write(
            dist.join("METADATA"),
            "Metadata-Version: 2.1\nName: typing-extensions\nVersion: 4.9.0\n\nName: body\n",
        )
        .unwrap();

        assert_eq!(distribution_name(&dist), Some("typing-extensions".to_string()));
    }

    #[test]
    fn egg_info_file_is_read_directly() {
        let temp = TempDir::new().unwrap();
        let egg = temp.path().join("oldpkg-1.0.egg-info");
        fs::write(&egg, "Metadata-Version: 1.0\nName: OldPkg\n").unwrap();

        assert_eq!(distribution_name(&egg), Some("OldPkg".to_string()));
    }

    #[test]
    fn missing_entry_is_empty() {
        assert!(scan_entry(Path::new("/definitely/not/a/site-packages")).is_empty());
    }

    #[test]
    fn rescan_replaces_entry_and_invalidate_clears() {
        let temp = TempDir::new().unwrap();
        let mut registry = SitePackagesRegistry::new();

        registry.rescan(&[temp.path().to_path_buf()]);
        assert!(registry.installed().is_empty());

        fs::create_dir(temp.path().join("numpy-1.26.4.dist-info")).unwrap();
        registry.rescan(&[temp.path().to_path_buf()]);
        assert_eq!(registry.installed(), set(&["numpy"]));
        assert_eq!(registry.entries().count(), 1);

        registry.invalidate();
        assert!(registry.installed().is_empty());
        assert_eq!(registry.entries().count(), 0);
    }
}
