//! What an install run did.

use serde::Serialize;
use std::collections::BTreeSet;

use tracing::{info, warn};

/// Outcome of one [`pip`](super::Installer::pip) call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    /// Valid, canonicalized names from the request.
    pub requested: BTreeSet<String>,
    /// Requested names that belong to the standard library.
    pub skipped_stdlib: BTreeSet<String>,
    /// Requested names that were installed before the run.
    pub already_installed: BTreeSet<String>,
    /// Packages whose override commands were executed.
    pub overridden: BTreeSet<String>,
    /// Packages handed to pip.
    pub attempted: Vec<String>,
    /// pip's exit code, when pip ran.
    pub pip_exit_code: Option<i32>,
    /// Packages present after the run that were not there before.
    pub new_packages: BTreeSet<String>,
}

impl InstallReport {
    /// Whether pip was invoked.
    pub fn pip_ran(&self) -> bool {
        !self.attempted.is_empty()
    }

    /// Whether pip ran and failed.
    pub fn pip_failed(&self) -> bool {
        self.pip_ran() && self.pip_exit_code != Some(0)
    }
}

/// Log which requested packages are already present.
pub fn log_currently_installed(before: &BTreeSet<String>, requested: &BTreeSet<String>) {
    let already: Vec<&str> = before.intersection(requested).map(String::as_str).collect();

    if !already.is_empty() {
        info!("Packages currently installed: {}", already.join(", "));
    }
}

/// Log and return the packages that appeared during the run.
pub fn log_before_after(before: &BTreeSet<String>, after: &BTreeSet<String>) -> BTreeSet<String> {
    let new_packages: BTreeSet<String> = after.difference(before).cloned().collect();

    if new_packages.is_empty() {
        warn!("No new packages installed");
    } else {
        let names: Vec<&str> = new_packages.iter().map(String::as_str).collect();
        info!("New packages installed: {}", names.join(", "));
    }

    new_packages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn before_after_diff_ignores_removals() {
        let before = set(&["numpy", "six"]);
        let after = set(&["numpy", "pandas", "pytz"]);

        assert_eq!(log_before_after(&before, &after), set(&["pandas", "pytz"]));
    }

    #[test]
    fn no_change_gives_empty_diff() {
        let both = set(&["numpy"]);
        assert!(log_before_after(&both, &both).is_empty());
    }

    #[test]
    fn pip_failed_only_when_pip_ran() {
        let mut report = InstallReport::default();
        assert!(!report.pip_failed());

        report.attempted = vec!["numpy".into()];
        report.pip_exit_code = Some(1);
        assert!(report.pip_failed());

        report.pip_exit_code = Some(0);
        assert!(!report.pip_failed());
    }

    #[test]
    fn serializes_to_json() {
        let report = InstallReport {
            attempted: vec!["numpy".into()],
            pip_exit_code: Some(0),
            ..Default::default()
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["attempted"][0], "numpy");
        assert_eq!(json["pip_exit_code"], 0);
    }
}
