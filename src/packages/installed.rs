//! Installed package detection.
//!
//! Two sources are combined: the registry's view of the search path and
//! `pip freeze --all`. Either can lag behind the other right after an
//! install, so the union is used.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{IpydepsError, Result};
use crate::python::Interpreter;
use crate::shell::{display_command, CommandOptions, CommandRunner};
use crate::site::PackageRegistry;

use super::names::{canonicalize, normalize_package_names};

/// Name part of a `name==version` freeze line.
pub fn get_freeze_package_name(line: &str) -> Option<&str> {
    line.split_once("==").map(|(name, _)| name.trim())
}

/// Package names from `pip freeze` output.
///
/// Lines without `==` (editable installs, direct URL references, blank
/// lines) are ignored.
pub fn process_pip_freeze_output(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .filter_map(get_freeze_package_name)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Run `pip freeze --all` and parse its output.
pub fn pip_freeze_packages(
    interpreter: &Interpreter,
    runner: &dyn CommandRunner,
) -> Result<Vec<String>> {
    let argv = interpreter.pip_args(&["freeze", "--all"]);
    let result = runner.run(&argv, &CommandOptions::captured())?;

    if !result.success {
        return Err(IpydepsError::CommandFailed {
            command: display_command(&argv),
            code: result.exit_code,
        });
    }

    Ok(process_pip_freeze_output(&result.stdout))
}

/// Canonical names of every package visible to the interpreter.
pub fn currently_installed(
    registry: &dyn PackageRegistry,
    interpreter: &Interpreter,
    runner: &dyn CommandRunner,
) -> Result<BTreeSet<String>> {
    let from_registry = registry.installed();
    let from_freeze = pip_freeze_packages(interpreter, runner)?;

    debug!(
        "Installed packages: {} from registry, {} from pip freeze",
        from_registry.len(),
        from_freeze.len()
    );

    Ok(normalize_package_names(
        from_registry.iter().map(String::as_str).chain(from_freeze.iter().map(String::as_str)),
    ))
}

/// Requested packages that are not installed yet.
pub fn subtract_installed(
    already_installed: &BTreeSet<String>,
    requested: &BTreeSet<String>,
) -> BTreeSet<String> {
    requested
        .iter()
        .map(|p| canonicalize(p))
        .filter(|p| !already_installed.contains(p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;
    use crate::site::SitePackagesRegistry;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn freeze_output_keeps_pinned_lines() {
        let output = "numpy==1.26.4\n\
                      -e git+https://example.com/repo.git#egg=local\n\
                      \n\
                      requests @ file:///tmp/requests.whl\n\
                      Pandas == 2.1.0\n";

        assert_eq!(process_pip_freeze_output(output), vec!["numpy", "Pandas"]);
    }

    #[test]
    fn freeze_name_trims_whitespace() {
        assert_eq!(get_freeze_package_name(" six ==1.16.0"), Some("six"));
        assert_eq!(get_freeze_package_name("no-version"), None);
    }

    #[test]
    fn currently_installed_unions_and_lowercases() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("Flask-3.0.0.dist-info")).unwrap();

        let mut registry = SitePackagesRegistry::new();
        registry.rescan(&[temp.path().to_path_buf()]);

        let mut runner = MockRunner::new();
        runner.respond(
            &["python3", "-m", "pip", "freeze"],
            MockRunner::output("NumPy==1.26.4\ntyping_extensions==4.9.0\n"),
        );

        let installed =
            currently_installed(&registry, &Interpreter::new("python3"), &runner).unwrap();

        assert_eq!(installed, set(&["flask", "numpy", "typing-extensions"]));
    }

    #[test]
    fn currently_installed_fails_when_freeze_fails() {
        let mut runner = MockRunner::new();
        runner.respond(
            &["python3", "-m", "pip", "freeze"],
            MockRunner::failed(1, "No module named pip"),
        );

        let registry = SitePackagesRegistry::new();
        assert!(currently_installed(&registry, &Interpreter::new("python3"), &runner).is_err());
    }

    #[test]
    fn subtract_installed_removes_installed() {
        let installed = set(&["numpy", "pandas"]);
        let requested = set(&["NumPy", "scipy"]);

        assert_eq!(subtract_installed(&installed, &requested), set(&["scipy"]));
    }

    #[test]
    fn subset_of_installed_leaves_nothing() {
        let installed = set(&["numpy", "pandas", "scipy"]);
        let requested = set(&["numpy", "scipy"]);

        assert!(subtract_installed(&installed, &requested).is_empty());
    }

    #[test]
    fn versioned_requests_are_never_considered_installed() {
        let installed = set(&["numpy"]);
        let requested = set(&["numpy>=2.0"]);

        assert_eq!(
            subtract_installed(&installed, &requested),
            set(&["numpy>=2.0"])
        );
    }
}
