//! The install flow.
//!
//! 1. Check the named pip config exists, stop early if not.
//! 2. Snapshot what is installed.
//! 3. Filter the request: safelist, canonical names, standard library,
//!    already installed.
//! 4. Run override commands for the remainder.
//! 5. Rescan, and hand whatever is still missing to pip in one call.
//! 6. Refresh the registry and report the before/after difference.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use tracing::{debug, error};

use crate::config::{find_pip_config_path, pip_config_found, Settings};
use crate::error::Result;
use crate::overrides::{load_overrides, run_overrides, OverrideCommands};
use crate::packages::{
    currently_installed, get_pkg_names, normalize_package_names, subtract_installed,
    subtract_stdlib, PackageRequest,
};
use crate::pki::CredentialSource;
use crate::python::Interpreter;
use crate::shell::CommandRunner;
use crate::site::PackageRegistry;

use super::pip::run_pip;
use super::report::{log_before_after, log_currently_installed, InstallReport};

/// Per-call switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    /// Pass `-vvv` to pip.
    pub verbose: bool,
    /// Authenticate to the package index with the client certificate.
    pub use_pki: bool,
    /// Fetch and run override commands.
    pub use_overrides: bool,
    /// Name of a pip config file in the config directory.
    pub pip_config: Option<String>,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            use_pki: false,
            use_overrides: true,
            pip_config: None,
        }
    }
}

/// Installs packages into one interpreter's environment.
pub struct Installer<'a> {
    settings: Settings,
    config_dir: Option<PathBuf>,
    interpreter: Interpreter,
    runner: &'a dyn CommandRunner,
    registry: &'a mut dyn PackageRegistry,
    credentials: Option<&'a dyn CredentialSource>,
}

impl<'a> Installer<'a> {
    /// Create an installer for the interpreter named in `settings`.
    pub fn new(
        settings: Settings,
        config_dir: Option<PathBuf>,
        runner: &'a dyn CommandRunner,
        registry: &'a mut dyn PackageRegistry,
    ) -> Self {
        let interpreter = Interpreter::new(&settings.python);
        Self {
            settings,
            config_dir,
            interpreter,
            runner,
            registry,
            credentials: None,
        }
    }

    /// Use `credentials` for PKI installs and authenticated override fetches.
    pub fn with_credentials(mut self, credentials: &'a dyn CredentialSource) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// The settings in effect.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The managed interpreter.
    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Make the registry rescan every entry on the interpreter's search path.
    pub fn refresh_available_packages(&mut self) -> Result<()> {
        let search_paths = self.interpreter.search_paths(self.runner)?;
        self.registry.rescan(&search_paths);
        Ok(())
    }

    /// Drop cached lookups, then give the filesystem a moment to settle.
    pub fn invalidate_cache(&mut self) {
        self.registry.invalidate();
        thread::sleep(Duration::from_millis(self.settings.settle_delay_ms));
    }

    /// Canonical names of every installed package.
    pub fn currently_installed(&self) -> Result<BTreeSet<String>> {
        currently_installed(&*self.registry, &self.interpreter, self.runner)
    }

    /// Override commands for `packages` on this interpreter.
    ///
    /// Nothing is fetched when `packages` is empty. A document that cannot
    /// be obtained counts as having no overrides.
    pub fn find_overrides(
        &self,
        packages: &BTreeSet<String>,
    ) -> Result<BTreeMap<String, OverrideCommands>> {
        if packages.is_empty() {
            return Ok(BTreeMap::new());
        }

        let table = match load_overrides(&self.settings, self.credentials) {
            Ok(table) => table,
            Err(e) => {
                error!("{}", e);
                return Ok(BTreeMap::new());
            }
        };

        if table.is_empty() {
            return Ok(BTreeMap::new());
        }

        let version = self.interpreter.version(self.runner)?;
        Ok(table.find_overrides(packages, &version))
    }

    /// Install whatever part of `request` is missing.
    ///
    /// Returns `Ok(None)` when the named pip config does not exist; nothing
    /// else about the run is attempted in that case.
    pub fn pip(
        &mut self,
        request: impl Into<PackageRequest>,
        options: &InstallOptions,
    ) -> Result<Option<InstallReport>> {
        let config_name = options.pip_config.as_deref();
        let pip_config_path = find_pip_config_path(config_name, self.config_dir.as_deref());

        if !pip_config_found(config_name, pip_config_path.as_deref()) {
            return Ok(None);
        }

        self.refresh_available_packages()?;
        let packages_before_install = self.currently_installed()?;

        let requested = normalize_package_names(get_pkg_names(&request.into()));
        let without_stdlib = subtract_stdlib(&requested);
        let skipped_stdlib = requested.difference(&without_stdlib).cloned().collect();

        log_currently_installed(&packages_before_install, &without_stdlib);
        let already_installed = packages_before_install
            .intersection(&without_stdlib)
            .cloned()
            .collect();
        let missing = subtract_installed(&packages_before_install, &without_stdlib);

        let mut overridden = BTreeSet::new();
        if options.use_overrides {
            let overrides = self.find_overrides(&missing)?;
            run_overrides(self.runner, &overrides);
            overridden = overrides.into_keys().collect();
        }

        // Overrides may have installed some of what is left.
        self.refresh_available_packages()?;
        let packages_to_install: Vec<String> =
            subtract_installed(&self.currently_installed()?, &missing)
                .into_iter()
                .collect();

        let mut pip_exit_code = None;
        if !packages_to_install.is_empty() {
            debug!("Running pip to install {}", packages_to_install.join(", "));

            let result = run_pip(
                &self.interpreter,
                self.runner,
                &packages_to_install,
                options.use_pki,
                options.verbose,
                pip_config_path.as_deref(),
                self.credentials,
            )?;

            pip_exit_code = result.exit_code;
            if let Some(stderr) = result.failure_stderr() {
                error!("{}", stderr);
            } else if !result.success {
                error!("pip exited with code {:?}", result.exit_code);
            }

            self.invalidate_cache();
            self.refresh_available_packages()?;
        }

        let packages_after_install = self.currently_installed()?;
        let new_packages = log_before_after(&packages_before_install, &packages_after_install);
        debug!("Done");

        Ok(Some(InstallReport {
            requested,
            skipped_stdlib,
            already_installed,
            overridden,
            attempted: packages_to_install,
            pip_exit_code,
            new_packages,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;
    use crate::site::SitePackagesRegistry;
    use tempfile::TempDir;

    const FREEZE: &[&str] = &["python3", "-m", "pip", "freeze"];
    const INSTALL: &[&str] = &["python3", "-m", "pip", "install"];

    fn settings() -> Settings {
        Settings {
            python: "python3".to_string(),
            settle_delay_ms: 0,
            ..Default::default()
        }
    }

    #[test]
    fn already_installed_request_never_runs_pip() {
        let mut runner = MockRunner::new();
        runner.respond(FREEZE, MockRunner::output("numpy==1.26.4\npandas==2.1.0\n"));
        let mut registry = SitePackagesRegistry::new();

        let report = Installer::new(settings(), None, &runner, &mut registry)
            .pip(vec!["NumPy", "pandas"], &InstallOptions::default())
            .unwrap()
            .unwrap();

        assert!(runner.calls_matching(INSTALL).is_empty());
        assert_eq!(report.already_installed.len(), 2);
        assert!(!report.pip_ran());
    }

    #[test]
    fn missing_pip_config_stops_before_anything_runs() {
        let temp = TempDir::new().unwrap();
        let runner = MockRunner::new();
        let mut registry = SitePackagesRegistry::new();

        let options = InstallOptions {
            pip_config: Some("internal".to_string()),
            ..Default::default()
        };
        let report = Installer::new(
            settings(),
            Some(temp.path().to_path_buf()),
            &runner,
            &mut registry,
        )
        .pip("numpy", &options)
        .unwrap();

        assert!(report.is_none());
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn existing_pip_config_is_exported() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("internal"), "[global]\n").unwrap();
        let runner = MockRunner::new();
        let mut registry = SitePackagesRegistry::new();

        let options = InstallOptions {
            pip_config: Some("internal".to_string()),
            ..Default::default()
        };
        Installer::new(
            settings(),
            Some(temp.path().to_path_buf()),
            &runner,
            &mut registry,
        )
        .pip("numpy", &options)
        .unwrap()
        .unwrap();

        let installs = runner.calls_matching(INSTALL);
        assert_eq!(installs.len(), 1);
        let exported = installs[0].env.get("PIP_CONFIG_FILE").unwrap();
        assert_eq!(PathBuf::from(exported), temp.path().join("internal"));
    }

    #[test]
    fn pip_failure_is_reported_not_raised() {
        let mut runner = MockRunner::new();
        runner.respond(
            INSTALL,
            MockRunner::failed(1, "ERROR: No matching distribution found for nosuchpkg"),
        );
        let mut registry = SitePackagesRegistry::new();

        let report = Installer::new(settings(), None, &runner, &mut registry)
            .pip("nosuchpkg", &InstallOptions::default())
            .unwrap()
            .unwrap();

        assert_eq!(report.attempted, vec!["nosuchpkg"]);
        assert_eq!(report.pip_exit_code, Some(1));
        assert!(report.pip_failed());
        assert!(report.new_packages.is_empty());
    }

    #[test]
    fn new_packages_come_from_before_after_diff() {
        let mut runner = MockRunner::new();
        runner.queue(
            FREEZE,
            vec![
                MockRunner::output("six==1.16.0\n"),
                MockRunner::output("six==1.16.0\n"),
                MockRunner::output("six==1.16.0\nrequests==2.31.0\nurllib3==2.1.0\n"),
            ],
        );
        let mut registry = SitePackagesRegistry::new();

        let report = Installer::new(settings(), None, &runner, &mut registry)
            .pip("requests", &InstallOptions::default())
            .unwrap()
            .unwrap();

        let expected: BTreeSet<String> =
            ["requests", "urllib3"].iter().map(|s| s.to_string()).collect();
        assert_eq!(report.new_packages, expected);
    }

    #[test]
    fn overrides_disabled_skips_version_query() {
        let runner = MockRunner::new();
        let mut registry = SitePackagesRegistry::new();

        let options = InstallOptions {
            use_overrides: false,
            ..Default::default()
        };
        Installer::new(settings(), None, &runner, &mut registry)
            .pip("numpy", &options)
            .unwrap();

        assert!(runner.calls_matching(&["python3", "--version"]).is_empty());
    }

    #[test]
    fn find_overrides_without_packages_fetches_nothing() {
        let runner = MockRunner::new();
        let mut registry = SitePackagesRegistry::new();
        let mut settings = settings();
        settings.dependencies_link = Some("http://127.0.0.1:9/never-called.json".into());

        let installer = Installer::new(settings, None, &runner, &mut registry);
        assert!(installer.find_overrides(&BTreeSet::new()).unwrap().is_empty());
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn registry_is_rescanned_from_search_path() {
        let site = TempDir::new().unwrap();
        std::fs::create_dir(site.path().join("numpy-1.26.4.dist-info")).unwrap();

        let mut runner = MockRunner::new();
        runner.respond(
            &["python3", "-c"],
            MockRunner::output(&format!("{}\n", site.path().display())),
        );
        let mut registry = SitePackagesRegistry::new();

        let report = Installer::new(settings(), None, &runner, &mut registry)
            .pip("numpy", &InstallOptions::default())
            .unwrap()
            .unwrap();

        assert!(report.already_installed.contains("numpy"));
        assert!(runner.calls_matching(INSTALL).is_empty());
    }
}
