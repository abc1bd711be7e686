//! The `pip install` invocation.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IpydepsError, Result};
use crate::pki::{CredentialSource, TemporaryKeyCert};
use crate::python::Interpreter;
use crate::shell::{display_command, CommandOptions, CommandResult, CommandRunner};

/// Environment variable pip reads its config file location from.
pub const PIP_CONFIG_ENV: &str = "PIP_CONFIG_FILE";

/// Builder for `<python> -m pip install ...`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipInstall {
    packages: Vec<String>,
    verbose: bool,
    client_cert: Option<PathBuf>,
    ca_cert: Option<PathBuf>,
    pip_config: Option<PathBuf>,
}

impl PipInstall {
    /// Install the given packages.
    pub fn new<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            packages: packages.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Ask pip for maximum verbosity.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Authenticate to the index with a combined key+cert file and trust
    /// the given CA bundle.
    pub fn client_cert(mut self, key_cert: impl Into<PathBuf>, ca: impl Into<PathBuf>) -> Self {
        self.client_cert = Some(key_cert.into());
        self.ca_cert = Some(ca.into());
        self
    }

    /// Point pip at a specific config file.
    pub fn pip_config(mut self, path: Option<PathBuf>) -> Self {
        self.pip_config = path;
        self
    }

    /// Full argument vector.
    pub fn argv(&self, interpreter: &Interpreter) -> Vec<String> {
        let mut args = vec!["install".to_string()];

        if self.verbose {
            args.push("-vvv".to_string());
        }

        if let (Some(key_cert), Some(ca)) = (&self.client_cert, &self.ca_cert) {
            args.push(format!("--client-cert={}", key_cert.display()));
            args.push(format!("--cert={}", ca.display()));
        }

        args.extend(self.packages.iter().cloned());
        interpreter.pip_args(&args)
    }

    /// Execution options: both streams captured, `PIP_CONFIG_FILE` set when
    /// a config file was given.
    pub fn options(&self) -> CommandOptions {
        let mut options = CommandOptions::captured();
        if let Some(path) = &self.pip_config {
            options = options.with_env(PIP_CONFIG_ENV, path.to_string_lossy());
        }
        options
    }

    /// Run the install.
    pub fn run(&self, interpreter: &Interpreter, runner: &dyn CommandRunner) -> Result<CommandResult> {
        let argv = self.argv(interpreter);
        debug!("{}", display_command(&argv));
        runner.run(&argv, &self.options())
    }
}

/// Install `packages` with pip.
///
/// With `use_pki` the key and certificate are written to a temporary file
/// that only lives for the duration of the pip call.
pub fn run_pip(
    interpreter: &Interpreter,
    runner: &dyn CommandRunner,
    packages: &[String],
    use_pki: bool,
    verbose: bool,
    pip_config_path: Option<&Path>,
    credentials: Option<&dyn CredentialSource>,
) -> Result<CommandResult> {
    let install = PipInstall::new(packages.iter().cloned())
        .verbose(verbose)
        .pip_config(pip_config_path.map(Path::to_path_buf));

    if !use_pki {
        return install.run(interpreter, runner);
    }

    let credentials = credentials.ok_or_else(|| IpydepsError::Pki {
        message: "PKI was requested but no credentials are configured".to_string(),
    })?;

    let ca_path = credentials.ca_path()?;
    let key_cert = TemporaryKeyCert::create(credentials)?;

    install
        .client_cert(key_cert.path(), ca_path)
        .run(interpreter, runner)
}
