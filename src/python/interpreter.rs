//! Handle on the Python interpreter that owns the target environment.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IpydepsError, Result};
use crate::shell::{display_command, CommandOptions, CommandRunner};

use super::version::PythonVersion;

/// Prints one `sys.path` entry per line.
const SYS_PATH_SCRIPT: &str = "import sys; print('\\n'.join(p for p in sys.path if p))";

/// Default interpreter executable for this platform.
pub fn default_executable() -> &'static str {
    if cfg!(target_os = "windows") {
        "python"
    } else {
        "python3"
    }
}

/// A Python interpreter reached through subprocess calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    executable: PathBuf,
}

impl Interpreter {
    /// Wrap the given executable (a path or a name resolved through `PATH`).
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// The interpreter executable.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Build `<python> -m pip <args...>`.
    pub fn pip_args<S: AsRef<str>>(&self, args: &[S]) -> Vec<String> {
        let mut argv = vec![
            self.executable.to_string_lossy().to_string(),
            "-m".to_string(),
            "pip".to_string(),
        ];
        argv.extend(args.iter().map(|a| a.as_ref().to_string()));
        argv
    }

    /// Ask the interpreter for its version.
    ///
    /// Old interpreters print `--version` to stderr, so both streams are
    /// searched.
    pub fn version(&self, runner: &dyn CommandRunner) -> Result<PythonVersion> {
        let argv = vec![
            self.executable.to_string_lossy().to_string(),
            "--version".to_string(),
        ];
        let result = runner.run(&argv, &CommandOptions::captured())?;

        if !result.success {
            return Err(IpydepsError::CommandFailed {
                command: display_command(&argv),
                code: result.exit_code,
            });
        }

        let combined = format!("{}\n{}", result.stdout, result.stderr);
        let version = combined.parse::<PythonVersion>()?;
        debug!("Interpreter {} is Python {}", self.executable.display(), version);
        Ok(version)
    }

    /// Ask the interpreter for its module search path.
    pub fn search_paths(&self, runner: &dyn CommandRunner) -> Result<Vec<PathBuf>> {
        let argv = vec![
            self.executable.to_string_lossy().to_string(),
            "-c".to_string(),
            SYS_PATH_SCRIPT.to_string(),
        ];
        let result = runner.run(&argv, &CommandOptions::captured())?;

        if !result.success {
            return Err(IpydepsError::CommandFailed {
                command: display_command(&argv),
                code: result.exit_code,
            });
        }

        Ok(result
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(default_executable())
    }
}
