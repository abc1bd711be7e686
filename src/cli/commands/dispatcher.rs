//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for the settings every command shares
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{config_dir, load_config, Settings};
use crate::error::Result;
use crate::installer::credentials_from;
use crate::pki::PemFiles;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Settings and locations resolved once per invocation.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Config directory, if one could be determined.
    pub config_dir: Option<PathBuf>,

    /// Loaded settings with command-line overrides applied.
    pub settings: Settings,
}

impl CommandContext {
    /// Resolve the config directory and load settings.
    pub fn load(config_dir_override: Option<&Path>, python: Option<&str>) -> Result<Self> {
        let config_dir = config_dir_override
            .map(Path::to_path_buf)
            .or_else(config_dir);
        let mut settings = load_config(config_dir.as_deref())?;

        if let Some(python) = python {
            settings.python = python.to_string();
        }

        Ok(Self {
            config_dir,
            settings,
        })
    }

    /// Client certificate files named in the settings, if this run needs them.
    pub fn credentials(&self, use_pki: bool) -> Result<Option<PemFiles>> {
        credentials_from(&self.settings, use_pki)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher with the given context.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    /// Get the shared command context.
    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli) -> Result<CommandResult> {
        match &cli.command {
            Commands::Install(args) => {
                let cmd = super::install::InstallCommand::new(args.clone());
                cmd.execute(&self.context)
            }
            Commands::List(args) => {
                let cmd = super::list::ListCommand::new(args.clone());
                cmd.execute(&self.context)
            }
            Commands::Overrides(args) => {
                let cmd = super::overrides::OverridesCommand::new(args.clone());
                cmd.execute(&self.context)
            }
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(&self.context)
            }
        }
    }
}
