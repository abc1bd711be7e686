//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// ipydeps - Install missing Python packages on demand.
#[derive(Debug, Parser)]
#[command(name = "ipydeps")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding ipydeps.yml and named pip configs
    #[arg(long, global = true, env = "IPYDEPS_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Python interpreter to manage (overrides the config file)
    #[arg(long, global = true, env = "IPYDEPS_PYTHON")]
    pub python: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install packages that are not installed yet
    Install(InstallArgs),

    /// List installed packages
    List(ListArgs),

    /// Show the override commands that would run for packages
    Overrides(OverridesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, clap::Args)]
pub struct InstallArgs {
    /// Packages to install, optionally with a version (numpy>=1.26)
    #[arg(required = true)]
    pub packages: Vec<String>,

    /// Run pip with -vvv
    #[arg(short, long)]
    pub verbose: bool,

    /// Authenticate to the package index with the configured client certificate
    #[arg(long)]
    pub pki: bool,

    /// Do not fetch or run override commands
    #[arg(long)]
    pub no_overrides: bool,

    /// Name of a pip config file in the config directory
    #[arg(long, value_name = "NAME")]
    pub pip_config: Option<String>,

    /// Print the install report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `overrides` command.
#[derive(Debug, Clone, clap::Args)]
pub struct OverridesArgs {
    /// Packages to look up
    #[arg(required = true)]
    pub packages: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
