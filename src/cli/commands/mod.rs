//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`ipydeps install`, `ipydeps list`)
//! - Settings loaded once and shared through [`CommandContext`]
//! - Consistent global flag handling

pub mod completions;
pub mod dispatcher;
pub mod install;
pub mod list;
pub mod overrides;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
