//! External command execution.

pub mod command;
pub mod mock;

pub use command::{
    display_command, execute, CommandOptions, CommandResult, CommandRunner, SystemRunner,
};
pub use mock::{MockRunner, RecordedCall};
