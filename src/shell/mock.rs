//! Recording command runner for tests.
//!
//! `MockRunner` implements [`CommandRunner`] without spawning anything.
//! Responses are registered against an argument prefix; every call is
//! recorded for later assertion.
//!
//! # Example
//!
//! ```
//! use ipydeps::shell::{CommandOptions, CommandRunner, MockRunner};
//!
//! let mut runner = MockRunner::new();
//! runner.respond(&["python3", "--version"], MockRunner::output("Python 3.11.4\n"));
//!
//! let argv = vec!["python3".to_string(), "--version".to_string()];
//! let result = runner.run(&argv, &CommandOptions::captured()).unwrap();
//!
//! assert!(result.stdout.contains("3.11.4"));
//! assert_eq!(runner.calls().len(), 1);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use crate::error::Result;

use super::command::{CommandOptions, CommandResult, CommandRunner};

/// A call captured by [`MockRunner`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Full argument vector.
    pub argv: Vec<String>,
    /// Extra environment passed with the call.
    pub env: HashMap<String, String>,
}

#[derive(Debug)]
struct Response {
    prefix: Vec<String>,
    queue: RefCell<VecDeque<CommandResult>>,
}

/// Command runner that returns canned results.
///
/// Calls that match no registered prefix succeed with empty output. When a
/// prefix has several queued results they are returned in order and the
/// last one repeats.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: Vec<Response>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl MockRunner {
    /// Create a runner with no registered responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// A successful result with the given stdout.
    pub fn output(stdout: &str) -> CommandResult {
        CommandResult::success(stdout.to_string(), String::new(), Duration::ZERO)
    }

    /// A failed result with the given exit code and stderr.
    pub fn failed(code: i32, stderr: &str) -> CommandResult {
        CommandResult::failure(Some(code), String::new(), stderr.to_string(), Duration::ZERO)
    }

    /// Register a single response for calls starting with `prefix`.
    pub fn respond(&mut self, prefix: &[&str], result: CommandResult) {
        self.queue(prefix, vec![result]);
    }

    /// Register responses returned in order for calls starting with `prefix`.
    pub fn queue(&mut self, prefix: &[&str], results: Vec<CommandResult>) {
        self.responses.push(Response {
            prefix: prefix.iter().map(|s| s.to_string()).collect(),
            queue: RefCell::new(results.into()),
        });
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Recorded calls whose arguments start with `prefix`.
    pub fn calls_matching(&self, prefix: &[&str]) -> Vec<RecordedCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| starts_with(&call.argv, prefix))
            .cloned()
            .collect()
    }
}

fn starts_with<S: AsRef<str>>(argv: &[String], prefix: &[S]) -> bool {
    argv.len() >= prefix.len()
        && argv
            .iter()
            .zip(prefix)
            .all(|(arg, expected)| arg == expected.as_ref())
}

impl CommandRunner for MockRunner {
    fn run(&self, argv: &[String], options: &CommandOptions) -> Result<CommandResult> {
        self.calls.borrow_mut().push(RecordedCall {
            argv: argv.to_vec(),
            env: options.env.clone(),
        });

        let response = self
            .responses
            .iter()
            .find(|response| starts_with(argv, response.prefix.as_slice()));

        let Some(response) = response else {
            return Ok(Self::output(""));
        };

        let mut queue = response.queue.borrow_mut();
        let result = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };

        Ok(result.unwrap_or_else(|| Self::output("")))
    }
}
