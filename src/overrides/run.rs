//! Executing override commands.

use std::collections::BTreeMap;

use tracing::{debug, error, info};

use crate::shell::{display_command, CommandOptions, CommandRunner};

use super::document::OverrideCommands;

/// Run one command and log its stderr if it fails.
///
/// Returns whether the command succeeded. Nothing is propagated: a command
/// that cannot even be started is logged the same way.
pub fn run_and_log_error(runner: &dyn CommandRunner, command: &[String]) -> bool {
    match runner.run(command, &CommandOptions::captured()) {
        Ok(result) if result.success => true,
        Ok(result) => {
            match result.failure_stderr() {
                Some(stderr) => error!("{}", stderr),
                None => error!(
                    "{} exited with code {:?}",
                    display_command(command),
                    result.exit_code
                ),
            }
            false
        }
        Err(e) => {
            error!("{}", e);
            false
        }
    }
}

/// Run every override command, package by package, in order.
///
/// Empty commands are skipped. A failing command does not stop the ones
/// after it.
pub fn run_overrides(runner: &dyn CommandRunner, overrides: &BTreeMap<String, OverrideCommands>) {
    for (name, cmds) in overrides {
        info!("Executing overrides for {}", name);

        for command in cmds.iter().filter(|c| !c.is_empty()) {
            debug!("{}", display_command(command));
            run_and_log_error(runner, command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;

    fn cmd(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn runs_commands_in_order_and_skips_empty() {
        let runner = MockRunner::new();
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "numpy".to_string(),
            vec![cmd(&["echo", "one"]), Vec::new(), cmd(&["echo", "two"])],
        );

        run_overrides(&runner, &overrides);

        let argvs: Vec<Vec<String>> = runner.calls().into_iter().map(|c| c.argv).collect();
        assert_eq!(argvs, vec![cmd(&["echo", "one"]), cmd(&["echo", "two"])]);
    }

    #[test]
    fn continues_after_failure() {
        let mut runner = MockRunner::new();
        runner.respond(&["false"], MockRunner::failed(1, "nope"));

        let mut overrides = BTreeMap::new();
        overrides.insert("a".to_string(), vec![cmd(&["false"]), cmd(&["echo", "a"])]);
        overrides.insert("b".to_string(), vec![cmd(&["echo", "b"])]);

        run_overrides(&runner, &overrides);

        assert_eq!(runner.calls().len(), 3);
    }

    #[test]
    fn run_and_log_error_reports_outcome() {
        let mut runner = MockRunner::new();
        runner.respond(&["false"], MockRunner::failed(1, ""));

        assert!(run_and_log_error(&runner, &cmd(&["true"])));
        assert!(!run_and_log_error(&runner, &cmd(&["false"])));
    }

    #[cfg(unix)]
    #[test]
    fn unstartable_command_is_logged_not_raised() {
        let runner = crate::shell::SystemRunner;
        assert!(!run_and_log_error(
            &runner,
            &cmd(&["ipydeps-definitely-not-a-real-program"])
        ));
    }
}
