//! List command implementation.
//!
//! The `ipydeps list` command prints the installed packages, as seen by
//! both the registry and `pip freeze`.

use std::collections::BTreeSet;

use console::style;

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::packages::currently_installed;
use crate::python::Interpreter;
use crate::shell::SystemRunner;
use crate::site::{PackageRegistry, SitePackagesRegistry};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(args: ListArgs) -> Self {
        Self { args }
    }
}

/// Render installed package names for the terminal or as JSON.
pub fn render_installed(installed: &BTreeSet<String>, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(installed).map_err(anyhow::Error::from)?);
    }

    let mut out = format!(
        "{}\n",
        style(format!("{} packages installed", installed.len())).bold()
    );
    for name in installed {
        out.push_str(&format!("  {}\n", name));
    }
    Ok(out)
}

impl Command for ListCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<CommandResult> {
        let runner = SystemRunner;
        let interpreter = Interpreter::new(&ctx.settings.python);

        let mut registry = SitePackagesRegistry::new();
        registry.rescan(&interpreter.search_paths(&runner)?);

        let installed = currently_installed(&registry, &interpreter, &runner)?;
        print!("{}", render_installed(&installed, self.args.json)?);

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn renders_json_array() {
        let out = render_installed(&set(&["numpy", "pandas"]), true).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, vec!["numpy", "pandas"]);
    }

    #[test]
    fn renders_one_name_per_line() {
        console::set_colors_enabled(false);
        let out = render_installed(&set(&["numpy", "pandas"]), false).unwrap();

        assert!(out.starts_with("2 packages installed\n"));
        assert!(out.contains("  numpy\n"));
        assert!(out.contains("  pandas\n"));
    }
}
