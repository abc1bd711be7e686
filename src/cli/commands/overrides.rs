//! Overrides command implementation.
//!
//! The `ipydeps overrides` command shows which override commands would run
//! for the given packages on the configured interpreter, without running
//! them.

use std::collections::BTreeMap;

use console::style;

use crate::cli::args::OverridesArgs;
use crate::error::Result;
use crate::installer::Installer;
use crate::overrides::OverrideCommands;
use crate::packages::{get_pkg_names, normalize_package_names, PackageRequest};
use crate::pki::CredentialSource;
use crate::shell::{display_command, SystemRunner};
use crate::site::SitePackagesRegistry;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The overrides command implementation.
pub struct OverridesCommand {
    args: OverridesArgs,
}

impl OverridesCommand {
    /// Create a new overrides command.
    pub fn new(args: OverridesArgs) -> Self {
        Self { args }
    }
}

/// Render resolved overrides for the terminal or as JSON.
pub fn render_overrides(
    overrides: &BTreeMap<String, OverrideCommands>,
    json: bool,
) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(overrides).map_err(anyhow::Error::from)?);
    }

    if overrides.is_empty() {
        return Ok("No overrides apply\n".to_string());
    }

    let mut out = String::new();
    for (name, cmds) in overrides {
        out.push_str(&format!("{}\n", style(name).bold()));
        for cmd in cmds.iter().filter(|c| !c.is_empty()) {
            out.push_str(&format!("  {}\n", display_command(cmd)));
        }
    }
    Ok(out)
}

impl Command for OverridesCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<CommandResult> {
        let credentials = ctx.credentials(false)?;
        let runner = SystemRunner;
        let mut registry = SitePackagesRegistry::new();

        let mut installer = Installer::new(
            ctx.settings.clone(),
            ctx.config_dir.clone(),
            &runner,
            &mut registry,
        );
        if let Some(credentials) = &credentials {
            installer = installer.with_credentials(credentials as &dyn CredentialSource);
        }

        let request = PackageRequest::Many(self.args.packages.clone());
        let packages = normalize_package_names(get_pkg_names(&request));
        let overrides = installer.find_overrides(&packages)?;

        print!("{}", render_overrides(&overrides, self.args.json)?);
        Ok(CommandResult::success())
    }
}
