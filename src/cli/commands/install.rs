//! Install command implementation.
//!
//! The `ipydeps install` command installs whatever part of the requested
//! packages is missing. Progress and problems are reported through logging.

use crate::cli::args::InstallArgs;
use crate::error::Result;
use crate::installer::{InstallOptions, Installer};
use crate::packages::PackageRequest;
use crate::pki::CredentialSource;
use crate::shell::SystemRunner;
use crate::site::SitePackagesRegistry;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The install command implementation.
pub struct InstallCommand {
    args: InstallArgs,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(args: InstallArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &InstallArgs {
        &self.args
    }

    /// Options for the installer derived from the flags.
    pub fn options(&self) -> InstallOptions {
        InstallOptions {
            verbose: self.args.verbose,
            use_pki: self.args.pki,
            use_overrides: !self.args.no_overrides,
            pip_config: self.args.pip_config.clone(),
        }
    }
}

impl Command for InstallCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<CommandResult> {
        let credentials = ctx.credentials(self.args.pki)?;
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
        let Some(report) = installer.pip(request, &self.options())? else {
            return Ok(CommandResult::failure(1));
        };

        if self.args.json {
            let json = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
            println!("{}", json);
        }

        if report.pip_failed() {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> InstallArgs {
        InstallArgs {
            packages: vec!["numpy".to_string()],
            verbose: false,
            pki: false,
            no_overrides: false,
            pip_config: None,
            json: false,
        }
    }

    #[test]
    fn default_flags_use_overrides() {
        let options = InstallCommand::new(args()).options();
        assert_eq!(options, InstallOptions::default());
    }

    #[test]
    fn flags_map_to_options() {
        let cmd = InstallCommand::new(InstallArgs {
            verbose: true,
            pki: true,
            no_overrides: true,
            pip_config: Some("internal".to_string()),
            ..args()
        });

        let options = cmd.options();
        assert!(options.verbose);
        assert!(options.use_pki);
        assert!(!options.use_overrides);
        assert_eq!(options.pip_config.as_deref(), Some("internal"));
    }
}
