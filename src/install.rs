//! Building and running the package manager command.

use std::path::Path;

use crate::detection::PackageManager;
use crate::error::{Result, TypieError};
use crate::resolve::InstallTarget;
use crate::shell::{execute_inherited, quote_arg, CommandResult};

/// One package manager invocation adding type packages as dev dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    tool: PackageManager,
    packages: Vec<String>,
}

impl InstallCommand {
    /// Build the command for an install set.
    ///
    /// Tools that prompt on version mismatch get each package pinned to the
    /// dependency's declared range (`@types/foo@^1.2.0`).
    pub fn new(tool: PackageManager, install_set: &[InstallTarget]) -> Self {
        let packages = install_set
            .iter()
            .map(|target| {
                if tool.pins_version_ranges() && !target.version_range.is_empty() {
                    format!("{}@{}", target.type_package, target.version_range)
                } else {
                    target.type_package.clone()
                }
            })
            .collect();

        Self { tool, packages }
    }

    /// Package arguments, without the subcommand.
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    /// Full argument vector, starting with the executable.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.tool.executable())
            .chain(self.tool.add_dev_args().iter().copied())
            .map(str::to_string)
            .chain(self.packages.iter().cloned())
            .collect()
    }

    /// Command line as passed to the shell.
    pub fn command_line(&self) -> String {
        self.argv()
            .iter()
            .map(|arg| quote_arg(arg))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the command in the project root with inherited stdio.
    ///
    /// Runs even when there are no packages; what the tool does with an
    /// empty add is up to the tool.
    pub fn run(&self, project_root: &Path) -> Result<()> {
        let command = self.command_line();
        let result = execute_inherited(&command, project_root)?;

        tracing::debug!(
            "`{}` exited with {:?} after {:?}",
            command,
            result.exit_code,
            result.duration
        );

        check_exit(command, &result)
    }
}

/// Map an installer's exit status to the run's outcome.
///
/// Ctrl-C reaches the installer too; a run it stops is reported as
/// interrupted rather than as a failed install.
fn check_exit(command: String, result: &CommandResult) -> Result<()> {
    if result.success {
        Ok(())
    } else if result.interrupted() {
        Err(TypieError::Interrupted)
    } else {
        Err(TypieError::InstallerFailed {
            command,
            code: result.exit_code,
        })
    }
}
