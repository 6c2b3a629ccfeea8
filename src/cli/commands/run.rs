//! Run command implementation.
//!
//! The `mlenv run` command provisions the environment.

use crate::cli::args::RunArgs;
use crate::config::ProvisionConfig;
use crate::error::Result;
use crate::locator::ToolLocator;
use crate::provision::{ProvisionOptions, ProvisionOutcome, Provisioner};
use crate::shell::{CommandRunner, OsFamily, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ConfigSource};

/// The run command implementation.
pub struct RunCommand {
    source: ConfigSource,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(source: ConfigSource, args: RunArgs) -> Self {
        Self { source, args }
    }

    fn options(&self) -> ProvisionOptions {
        ProvisionOptions {
            dry_run: self.args.dry_run,
            confirm_answer: self.args.confirm.clone(),
        }
    }

    fn run_with(
        &self,
        config: &ProvisionConfig,
        runner: &mut dyn CommandRunner,
        host: OsFamily,
        locator: ToolLocator,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let outcome = Provisioner::new(config, runner)
            .with_host(host)
            .with_locator(locator)
            .with_options(self.options())
            .run(ui)?;

        match outcome {
            ProvisionOutcome::Completed(report) => {
                tracing::info!(
                    "Provisioned '{}' in {:.1}s",
                    config.env_name,
                    report.duration.as_secs_f64()
                );
            }
            ProvisionOutcome::Declined => {}
            ProvisionOutcome::Planned(_) => {
                ui.message("");
                ui.message("Running in dry-run mode: no commands were executed.");
            }
        }

        Ok(CommandResult::success())
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.source.resolve(&self.args.overrides)?;
        let host = OsFamily::current();
        let locator = ToolLocator::conda(host, &config.candidate_paths);
        let mut runner = SystemRunner::new();
        self.run_with(&config, &mut runner, host, locator, ui)
    }
}
