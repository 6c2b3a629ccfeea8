//! Plan command implementation.
//!
//! The `mlenv plan` command prints the invocations a run would make. It
//! skips the platform guard so a plan can be previewed from any machine,
//! and falls back to a bare `conda` when the executable can't be found.

use std::path::PathBuf;

use crate::cli::args::PlanArgs;
use crate::error::Result;
use crate::locator::ToolLocator;
use crate::provision::{build_plan, show_plan};
use crate::shell::OsFamily;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ConfigSource};

/// The plan command implementation.
pub struct PlanCommand {
    source: ConfigSource,
    args: PlanArgs,
}

impl PlanCommand {
    /// Create a new plan command.
    pub fn new(source: ConfigSource, args: PlanArgs) -> Self {
        Self { source, args }
    }
}

impl Command for PlanCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.source.resolve(&self.args.overrides)?;

        let located = ToolLocator::conda(OsFamily::current(), &config.candidate_paths).locate();
        let conda = match located.path {
            Some(path) => path,
            None => {
                ui.warning("conda not found; showing commands with a bare `conda`");
                PathBuf::from("conda")
            }
        };

        ui.show_header(&format!("Plan for '{}'", config.env_name));
        show_plan(ui, &build_plan(&config, &conda));
        Ok(CommandResult::success())
    }
}
