//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands, ConfigOverrides, RunArgs};
use crate::config::{load_config, validate, ProvisionConfig};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Where a command gets its configuration from.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Directory searched for `mlenv.yml`.
    pub working_dir: PathBuf,
    /// Explicit `--config` path.
    pub explicit: Option<PathBuf>,
}

impl ConfigSource {
    /// Load, apply CLI overrides, and validate.
    pub fn resolve(&self, overrides: &ConfigOverrides) -> Result<ProvisionConfig> {
        let mut config = load_config(self.explicit.as_deref(), &self.working_dir)?;
        overrides.apply(&mut config);
        validate(&config)?;
        Ok(config)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    source: ConfigSource,
}

impl CommandDispatcher {
    /// Create a new dispatcher.
    pub fn new(working_dir: PathBuf, explicit_config: Option<PathBuf>) -> Self {
        Self {
            source: ConfigSource {
                working_dir,
                explicit: explicit_config,
            },
        }
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Run(args)) => {
                let cmd = super::run::RunCommand::new(self.source.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Plan(args)) => {
                let cmd = super::plan::PlanCommand::new(self.source.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Locate) => {
                let cmd = super::locate::LocateCommand::new(self.source.clone());
                cmd.execute(ui)
            }
            Some(Commands::Config(args)) => {
                let cmd = super::config::ConfigCommand::new(self.source.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                // Default to run command with default args
                let cmd = super::run::RunCommand::new(self.source.clone(), RunArgs::default());
                cmd.execute(ui)
            }
        }
    }
}
