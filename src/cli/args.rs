//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::ProvisionConfig;

/// mlenv - Provision a conda + Jupyter machine-learning environment.
#[derive(Debug, Parser)]
#[command(name = "mlenv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ./mlenv.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output; command output is shown only on failure
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Provision the environment (default if no command specified)
    Run(RunArgs),

    /// Show the commands a run would execute
    Plan(PlanArgs),

    /// Show where conda was found, or every location that was tried
    Locate,

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Overrides applied on top of the loaded config file.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigOverrides {
    /// Environment name (also the kernel's internal name)
    #[arg(long, value_name = "NAME")]
    pub env_name: Option<String>,

    /// Do not install the vision package bundle
    #[arg(long)]
    pub skip_vision: bool,

    /// Do not reinstall the pinned numerics + accelerator packages
    #[arg(long)]
    pub skip_numerics: bool,
}

impl ConfigOverrides {
    /// Apply the overrides to `config`.
    pub fn apply(&self, config: &mut ProvisionConfig) {
        if let Some(name) = &self.env_name {
            config.rename_env(name);
        }
        if self.skip_vision {
            config.install_vision = false;
        }
        if self.skip_numerics {
            config.install_numerics = false;
        }
    }
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub overrides: ConfigOverrides,

    /// Preview commands without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Answer the confirmation prompt up front
    #[arg(long, value_name = "TOKEN")]
    pub confirm: Option<String>,

    /// Never prompt; an unanswered confirmation cancels the run
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the `plan` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
