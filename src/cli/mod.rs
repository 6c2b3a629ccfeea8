//! Command-line interface for mlenv.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    Cli, Commands, CompletionsArgs, ConfigArgs, ConfigOverrides, PlanArgs, RunArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult, ConfigSource};
