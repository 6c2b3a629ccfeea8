//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`] and load their configuration through a
//! shared [`ConfigSource`].

pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod locate;
pub mod plan;
pub mod run;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, ConfigSource};
