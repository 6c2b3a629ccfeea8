//! External command execution and platform detection.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{
    execute, CommandOptions, CommandResult, CommandRunner, CommandSpec, SystemRunner,
};
pub use mock::RecordingRunner;
pub use platform::{check_platform, is_ci, OsFamily};
