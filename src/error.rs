//! Error types for mlenv operations.
//!
//! This module defines [`MlenvError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `MlenvError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `MlenvError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users
//!
//! A declined confirmation is not an error: it is reported through
//! [`ProvisionOutcome::Declined`](crate::provision::ProvisionOutcome).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for mlenv operations.
#[derive(Debug, Error)]
pub enum MlenvError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The host operating system is not the one this environment targets.
    #[error("Unsupported platform: this setup requires {required}, but is running on {actual}")]
    UnsupportedPlatform { required: String, actual: String },

    /// The package manager executable could not be located.
    #[error(
        "Could not find '{tool}'. Tried:\n{}\nAdd the path to your installation under `candidate_paths` in mlenv.yml",
        format_attempted(.attempted)
    )]
    ToolNotFound {
        tool: String,
        attempted: Vec<PathBuf>,
    },

    /// Subprocess exited non-zero (or could not be spawned).
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn format_attempted(attempted: &[PathBuf]) -> String {
    if attempted.is_empty() {
        return "  (no candidate paths)".to_string();
    }
    attempted
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result type alias for mlenv operations.
pub type Result<T> = std::result::Result<T, MlenvError>;
