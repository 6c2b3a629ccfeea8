//! Package-manager executable discovery.
//!
//! Conda is frequently installed but not on PATH, especially on Windows where
//! the installer leaves PATH untouched by default. The [`ToolLocator`] runs an
//! ordered list of [`LocateStrategy`] values and stops at the first hit:
//!
//! 1. [`LocateStrategy::SearchPath`]: the directories on PATH
//! 2. [`LocateStrategy::Candidates`]: fixed file paths (user-configured
//!    extras first, then the built-in install locations)
//!
//! # Example
//!
//! ```no_run
//! use mlenv::locator::ToolLocator;
//! use mlenv::shell::OsFamily;
//!
//! let located = ToolLocator::conda(OsFamily::current(), &[]).locate();
//! match located.path {
//!     Some(path) => println!("conda at {}", path.display()),
//!     None => println!("tried {} locations", located.attempted.len()),
//! }
//! ```

pub mod candidates;
pub mod executable;

use std::path::PathBuf;

use crate::error::{MlenvError, Result};
use crate::shell::OsFamily;

pub use candidates::{builtin_candidates, conda_executable_names};
pub use executable::{is_executable, is_executable_file, parse_system_path, resolve_tool_path};

/// One way of finding the executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateStrategy {
    /// Look for any of the tool's executable names in these directories.
    SearchPath(Vec<PathBuf>),
    /// Check these exact file paths, in order.
    Candidates(Vec<PathBuf>),
}

impl LocateStrategy {
    /// Search the current process PATH.
    pub fn system_path() -> Self {
        LocateStrategy::SearchPath(parse_system_path())
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            LocateStrategy::SearchPath(_) => "PATH",
            LocateStrategy::Candidates(_) => "candidate paths",
        }
    }
}

/// Outcome of [`ToolLocator::locate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    /// Tool being located (e.g. "conda").
    pub tool: String,
    /// Resolved executable, if any strategy found one.
    pub path: Option<PathBuf>,
    /// Which strategy found it.
    pub found_by: Option<&'static str>,
    /// Every candidate path checked, in order.
    pub attempted: Vec<PathBuf>,
}

impl Located {
    /// The resolved path, or [`MlenvError::ToolNotFound`] listing every attempt.
    pub fn into_path(self) -> Result<PathBuf> {
        match self.path {
            Some(path) => Ok(path),
            None => Err(MlenvError::ToolNotFound {
                tool: self.tool,
                attempted: self.attempted,
            }),
        }
    }
}

/// Finds an executable by running strategies in order.
#[derive(Debug, Clone)]
pub struct ToolLocator {
    tool: String,
    names: Vec<String>,
    strategies: Vec<LocateStrategy>,
}

impl ToolLocator {
    /// Create a locator with no strategies.
    pub fn new(tool: &str, names: Vec<String>) -> Self {
        Self {
            tool: tool.to_string(),
            names,
            strategies: Vec::new(),
        }
    }

    /// Append a strategy; strategies run in insertion order.
    pub fn with_strategy(mut self, strategy: LocateStrategy) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// The standard conda locator: PATH, then `extra` candidates, then the
    /// built-in install locations for `os`.
    pub fn conda(os: OsFamily, extra: &[PathBuf]) -> Self {
        let home = dirs::home_dir();
        let mut candidates = extra.to_vec();
        candidates.extend(builtin_candidates(os, home.as_deref()));

        Self::new("conda", conda_executable_names(os))
            .with_strategy(LocateStrategy::system_path())
            .with_strategy(LocateStrategy::Candidates(candidates))
    }

    /// Tool name.
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Configured strategies, in order.
    pub fn strategies(&self) -> &[LocateStrategy] {
        &self.strategies
    }

    /// Run the strategies and return the first hit plus everything tried.
    pub fn locate(&self) -> Located {
        let mut attempted = Vec::new();

        for strategy in &self.strategies {
            let found = match strategy {
                LocateStrategy::SearchPath(entries) => resolve_tool_path(&self.names, entries),
                LocateStrategy::Candidates(paths) => paths.iter().find_map(|candidate| {
                    attempted.push(candidate.clone());
                    is_executable_file(candidate).then(|| candidate.clone())
                }),
            };

            if let Some(path) = found {
                tracing::debug!(
                    "Found {} via {}: {}",
                    self.tool,
                    strategy.label(),
                    path.display()
                );
                return Located {
                    tool: self.tool.clone(),
                    path: Some(path),
                    found_by: Some(strategy.label()),
                    attempted,
                };
            }
            tracing::debug!("{} not found via {}", self.tool, strategy.label());
        }

        Located {
            tool: self.tool.clone(),
            path: None,
            found_by: None,
            attempted,
        }
    }
}
