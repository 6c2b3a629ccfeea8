//! mlenv - Provision a conda environment for GPU-accelerated deep learning.
//!
//! mlenv creates a named conda environment, installs a vision package
//! bundle, force-reinstalls a pinned numerics library together with its
//! hardware-accelerator plugin, registers the environment as a Jupyter
//! kernel and runs a smoke test listing visible GPU devices. Nothing is
//! changed until the operator types the confirmation token.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`locator`] - Conda executable discovery
//! - [`provision`] - Provisioning plan, confirmation gate and workflow
//! - [`shell`] - Command execution and platform detection
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use mlenv::config::ProvisionConfig;
//! use mlenv::provision::{build_plan, Step};
//! use std::path::Path;
//!
//! let config = ProvisionConfig::default();
//! let plan = build_plan(&config, Path::new("conda"));
//!
//! let reinstall = plan.get(Step::InstallNumerics).unwrap();
//! assert!(reinstall.command.has_arg("--force-reinstall"));
//! assert!(reinstall.command.has_arg("tensorflow-cpu==2.10.0"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod locator;
pub mod provision;
pub mod shell;
pub mod ui;

pub use error::{MlenvError, Result};
