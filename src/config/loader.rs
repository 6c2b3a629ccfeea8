//! Configuration file discovery and loading.
//!
//! Lookup order:
//! 1. An explicit path (`--config`), which must exist
//! 2. `mlenv.yml` in the working directory, if present
//! 3. Compiled-in defaults

use crate::config::schema::{display_name_for, ProvisionConfig};
use crate::error::{MlenvError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "mlenv.yml";

/// Find `mlenv.yml` in the given directory.
pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Parse YAML content into a config. `path` is only used for error messages.
///
/// Without a `display_name` key the kernel label follows `env_name`.
pub fn parse_config(content: &str, path: &Path) -> Result<ProvisionConfig> {
    // An empty file deserializes as YAML null, not as an empty mapping.
    if content.trim().is_empty() {
        return Ok(ProvisionConfig::default());
    }

    let parse_error = |e: serde_yaml::Error| MlenvError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let mut config: ProvisionConfig = serde_yaml::from_str(content).map_err(parse_error)?;

    let raw: serde_yaml::Value = serde_yaml::from_str(content).map_err(parse_error)?;
    if raw.get("display_name").is_none() {
        config.display_name = display_name_for(&config.env_name);
    }

    Ok(config)
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ProvisionConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MlenvError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MlenvError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Load the effective configuration.
///
/// An explicit path wins; otherwise `mlenv.yml` in `working_dir` is used if
/// present, and defaults otherwise.
pub fn load_config(explicit: Option<&Path>, working_dir: &Path) -> Result<ProvisionConfig> {
    if let Some(path) = explicit {
        tracing::debug!("Loading config from {}", path.display());
        return load_config_file(path);
    }

    match find_config_file(working_dir) {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        None => {
            tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
            Ok(ProvisionConfig::default())
        }
    }
}
