//! Configuration validation.
//!
//! Validation collects every problem before failing so the user can fix
//! the file in one pass.

use std::collections::HashSet;

use crate::config::schema::{PinnedPackage, ProvisionConfig};
use crate::error::{MlenvError, Result};

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a config and return every problem found.
pub fn validate_config(config: &ProvisionConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    require_non_blank(&mut errors, "env_name", &config.env_name);
    if config
        .env_name
        .chars()
        .any(|c| c.is_whitespace() || c == '/' || c == '\\')
    {
        errors.push(ValidationError::new(
            "env_name",
            "must not contain whitespace or path separators",
        ));
    }

    require_non_blank(&mut errors, "display_name", &config.display_name);
    require_non_blank(&mut errors, "python_version", &config.python_version);
    require_non_blank(&mut errors, "numerics_module", &config.numerics_module);
    require_non_blank(&mut errors, "confirm_token", &config.confirm_token);

    validate_pin(&mut errors, "numerics", &config.numerics);
    validate_pin(&mut errors, "accelerator", &config.accelerator);

    let mut seen = HashSet::new();
    for (i, package) in config.vision_packages.iter().enumerate() {
        let field = format!("vision_packages[{}]", i);
        if package.trim().is_empty() {
            errors.push(ValidationError::new(&field, "must not be blank"));
            continue;
        }
        if !seen.insert(package.to_lowercase()) {
            errors.push(ValidationError::new(
                &field,
                format!("'{}' is listed more than once", package),
            ));
        }
        // A second, unpinned install of a pinned package would break the pair.
        if names_package(package, &config.numerics) || names_package(package, &config.accelerator)
        {
            errors.push(ValidationError::new(
                &field,
                format!("'{}' is pinned and must not be in the vision bundle", package),
            ));
        }
    }

    if config.install_vision && config.vision_packages.is_empty() {
        errors.push(ValidationError::new(
            "vision_packages",
            "must not be empty while install_vision is enabled",
        ));
    }

    errors
}

/// Validate a config, failing with all problems joined into one message.
pub fn validate(config: &ProvisionConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    Err(MlenvError::ConfigValidationError { message })
}

fn require_non_blank(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, "must not be empty"));
    }
}

fn validate_pin(errors: &mut Vec<ValidationError>, field: &str, pin: &PinnedPackage) {
    require_non_blank(errors, &format!("{}.package", field), &pin.package);
    require_non_blank(errors, &format!("{}.version", field), &pin.version);
}

/// Whether a requirement string refers to the pinned distribution,
/// ignoring any version specifier and pip's `-`/`_` equivalence.
fn names_package(requirement: &str, pin: &PinnedPackage) -> bool {
    let name = requirement
        .split(|c: char| matches!(c, '=' | '<' | '>' | '!' | '~' | '[' | ';' | ' '))
        .next()
        .unwrap_or("");
    normalize(name) == normalize(&pin.package)
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase().replace('_', "-")
}
