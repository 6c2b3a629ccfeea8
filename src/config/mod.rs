//! Configuration loading, parsing, and validation for mlenv.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use mlenv::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("mlenv.yml"), "env_name: vision").unwrap();
//!
//! let config = load_config(None, temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.env_name, "vision");
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{find_config_file, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::{
    display_name_for, PinnedPackage, ProvisionConfig, DEFAULT_CONFIRM_TOKEN, DEFAULT_DISPLAY_NAME,
    DEFAULT_ENV_NAME, DEFAULT_PYTHON_VERSION,
};
pub use validator::{validate, validate_config, ValidationError};

#[cfg(test)]
mod tests {
    #[test]
    fn serde_yaml_round_trips_default_config() {
        let config = super::ProvisionConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("env_name: ml-directml"));
        let parsed: super::ProvisionConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
