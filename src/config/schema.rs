//! Configuration schema for mlenv.
//!
//! Every field has a compiled-in default, so an empty (or absent)
//! `mlenv.yml` produces the reference setup: a Windows conda environment
//! with TensorFlow on DirectML plus a vision bundle.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::shell::OsFamily;

/// Default conda environment name.
pub const DEFAULT_ENV_NAME: &str = "ml-directml";

/// Default kernel display name, derived from [`DEFAULT_ENV_NAME`].
pub const DEFAULT_DISPLAY_NAME: &str = "Python (ml-directml)";

/// Kernel display name used when none is configured.
pub fn display_name_for(env_name: &str) -> String {
    format!("Python ({})", env_name)
}

/// Default interpreter pin for `conda create`.
pub const DEFAULT_PYTHON_VERSION: &str = "3.10";

/// Default confirmation token. Matched exactly, case-sensitive.
pub const DEFAULT_CONFIRM_TOKEN: &str = "SI";

/// Root configuration passed into the provisioning routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProvisionConfig {
    /// Conda environment name. Also used as the kernel's internal name.
    pub env_name: String,

    /// Human-readable label shown in the Jupyter kernel picker.
    pub display_name: String,

    /// Interpreter version passed as `python=<version>`.
    pub python_version: String,

    /// Operating-system family this environment targets.
    pub required_os: OsFamily,

    /// Install the vision/detection bundle.
    pub install_vision: bool,

    /// Force-reinstall the pinned numerics + accelerator pair.
    pub install_numerics: bool,

    /// Pinned numerics library.
    pub numerics: PinnedPackage,

    /// Pinned accelerator plugin. Must match the numerics library's ABI.
    pub accelerator: PinnedPackage,

    /// Python module imported by the smoke test.
    pub numerics_module: String,

    /// Vision bundle, installed in this order.
    pub vision_packages: Vec<String>,

    /// Extra conda locations, checked before the built-in candidates.
    pub candidate_paths: Vec<PathBuf>,

    /// Input required at the confirmation prompt.
    pub confirm_token: String,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            env_name: DEFAULT_ENV_NAME.to_string(),
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            python_version: DEFAULT_PYTHON_VERSION.to_string(),
            required_os: OsFamily::Windows,
            install_vision: true,
            install_numerics: true,
            numerics: PinnedPackage::new("tensorflow-cpu", "2.10.0"),
            accelerator: PinnedPackage::new("tensorflow-directml-plugin", "0.4.0.dev230202"),
            numerics_module: "tensorflow".to_string(),
            vision_packages: vec![
                "ultralytics".to_string(),
                "opencv-python".to_string(),
                "pillow".to_string(),
                "matplotlib".to_string(),
            ],
            candidate_paths: Vec::new(),
            confirm_token: DEFAULT_CONFIRM_TOKEN.to_string(),
        }
    }
}

impl ProvisionConfig {
    /// Switch to another environment name. A display name derived from the
    /// old name follows the new one; a custom label is kept.
    pub fn rename_env(&mut self, env_name: &str) {
        if self.display_name == display_name_for(&self.env_name) {
            self.display_name = display_name_for(env_name);
        }
        self.env_name = env_name.to_string();
    }
}

/// A package pinned to an exact version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PinnedPackage {
    /// Distribution name as pip knows it.
    pub package: String,
    /// Exact version.
    pub version: String,
}

impl PinnedPackage {
    /// Create a pin.
    pub fn new(package: &str, version: &str) -> Self {
        Self {
            package: package.to_string(),
            version: version.to_string(),
        }
    }

    /// Requirement specifier, e.g. `tensorflow-cpu==2.10.0`.
    pub fn requirement(&self) -> String {
        format!("{}=={}", self.package, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enables_both_bundles() {
        let config = ProvisionConfig::default();
        assert!(config.install_vision);
        assert!(config.install_numerics);
        assert_eq!(config.required_os, OsFamily::Windows);
    }

    #[test]
    fn pinned_package_requirement() {
        let pin = PinnedPackage::new("tensorflow-cpu", "2.10.0");
        assert_eq!(pin.requirement(), "tensorflow-cpu==2.10.0");
    }

    #[test]
    fn empty_yaml_yields_defaults() {
        let config: ProvisionConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, ProvisionConfig::default());
    }

    #[test]
    fn partial_yaml_overrides_only_given_fields() {
        let yaml = r#"
env_name: vision
install_numerics: false
required_os: linux
"#;
        let config: ProvisionConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.env_name, "vision");
        assert!(!config.install_numerics);
        assert_eq!(config.required_os, OsFamily::Linux);
        assert_eq!(config.display_name, DEFAULT_DISPLAY_NAME);
        assert_eq!(config.numerics.version, "2.10.0");
    }

    #[test]
    fn pins_parse_from_yaml() {
        let yaml = r#"
numerics:
  package: tensorflow
  version: "2.15.0"
accelerator:
  package: tensorflow-metal
  version: "1.1.0"
"#;
        let config: ProvisionConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.numerics.requirement(), "tensorflow==2.15.0");
        assert_eq!(config.accelerator.requirement(), "tensorflow-metal==1.1.0");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result: std::result::Result<ProvisionConfig, _> =
            serde_yaml::from_str("env_nmae: typo");
        assert!(result.is_err());
    }

    #[test]
    fn default_display_name_matches_default_env() {
        assert_eq!(display_name_for(DEFAULT_ENV_NAME), DEFAULT_DISPLAY_NAME);
    }

    #[test]
    fn rename_env_moves_derived_display_name() {
        let mut config = ProvisionConfig::default();
        config.rename_env("vision");
        assert_eq!(config.env_name, "vision");
        assert_eq!(config.display_name, "Python (vision)");
    }
}
