//! Config command implementation.
//!
//! The `mlenv config` command shows the resolved configuration.

use crate::cli::args::{ConfigArgs, ConfigOverrides};
use crate::config::find_config_file;
use crate::error::{MlenvError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ConfigSource};

/// The config command implementation.
pub struct ConfigCommand {
    source: ConfigSource,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(source: ConfigSource, args: ConfigArgs) -> Self {
        Self { source, args }
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.source.resolve(&ConfigOverrides::default())?;

        let path = self
            .source
            .explicit
            .clone()
            .or_else(|| find_config_file(&self.source.working_dir));
        match path {
            Some(p) => ui.message(&format!("# {}", p.display())),
            None => ui.message("# built-in defaults"),
        }

        if self.args.json {
            let json =
                serde_json::to_string_pretty(&config).map_err(|e| MlenvError::Other(e.into()))?;
            ui.message(&json);
        } else {
            let yaml = serde_yaml::to_string(&config).map_err(|e| MlenvError::Other(e.into()))?;
            ui.message(&yaml);
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn source(dir: &TempDir) -> ConfigSource {
        ConfigSource {
            working_dir: dir.path().to_path_buf(),
            explicit: None,
        }
    }

    #[test]
    fn shows_defaults_without_file() {
        let temp = TempDir::new().unwrap();
        let cmd = ConfigCommand::new(source(&temp), ConfigArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("# built-in defaults"));
        assert!(ui.has_message("env_name: ml-directml"));
    }

    #[test]
    fn shows_config_path_and_values() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("mlenv.yml"), "env_name: vision\n").unwrap();
        let cmd = ConfigCommand::new(source(&temp), ConfigArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message("mlenv.yml"));
        assert!(ui.has_message("env_name: vision"));
    }

    #[test]
    fn json_output() {
        let temp = TempDir::new().unwrap();
        let cmd = ConfigCommand::new(source(&temp), ConfigArgs { json: true });
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message("\"env_name\": \"ml-directml\""));
        assert!(ui.has_message("\"required_os\": \"windows\""));
    }

    #[test]
    fn invalid_config_fails() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("mlenv.yml"), "confirm_token: \"\"\n").unwrap();
        let cmd = ConfigCommand::new(source(&temp), ConfigArgs::default());
        let mut ui = MockUI::new();

        assert!(cmd.execute(&mut ui).is_err());
    }
}
