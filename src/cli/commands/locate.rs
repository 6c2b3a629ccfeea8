//! Locate command implementation.
//!
//! The `mlenv locate` command runs conda discovery on its own.

use crate::cli::args::ConfigOverrides;
use crate::error::Result;
use crate::locator::{Located, ToolLocator};
use crate::shell::OsFamily;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ConfigSource};

/// The locate command implementation.
pub struct LocateCommand {
    source: ConfigSource,
}

impl LocateCommand {
    /// Create a new locate command.
    pub fn new(source: ConfigSource) -> Self {
        Self { source }
    }
}

/// Report a locator result. Returns the exit code.
fn report(ui: &mut dyn UserInterface, located: &Located) -> i32 {
    match (&located.path, located.found_by) {
        (Some(path), found_by) => {
            ui.success(&format!(
                "{} found via {}: {}",
                located.tool,
                found_by.unwrap_or("unknown"),
                path.display()
            ));
            0
        }
        (None, _) => {
            ui.error(&format!("{} not found", located.tool));
            ui.message(&format!(
                "Searched PATH, then {} candidate paths:",
                located.attempted.len()
            ));
            for path in &located.attempted {
                ui.message(&format!("  tried {}", path.display()));
            }
            ui.show_hint("Add your install location under `candidate_paths` in mlenv.yml");
            1
        }
    }
}

impl Command for LocateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.source.resolve(&ConfigOverrides::default())?;
        let located = ToolLocator::conda(OsFamily::current(), &config.candidate_paths).locate();

        match report(ui, &located) {
            0 => Ok(CommandResult::success()),
            code => Ok(CommandResult::failure(code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::path::PathBuf;

    #[test]
    fn report_found() {
        let located = Located {
            tool: "conda".to_string(),
            path: Some(PathBuf::from("/opt/conda/bin/conda")),
            found_by: Some("PATH"),
            attempted: vec![],
        };
        let mut ui = MockUI::new();
        assert_eq!(report(&mut ui, &located), 0);
        assert!(ui.has_success("found via PATH"));
    }

    #[test]
    fn report_not_found_lists_attempts() {
        let located = Located {
            tool: "conda".to_string(),
            path: None,
            found_by: None,
            attempted: vec![
                PathBuf::from("/a/conda"),
                PathBuf::from("/b/conda"),
            ],
        };
        let mut ui = MockUI::new();
        assert_eq!(report(&mut ui, &located), 1);
        assert!(ui.has_problem("conda not found"));
        assert!(!ui.has_problem("on PATH"));
        assert!(ui.has_message("Searched PATH, then 2 candidate paths"));
        assert!(ui.has_message("tried /a/conda"));
        assert!(ui.has_message("tried /b/conda"));
        assert!(ui.has_hint("candidate_paths"));
    }
}
