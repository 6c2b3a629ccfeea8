//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::Result;

use super::{tail_lines, OutputMode, Prompt, SpinnerHandle, UserInterface, ERROR_TAIL_LINES};

/// Prefix of environment variables that answer prompts by key.
pub const PROMPT_ENV_PREFIX: &str = "MLENV_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Plain lines, no cursor movement. Prompts are answered from
/// `MLENV_PROMPT_<KEY>` variables and read as empty otherwise.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }

    fn override_for(&self, key: &str) -> Option<&String> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, key.to_uppercase());
        self.env_overrides.get(&env_key)
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("⚠ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<String> {
        match self.override_for(&prompt.key) {
            Some(value) => Ok(value.clone()),
            None => {
                tracing::debug!("No answer for prompt '{}' in non-interactive mode", prompt.key);
                Ok(String::new())
            }
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        println!("  {}...", message);
        Box::new(LineSpinner)
    }

    fn show_header(&mut self, title: &str) {
        println!("\n{}\n", title);
    }

    fn show_command(&mut self, command: &str) {
        println!("$ {}", command);
    }

    fn show_hint(&mut self, hint: &str) {
        println!("  {}", hint);
    }

    fn show_error_block(&mut self, command: &str, output: &str) {
        eprintln!("    Command: {}", command);
        let (cut, lines) = tail_lines(output, ERROR_TAIL_LINES);
        if cut > 0 {
            eprintln!("    | ... {} earlier lines", cut);
        }
        for line in lines {
            eprintln!("    | {}", line);
        }
    }
}

/// Spinner stand-in that prints one status line when it finishes.
struct LineSpinner;

impl SpinnerHandle for LineSpinner {
    fn finish_success(&mut self, msg: &str) {
        println!("  ✓ {}", msg);
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("  ✗ {}", msg);
    }

    fn finish_skipped(&mut self, msg: &str) {
        println!("  ○ {}", msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unanswered_prompt_is_empty() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let prompt = Prompt::new("confirm", "Type SI");
        assert_eq!(ui.prompt(&prompt).unwrap(), "");
    }

    #[test]
    fn prompt_uses_env_override() {
        let mut overrides = HashMap::new();
        overrides.insert("MLENV_PROMPT_CONFIRM".to_string(), "SI".to_string());
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);
        let prompt = Prompt::new("confirm", "Type SI");
        assert_eq!(ui.prompt(&prompt).unwrap(), "SI");
    }

    #[test]
    fn override_lookup_uppercases_key() {
        let mut overrides = HashMap::new();
        overrides.insert("MLENV_PROMPT_CONFIRM".to_string(), "no".to_string());
        let ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);
        assert_eq!(ui.override_for("confirm").map(String::as_str), Some("no"));
        assert!(ui.override_for("other").is_none());
    }

    #[test]
    fn output_mode_preserved() {
        let ui = NonInteractiveUI::with_overrides(OutputMode::Quiet, HashMap::new());
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }
}
