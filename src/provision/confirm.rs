//! Confirmation gate.

use crate::error::Result;
use crate::ui::{Prompt, UserInterface};

/// Prompt key, also used for the `MLENV_PROMPT_CONFIRM` override.
pub const CONFIRM_PROMPT_KEY: &str = "confirm";

/// Whether `answer` is exactly `token`. Case-sensitive, no trimming.
pub fn is_confirmed(answer: &str, token: &str) -> bool {
    answer == token
}

/// Ask the user to type `token`.
///
/// An unanswerable prompt (non-interactive, no override) reads as empty
/// input and therefore declines.
pub fn confirm(ui: &mut dyn UserInterface, token: &str) -> Result<bool> {
    let prompt = Prompt::new(CONFIRM_PROMPT_KEY, &format!("Type {} to continue", token));

    let answer = ui.prompt(&prompt)?;
    Ok(is_confirmed(&answer, token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    #[test]
    fn exact_match_confirms() {
        assert!(is_confirmed("SI", "SI"));
    }

    #[test]
    fn anything_else_declines() {
        for answer in ["", "si", "Si", "SI ", " SI", "S", "yes", "SII"] {
            assert!(!is_confirmed(answer, "SI"), "{:?} should decline", answer);
        }
    }

    #[test]
    fn confirm_reads_prompt_response() {
        let mut ui = MockUI::new();
        ui.set_prompt_response(CONFIRM_PROMPT_KEY, "SI");
        assert!(confirm(&mut ui, "SI").unwrap());
    }

    #[test]
    fn unanswered_prompt_declines() {
        let mut ui = MockUI::new();
        assert!(!confirm(&mut ui, "SI").unwrap());
        assert_eq!(ui.prompts_shown(), &[CONFIRM_PROMPT_KEY.to_string()]);
    }
}
