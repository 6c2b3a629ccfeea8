//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use crate::error::{MlenvError, Result};

use super::Prompt;

/// Convert dialoguer errors to MlenvError.
fn map_dialoguer_err(e: dialoguer::Error) -> MlenvError {
    MlenvError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Prompt the user for free-form input. Pressing enter returns "".
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<String> {
    let theme = prompt_theme();
    Input::<String>::with_theme(&theme)
        .with_prompt(&prompt.question)
        .allow_empty(true)
        .interact_on(term)
        .map_err(map_dialoguer_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_dialoguer_err_wraps_io() {
        let io = std::io::Error::new(std::io::ErrorKind::Interrupted, "ctrl-c");
        let err = map_dialoguer_err(dialoguer::Error::IO(io));
        assert!(matches!(err, MlenvError::Io(_)));
    }
}
