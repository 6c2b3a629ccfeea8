//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;

use super::{
    prompt_user, should_use_colors, tail_lines, MlenvTheme, NonInteractiveUI, OutputMode,
    ProgressSpinner, Prompt, SpinnerHandle, UserInterface, ERROR_TAIL_LINES,
};

/// Styled output on a real terminal, with dialoguer prompts and indicatif
/// spinners.
pub struct TerminalUI {
    term: Term,
    theme: MlenvTheme,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            MlenvTheme::new()
        } else {
            MlenvTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
        }
    }

    fn line(&mut self, text: impl std::fmt::Display) {
        writeln!(self.term, "{}", text).ok();
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.line(msg);
    }

    fn success(&mut self, msg: &str) {
        let text = self.theme.format_success(msg);
        self.line(text);
    }

    fn warning(&mut self, msg: &str) {
        let text = self.theme.format_warning(msg);
        self.line(text);
    }

    fn error(&mut self, msg: &str) {
        let text = self.theme.format_error(msg);
        self.line(text);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<String> {
        prompt_user(prompt, &self.term)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(ProgressSpinner::new(message, self.theme.clone()))
    }

    fn show_header(&mut self, title: &str) {
        let text = format!("\n{}\n", self.theme.format_header(title));
        self.line(text);
    }

    fn show_command(&mut self, command: &str) {
        let text = self.theme.format_command(command);
        self.line(text);
    }

    fn show_hint(&mut self, hint: &str) {
        let text = format!("  {}", self.theme.hint.apply_to(hint));
        self.line(text);
    }

    fn show_error_block(&mut self, command: &str, output: &str) {
        let bar = self.theme.border.apply_to("│").to_string();
        let top = format!("    {}", self.theme.border.apply_to("┌─ failed ─────────────────────────"));
        let bottom = format!("    {}", self.theme.border.apply_to("└──────────────────────────────────"));

        self.line(top);
        let cmd = format!("    {} {}", bar, self.theme.command.apply_to(command));
        self.line(cmd);

        let (cut, lines) = tail_lines(output, ERROR_TAIL_LINES);
        if cut > 0 {
            let note = format!("    {} {}", bar, self.theme.dim.apply_to(format!("... {} earlier lines", cut)));
            self.line(note);
        }
        for l in lines {
            let text = format!("    {} {}", bar, l);
            self.line(text);
        }
        self.line(bottom);
    }
}

/// Pick the terminal UI when `interactive` is set and stdout is a TTY,
/// otherwise the plain-line UI.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_output_mode() {
        let ui = TerminalUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn create_ui_keeps_mode_without_tty() {
        let ui = create_ui(false, OutputMode::Verbose);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }
}
