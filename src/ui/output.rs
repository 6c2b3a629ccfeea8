//! Output mode.

/// How much of a run reaches the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Command output streams through, plus per-step timings.
    Verbose,
    /// Command output streams through.
    #[default]
    Normal,
    /// Command output is captured behind a spinner and shown only when a
    /// step fails.
    Quiet,
}

impl OutputMode {
    /// Whether subprocess output goes straight to the terminal.
    pub fn shows_command_output(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Whether each step's duration is reported.
    pub fn shows_timings(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}

/// Lines shown from the end of a failed command's captured output.
pub const ERROR_TAIL_LINES: usize = 30;

/// The last `max` lines of `output`, plus how many earlier lines were cut.
///
/// pip and conda print long progress logs; the failure reason is at the end.
pub fn tail_lines(output: &str, max: usize) -> (usize, Vec<&str>) {
    let lines: Vec<&str> = output.lines().collect();
    let cut = lines.len().saturating_sub(max);
    (cut, lines[cut..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_quiet_captures() {
        assert!(OutputMode::Verbose.shows_command_output());
        assert!(OutputMode::Normal.shows_command_output());
        assert!(!OutputMode::Quiet.shows_command_output());
    }

    #[test]
    fn only_verbose_times_steps() {
        assert!(OutputMode::Verbose.shows_timings());
        assert!(!OutputMode::Normal.shows_timings());
        assert!(!OutputMode::Quiet.shows_timings());
    }

    #[test]
    fn output_mode_default() {
        assert_eq!(OutputMode::default(), OutputMode::Normal);
    }

    #[test]
    fn tail_keeps_short_output() {
        let (cut, lines) = tail_lines("a\nb\n", 5);
        assert_eq!(cut, 0);
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn tail_cuts_long_output() {
        let output = (1..=10).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let (cut, lines) = tail_lines(&output, 3);
        assert_eq!(cut, 7);
        assert_eq!(lines, vec!["8", "9", "10"]);
    }
}
