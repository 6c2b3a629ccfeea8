//! Recording command runner for testing.
//!
//! `RecordingRunner` implements [`CommandRunner`] without spawning anything.
//! It records every command it is asked to run and succeeds unless a
//! configured failure rule matches.
//!
//! # Example
//!
//! ```
//! use mlenv::shell::{CommandOptions, CommandRunner, CommandSpec, RecordingRunner};
//!
//! let mut runner = RecordingRunner::new();
//! runner.fail_on(&["create"], Some(1));
//!
//! let create = CommandSpec::new("conda").args(["create", "-n", "ml"]);
//! let result = runner.run(&create, &CommandOptions::default()).unwrap();
//! assert!(!result.success);
//!
//! assert_eq!(runner.commands().len(), 1);
//! ```

use std::time::Duration;

use crate::error::{MlenvError, Result};

use super::command::{CommandOptions, CommandResult, CommandRunner, CommandSpec};

#[derive(Debug, Clone)]
struct FailureRule {
    args: Vec<String>,
    outcome: FailureOutcome,
}

#[derive(Debug, Clone, Copy)]
enum FailureOutcome {
    Exit(Option<i32>),
    SpawnError,
}

/// Command runner that records invocations instead of running them.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: Vec<CommandSpec>,
    options: Vec<CommandOptions>,
    rules: Vec<FailureRule>,
    stdout: String,
}

impl RecordingRunner {
    /// Create a runner where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make commands containing `args` (contiguously) exit with `code`.
    pub fn fail_on(&mut self, args: &[&str], code: Option<i32>) {
        self.rules.push(FailureRule {
            args: args.iter().map(|s| s.to_string()).collect(),
            outcome: FailureOutcome::Exit(code),
        });
    }

    /// Make commands containing `args` fail to spawn at all.
    pub fn spawn_error_on(&mut self, args: &[&str]) {
        self.rules.push(FailureRule {
            args: args.iter().map(|s| s.to_string()).collect(),
            outcome: FailureOutcome::SpawnError,
        });
    }

    /// Stdout returned for every successful command.
    pub fn set_stdout(&mut self, stdout: &str) {
        self.stdout = stdout.to_string();
    }

    /// Every command run so far, in order.
    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    /// Options each command was run with, parallel to [`commands`](Self::commands).
    pub fn options(&self) -> &[CommandOptions] {
        &self.options
    }

    /// Commands rendered as strings, for readable assertions.
    pub fn command_lines(&self) -> Vec<String> {
        self.commands.iter().map(|c| c.to_string()).collect()
    }

    fn matching_rule(&self, spec: &CommandSpec) -> Option<FailureOutcome> {
        self.rules
            .iter()
            .find(|rule| {
                let needle: Vec<&str> = rule.args.iter().map(String::as_str).collect();
                spec.has_args(&needle)
            })
            .map(|rule| rule.outcome)
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, spec: &CommandSpec, options: &CommandOptions) -> Result<CommandResult> {
        self.commands.push(spec.clone());
        self.options.push(options.clone());

        match self.matching_rule(spec) {
            Some(FailureOutcome::Exit(code)) => Ok(CommandResult::failure(
                code,
                String::new(),
                "simulated failure".to_string(),
                Duration::ZERO,
            )),
            Some(FailureOutcome::SpawnError) => Err(MlenvError::CommandFailed {
                command: spec.to_string(),
                code: None,
            }),
            None => Ok(CommandResult::success(
                self.stdout.clone(),
                String::new(),
                Duration::ZERO,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut runner = RecordingRunner::new();
        let opts = CommandOptions::default();
        runner
            .run(&CommandSpec::new("a").arg("1"), &opts)
            .unwrap();
        runner
            .run(&CommandSpec::new("b").arg("2"), &opts)
            .unwrap();
        assert_eq!(runner.command_lines(), vec!["a 1", "b 2"]);
        assert_eq!(runner.options().len(), 2);
    }

    #[test]
    fn unmatched_commands_succeed() {
        let mut runner = RecordingRunner::new();
        runner.fail_on(&["create"], Some(1));
        let result = runner
            .run(
                &CommandSpec::new("conda").arg("run"),
                &CommandOptions::default(),
            )
            .unwrap();
        assert!(result.success);
    }

    #[test]
    fn spawn_error_rule_returns_error() {
        let mut runner = RecordingRunner::new();
        runner.spawn_error_on(&["run"]);
        let result = runner.run(
            &CommandSpec::new("conda").arg("run"),
            &CommandOptions::default(),
        );
        assert!(result.is_err());
        assert_eq!(runner.commands().len(), 1);
    }

    #[test]
    fn stdout_is_returned_on_success() {
        let mut runner = RecordingRunner::new();
        runner.set_stdout("2.10.0\n");
        let result = runner
            .run(&CommandSpec::new("python"), &CommandOptions::default())
            .unwrap();
        assert_eq!(result.stdout, "2.10.0\n");
    }
}
