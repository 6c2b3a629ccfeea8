//! The provisioning routine.
//!
//! Guard → Locate → Confirm → Build → Install → Register, strictly in
//! order. Disabled steps are skipped, a failed environment creation is
//! tolerated, and any other failure ends the run.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::ProvisionConfig;
use crate::error::{MlenvError, Result};
use crate::locator::ToolLocator;
use crate::shell::{check_platform, CommandOptions, CommandRunner, OsFamily};
use crate::ui::UserInterface;

use super::confirm::{confirm, is_confirmed};
use super::plan::{build_plan, FailurePolicy, Plan, PlannedStep, Step};

/// Per-run switches that are not part of the environment definition.
#[derive(Debug, Clone, Default)]
pub struct ProvisionOptions {
    /// Print the plan and stop before the confirmation gate.
    pub dry_run: bool,

    /// Answer for the confirmation gate; prompts when `None`.
    pub confirm_answer: Option<String>,
}

/// How a step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Ran and exited zero.
    Completed,
    /// Failed, but its failure policy let the run continue.
    Tolerated,
    /// Turned off by a feature toggle.
    Skipped,
}

/// Record of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: Step,
    pub status: StepStatus,
    pub duration: Duration,
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    /// Resolved conda executable.
    pub conda: PathBuf,
    /// Every step, in order.
    pub steps: Vec<StepReport>,
    /// Wall time from the first invocation to the last.
    pub duration: Duration,
}

impl ProvisionReport {
    /// Status of a given step.
    pub fn status(&self, step: Step) -> Option<StepStatus> {
        self.steps.iter().find(|r| r.step == step).map(|r| r.status)
    }
}

/// Result of [`Provisioner::run`] when nothing fatal happened.
#[derive(Debug, Clone)]
pub enum ProvisionOutcome {
    /// Every enabled step ran.
    Completed(ProvisionReport),
    /// The confirmation token did not match; nothing was changed.
    Declined,
    /// Dry run: the plan that would have run.
    Planned(Plan),
}

/// Runs the provisioning flow against a command runner.
pub struct Provisioner<'a> {
    config: &'a ProvisionConfig,
    runner: &'a mut dyn CommandRunner,
    locator: ToolLocator,
    host: OsFamily,
    options: ProvisionOptions,
}

impl<'a> Provisioner<'a> {
    /// Create a provisioner for the current host with the standard conda
    /// locator.
    pub fn new(config: &'a ProvisionConfig, runner: &'a mut dyn CommandRunner) -> Self {
        let host = OsFamily::current();
        Self {
            config,
            runner,
            locator: ToolLocator::conda(host, &config.candidate_paths),
            host,
            options: ProvisionOptions::default(),
        }
    }

    /// Replace the locator (tests use one that needs no real install).
    pub fn with_locator(mut self, locator: ToolLocator) -> Self {
        self.locator = locator;
        self
    }

    /// Pretend to run on a different OS family.
    pub fn with_host(mut self, host: OsFamily) -> Self {
        self.host = host;
        self
    }

    /// Set per-run options.
    pub fn with_options(mut self, options: ProvisionOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the whole flow.
    pub fn run(mut self, ui: &mut dyn UserInterface) -> Result<ProvisionOutcome> {
        let config = self.config;
        ui.show_header(&format!("mlenv · {}", config.env_name));

        // Guard
        check_platform(config.required_os, self.host)?;
        tracing::debug!("Platform check passed ({})", self.host);

        // Locate
        let conda = self.locator.locate().into_path()?;
        ui.success(&format!("Found conda at {}", conda.display()));

        let plan = build_plan(config, &conda);
        show_summary(ui, config);

        if self.options.dry_run {
            show_plan(ui, &plan);
            return Ok(ProvisionOutcome::Planned(plan));
        }

        // Confirm
        let confirmed = match &self.options.confirm_answer {
            Some(answer) => is_confirmed(answer, &config.confirm_token),
            None => confirm(ui, &config.confirm_token)?,
        };
        if !confirmed {
            tracing::info!("Confirmation token not entered, stopping");
            ui.message("Cancelled. Nothing was changed.");
            return Ok(ProvisionOutcome::Declined);
        }

        // Build, Install, Register
        let start = Instant::now();
        let mut reports = Vec::with_capacity(plan.steps().len());
        for planned in plan.steps() {
            let report = if planned.enabled {
                self.run_step(ui, planned)?
            } else {
                tracing::debug!("Skipping {} (disabled)", planned.step);
                StepReport {
                    step: planned.step,
                    status: StepStatus::Skipped,
                    duration: Duration::ZERO,
                }
            };
            reports.push(report);
        }

        let report = ProvisionReport {
            conda,
            steps: reports,
            duration: start.elapsed(),
        };

        ui.success(&format!(
            "Kernel '{}' is ready (environment '{}')",
            config.display_name, config.env_name
        ));
        if config.install_numerics {
            ui.show_hint("Check the device list above: an empty list means no accelerator is visible.");
        }

        Ok(ProvisionOutcome::Completed(report))
    }

    fn run_step(&mut self, ui: &mut dyn UserInterface, planned: &PlannedStep) -> Result<StepReport> {
        let mode = ui.output_mode();
        let capture = !mode.shows_command_output();
        let options = CommandOptions {
            capture_output: capture,
        };
        let command_line = planned.command.to_string();

        ui.show_command(&command_line);
        tracing::debug!("Running {}: {}", planned.step, command_line);

        let mut spinner = capture.then(|| ui.start_spinner(planned.step.description()));
        let start = Instant::now();
        let result = self.runner.run(&planned.command, &options);
        let duration = start.elapsed();

        let failure = match &result {
            Ok(r) if r.success => None,
            Ok(r) => Some((r.exit_code, r.combined_output())),
            Err(e) => Some((None, e.to_string())),
        };

        let Some((code, output)) = failure else {
            if let Some(s) = spinner.as_mut() {
                s.finish_success(planned.step.description());
            }
            // Captured output is otherwise dropped on success
            if capture && planned.step.reports_to_operator() {
                if let Ok(r) = &result {
                    for line in r.stdout.lines().filter(|l| !l.trim().is_empty()) {
                        ui.message(&format!("  {}", line));
                    }
                }
            }
            if mode.shows_timings() {
                ui.message(&format!("  {} took {:.1}s", planned.step, duration.as_secs_f64()));
            }
            return Ok(StepReport {
                step: planned.step,
                status: StepStatus::Completed,
                duration,
            });
        };

        match planned.step.failure_policy() {
            FailurePolicy::Continue => {
                tracing::info!(
                    "Environment '{}' already exists or could not be created (exit code {:?}); continuing",
                    self.config.env_name,
                    code
                );
                if let Some(s) = spinner.as_mut() {
                    s.finish_skipped(planned.step.description());
                }
                ui.message(&format!(
                    "Environment '{}' already exists or could not be created; continuing with it.",
                    self.config.env_name
                ));
                Ok(StepReport {
                    step: planned.step,
                    status: StepStatus::Tolerated,
                    duration,
                })
            }
            FailurePolicy::Abort => {
                if let Some(s) = spinner.as_mut() {
                    s.finish_error(planned.step.description());
                }
                if capture {
                    ui.show_error_block(&command_line, &output);
                }
                Err(MlenvError::CommandFailed {
                    command: command_line,
                    code,
                })
            }
        }
    }
}

fn show_summary(ui: &mut dyn UserInterface, config: &ProvisionConfig) {
    ui.message(&format!("  Environment:  {}", config.env_name));
    ui.message(&format!("  Kernel name:  {}", config.display_name));
    ui.message(&format!("  Python:       {}", config.python_version));
    if config.install_vision {
        ui.message(&format!(
            "  Vision:       {}",
            config.vision_packages.join(", ")
        ));
    }
    if config.install_numerics {
        ui.message(&format!(
            "  Numerics:     {} + {} (forced reinstall)",
            config.numerics.requirement(),
            config.accelerator.requirement()
        ));
    }
}

/// Print a plan, marking disabled steps.
pub fn show_plan(ui: &mut dyn UserInterface, plan: &Plan) {
    for (i, planned) in plan.steps().iter().enumerate() {
        if planned.enabled {
            ui.message(&format!("{}. {}", i + 1, planned.step.description()));
            ui.show_command(&planned.command.to_string());
        } else {
            ui.message(&format!(
                "{}. {} (disabled)",
                i + 1,
                planned.step.description()
            ));
        }
    }
}
