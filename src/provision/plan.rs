//! The ordered invocation plan.
//!
//! The plan is plain data built from a [`ProvisionConfig`] and the located
//! conda executable. The workflow walks it; `mlenv plan` prints it.

use std::fmt;
use std::path::Path;

use crate::config::ProvisionConfig;
use crate::shell::CommandSpec;

/// One invocation in the provisioning flow, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// `conda create` with the pinned interpreter.
    CreateEnvironment,
    /// `pip install --upgrade pip`.
    UpgradePip,
    /// Vision/detection bundle.
    InstallVision,
    /// Forced, uncached reinstall of the numerics + accelerator pair.
    InstallNumerics,
    /// `ipykernel install`.
    RegisterKernel,
    /// Import the numerics library and list accelerator devices.
    SmokeTest,
}

/// What happens when a step's command fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log and keep going.
    Continue,
    /// Stop the run.
    Abort,
}

impl Step {
    /// All steps in execution order.
    pub const ALL: [Step; 6] = [
        Step::CreateEnvironment,
        Step::UpgradePip,
        Step::InstallVision,
        Step::InstallNumerics,
        Step::RegisterKernel,
        Step::SmokeTest,
    ];

    /// Stable identifier.
    pub fn name(&self) -> &'static str {
        match self {
            Step::CreateEnvironment => "create_environment",
            Step::UpgradePip => "upgrade_pip",
            Step::InstallVision => "install_vision",
            Step::InstallNumerics => "install_numerics",
            Step::RegisterKernel => "register_kernel",
            Step::SmokeTest => "smoke_test",
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Step::CreateEnvironment => "Create conda environment",
            Step::UpgradePip => "Upgrade pip",
            Step::InstallVision => "Install vision packages",
            Step::InstallNumerics => "Reinstall pinned numerics + accelerator",
            Step::RegisterKernel => "Register Jupyter kernel",
            Step::SmokeTest => "Check accelerator devices",
        }
    }

    /// Whether the step's stdout is meant for the operator to read, even
    /// when other command output is hidden.
    pub fn reports_to_operator(&self) -> bool {
        matches!(self, Step::SmokeTest)
    }

    /// Failure handling. Only environment creation is tolerated: it fails
    /// when the environment already exists.
    pub fn failure_policy(&self) -> FailurePolicy {
        match self {
            Step::CreateEnvironment => FailurePolicy::Continue,
            _ => FailurePolicy::Abort,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A step with its concrete command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    /// Which step.
    pub step: Step,
    /// Command to run.
    pub command: CommandSpec,
    /// False when a feature toggle turned the step off.
    pub enabled: bool,
}

/// Ordered plan for one provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    steps: Vec<PlannedStep>,
}

impl Plan {
    /// Every step, enabled or not, in order.
    pub fn steps(&self) -> &[PlannedStep] {
        &self.steps
    }

    /// Steps that will run, in order.
    pub fn enabled(&self) -> impl Iterator<Item = &PlannedStep> {
        self.steps.iter().filter(|s| s.enabled)
    }

    /// Look up a step.
    pub fn get(&self, step: Step) -> Option<&PlannedStep> {
        self.steps.iter().find(|s| s.step == step)
    }
}

/// Build the plan for `config`, running everything through `conda`.
pub fn build_plan(config: &ProvisionConfig, conda: &Path) -> Plan {
    let steps = Step::ALL
        .iter()
        .map(|&step| PlannedStep {
            step,
            command: command_for(step, config, conda),
            enabled: is_enabled(step, config),
        })
        .collect();

    Plan { steps }
}

fn is_enabled(step: Step, config: &ProvisionConfig) -> bool {
    match step {
        Step::InstallVision => config.install_vision,
        Step::InstallNumerics | Step::SmokeTest => config.install_numerics,
        Step::CreateEnvironment | Step::UpgradePip | Step::RegisterKernel => true,
    }
}

fn command_for(step: Step, config: &ProvisionConfig, conda: &Path) -> CommandSpec {
    match step {
        Step::CreateEnvironment => create_environment(conda, config),
        Step::UpgradePip => pip(conda, &config.env_name, ["install", "--upgrade", "pip"]),
        Step::InstallVision => pip(
            conda,
            &config.env_name,
            std::iter::once("install".to_string()).chain(config.vision_packages.iter().cloned()),
        ),
        Step::InstallNumerics => pip(
            conda,
            &config.env_name,
            [
                "install".to_string(),
                "--force-reinstall".to_string(),
                "--no-cache-dir".to_string(),
                config.numerics.requirement(),
                config.accelerator.requirement(),
            ],
        ),
        Step::RegisterKernel => python(conda, &config.env_name).args([
            "-m",
            "ipykernel",
            "install",
            "--user",
            "--name",
            config.env_name.as_str(),
            "--display-name",
            config.display_name.as_str(),
        ]),
        Step::SmokeTest => python(conda, &config.env_name)
            .arg("-c")
            .arg(smoke_test_script(&config.numerics_module)),
    }
}

/// `conda create` for the environment. `ipykernel` is installed with the
/// interpreter so kernel registration works without a separate pip step.
fn create_environment(conda: &Path, config: &ProvisionConfig) -> CommandSpec {
    CommandSpec::new(conda).args([
        "create".to_string(),
        "--yes".to_string(),
        "--name".to_string(),
        config.env_name.clone(),
        format!("python={}", config.python_version),
        "ipykernel".to_string(),
    ])
}

/// `python` inside the environment, with output streamed rather than
/// buffered by conda.
fn python(conda: &Path, env_name: &str) -> CommandSpec {
    CommandSpec::new(conda).args([
        "run",
        "--no-capture-output",
        "--name",
        env_name,
        "python",
    ])
}

fn pip<I, S>(conda: &Path, env_name: &str, args: I) -> CommandSpec
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    python(conda, env_name).args(["-m", "pip"]).args(args)
}

/// One-line script printing the library version and visible GPU devices.
pub fn smoke_test_script(module: &str) -> String {
    format!(
        "import {m} as lib; print(lib.__version__); print(lib.config.list_physical_devices('GPU'))",
        m = module
    )
}
