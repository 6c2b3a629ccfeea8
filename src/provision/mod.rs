//! Environment provisioning.
//!
//! - [`plan`] turns a config into the ordered list of conda invocations
//! - [`confirm`] is the typed-token gate in front of any change
//! - [`workflow`] runs the plan through a [`CommandRunner`](crate::shell::CommandRunner)

pub mod confirm;
pub mod plan;
pub mod workflow;

pub use confirm::{confirm, is_confirmed, CONFIRM_PROMPT_KEY};
pub use plan::{build_plan, smoke_test_script, FailurePolicy, Plan, PlannedStep, Step};
pub use workflow::{
    show_plan, ProvisionOptions, ProvisionOutcome, ProvisionReport, Provisioner, StepReport,
    StepStatus,
};
