//! Command-line workflow, independent of argument parsing

pub mod orchestration;

pub use orchestration::{execute, run_release_workflow, ReleaseWorkflowArgs, WorkflowResult};
