//! Lint pipeline domain
//!
//! Configuration, command construction, the error taxonomy, and the
//! sequential driver that ties the stages together.

pub mod command;
pub mod config;
pub mod driver;
pub mod errors;
pub mod post;

pub use command::build_command;
pub use config::{
    LintConfig, LintTool, PartialConfig, Profile, env_inputs, env_inputs_from, is_truthy,
};
pub use driver::{Driver, PipelineOutcome, PipelineState};
pub use errors::PipelineError;
pub use post::{MYPY_REPORT_INDEX, finalize_report};
