//! Process execution layer
//!
//! This module contains the process-spawning capability the pipeline
//! stages consume.

mod shell;

pub use shell::{Captured, CommandRunner, ShellConfig, SystemRunner};
