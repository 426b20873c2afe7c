//! # Lintpipe - a CI lint pipeline helper
//!
//! Lintpipe selects one of the supported Python lint tools, installs it,
//! runs it over a target path, and publishes the resulting report as a
//! named artifact. The whole program is a sequential chain of external
//! processes: any stage's failure aborts every later stage.
//!
//! ## Stages
//!
//! 1. Platform gate - the host OS must be one of three families
//! 2. Interpreter probe - `python --version`, captured
//! 3. pip upgrade - platform/version-dependent command variant
//! 4. Tool install - `pip install <tool>` (plus `lxml` for mypy)
//! 5. Lint run - tool-specific command through the shell
//! 6. Post-processing - mypy's HTML report index is renamed
//! 7. Publish - the report is handed to the artifact store
//!
//! An unrecognized tool identifier is not an error: the run warns, skips
//! every stage, and exits zero.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run flake8 over the working tree and store the report
//! lintpipe run --tool flake8 --path src/ --statistics true
//!
//! # Show what would run, without spawning anything
//! lintpipe plan --tool mypy --artifact-name typecheck.html
//! ```
//!
//! Inputs may also arrive as the hosting CI system's `INPUT_*` environment
//! variables or a partial config file; see [`pipeline::LintConfig`].
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <https://www.apache.org/licenses/LICENSE-2.0>)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or <https://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod executor;
pub mod infrastructure;
pub mod pipeline;

// Re-export commonly used types
pub use executor::{Captured, CommandRunner, ShellConfig, SystemRunner};
pub use infrastructure::{
    ArtifactStore, FsArtifactStore, StoredArtifact, ensure_supported, init_logging,
};
pub use pipeline::{
    Driver, LintConfig, LintTool, PartialConfig, PipelineError, PipelineOutcome, PipelineState,
    Profile, build_command,
};

/// Version of the lintpipe crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
