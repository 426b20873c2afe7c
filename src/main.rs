//! lintpipe - CI lint pipeline helper
//!
//! Installs a Python lint tool, runs it over a target path, and publishes
//! the report as a named artifact.
//!
//! ## Commands
//!
//! - `lintpipe run` - Execute the whole pipeline
//! - `lintpipe plan` - Show the stages and lint command without running
//! - `lintpipe completions` - Generate shell completions
//!
//! ## Exit codes
//!
//! `0` on success or on the benign unsupported-tool skip; `1` on any
//! pipeline-stage failure, with the causing error printed to stderr.

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    lintpipe::init_logging("info");

    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if std::env::var("LINTPIPE_VERBOSE").is_ok() {
                eprintln!("{e:?}");
            }
            ExitCode::FAILURE
        }
    }
}
