//! Lint command construction
//!
//! Pure mapping from a validated tool plus configuration to the shell
//! command string the executor runs. Each tool has its own flag vocabulary
//! and its own way of capturing output: flake8 writes the report through a
//! native flag, mypy generates an HTML report directory, and the rest rely
//! on a shell redirect.

use super::config::{LintConfig, LintTool};

/// Message template pylint uses when statistics are requested.
const PYLINT_MSG_TEMPLATE: &str =
    " --msg-template='{path}:{line}:{column}: {msg_id} {msg} [{symbol}]'";

/// Builds the full shell command for one lint run.
///
/// Callers must have validated the tool already; the builder never sees an
/// unrecognized identifier. Identical inputs produce byte-identical output.
#[must_use]
pub fn build_command(tool: LintTool, config: &LintConfig) -> String {
    let mut command = format!("{} {}", tool.as_str(), config.path);

    match tool {
        LintTool::Flake8 => {
            if config.verbose {
                command.push_str(" --verbose");
            }
            if config.color {
                command.push_str(" --color auto");
            }
            if config.statistics {
                command.push_str(" --count --statistics");
            }
            push_extra_arguments(&mut command, &config.arguments);
            command.push_str(" --format=default --output-file=");
            command.push_str(&config.artifact_name);
        }
        LintTool::Pylint => {
            if config.verbose {
                command.push_str(" -v");
            }
            if config.color {
                command.push_str(" --output-format=colorized");
            }
            if config.statistics {
                command.push_str(PYLINT_MSG_TEMPLATE);
            }
            push_extra_arguments(&mut command, &config.arguments);
            command.push_str(" --reports=y --exit-zero > ");
            command.push_str(&config.artifact_name);
        }
        LintTool::Pycodestyle => {
            if config.verbose {
                command.push_str(" --verbose");
            }
            if config.statistics {
                command.push_str(" --count --statistics");
            }
            push_extra_arguments(&mut command, &config.arguments);
            command.push_str(" --format=default > ");
            command.push_str(&config.artifact_name);
        }
        LintTool::Pyflakes => {
            // The classic variant silently dropped extra arguments here;
            // both behaviors are preserved behind the profile.
            if config.profile.honors_pyflakes_arguments() {
                push_extra_arguments(&mut command, &config.arguments);
            }
            command.push_str(" > ");
            command.push_str(&config.artifact_name);
        }
        LintTool::Black => {
            if config.verbose {
                command.push_str(" --verbose");
            }
            if config.color {
                command.push_str(" --color");
            }
            push_extra_arguments(&mut command, &config.arguments);
            command.push_str(" > ");
            command.push_str(&config.artifact_name);
        }
        LintTool::Mypy => {
            if config.verbose {
                command.push_str(" --verbose");
            }
            if config.color {
                command.push_str(" --color-output");
            }
            push_extra_arguments(&mut command, &config.arguments);
            // mypy writes its own report directory; the index file is
            // renamed into the artifact name afterwards.
            command.push_str(" --show-error-codes --html-report .");
        }
    }

    command
}

/// Appends trimmed extra-argument text, treating whitespace-only as absent.
fn push_extra_arguments(command: &mut String, arguments: &str) {
    let trimmed = arguments.trim();
    if !trimmed.is_empty() {
        command.push(' ');
        command.push_str(trimmed);
    }
}
