//! Sequential pipeline driver
//!
//! Sequences the stages of one lint run: platform gate, tool validation,
//! pip upgrade, tool install, the lint run itself, post-processing, and
//! artifact publication. Strictly sequential; the first failing stage
//! aborts everything after it. The only non-error early exit is an
//! unrecognized tool identifier, which is a benign skip, not a failure.

use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use uuid::Uuid;

use crate::executor::CommandRunner;
use crate::infrastructure::{
    self, ArtifactStore, MYPY_REPORT_DEPENDENCY, StoredArtifact, publish_artifact,
};

use super::command::build_command;
use super::config::{LintConfig, LintTool};
use super::errors::PipelineError;
use super::post::finalize_report;

/// States the driver passes through, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing has run yet
    Start,
    /// Host platform accepted
    PlatformChecked,
    /// Tool identifier recognized
    ToolValidated,
    /// pip upgraded
    PipUpgraded,
    /// Lint tool (and any auxiliary package) installed
    ToolInstalled,
    /// Lint command exited zero
    Linted,
    /// Tool-specific report cleanup done
    PostProcessed,
    /// Report handed to the artifact store
    Published,
    /// Terminal success state
    Done,
}

impl PipelineState {
    /// Stable name for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::PlatformChecked => "platform-checked",
            Self::ToolValidated => "tool-validated",
            Self::PipUpgraded => "pip-upgraded",
            Self::ToolInstalled => "tool-installed",
            Self::Linted => "linted",
            Self::PostProcessed => "post-processed",
            Self::Published => "published",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Every stage ran and the report was stored
    Completed(StoredArtifact),

    /// The configured tool is not recognized; nothing was spawned
    ///
    /// An intentional no-op exit, distinct from failure: the process still
    /// terminates with status zero.
    SkippedUnsupportedTool {
        /// The unrecognized identifier.
        tool: String,
    },
}

impl PipelineOutcome {
    /// Returns true for the benign unsupported-tool skip.
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::SkippedUnsupportedTool { .. })
    }
}

/// Drives the lint stages in order, stopping at the first failure
///
/// Generic over the process-spawning and artifact-storage collaborators so
/// stage sequencing is testable without real subprocesses.
pub struct Driver<R, S> {
    config: LintConfig,
    runner: R,
    store: S,
    workdir: PathBuf,
    platform: String,
    state: PipelineState,
}

impl<R: CommandRunner, S: ArtifactStore> Driver<R, S> {
    /// Creates a driver for the current host and working directory.
    #[must_use]
    pub fn new(config: LintConfig, runner: R, store: S) -> Self {
        Self {
            config,
            runner,
            store,
            workdir: std::env::current_dir().unwrap_or_default(),
            platform: infrastructure::current().to_string(),
            state: PipelineState::Start,
        }
    }

    /// Sets the directory the report is produced and read in.
    #[must_use]
    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    /// Overrides the detected platform identifier.
    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Runs the whole pipeline.
    ///
    /// Returns the typed outcome; exit-code translation belongs to the
    /// binary boundary, never to the driver.
    pub fn run(mut self) -> Result<PipelineOutcome, PipelineError> {
        let run_id = Uuid::new_v4();
        tracing::info!(
            run_id = %run_id,
            tool = %self.config.tool,
            profile = %self.config.profile,
            "Starting lint pipeline"
        );

        let started = Instant::now();
        let result = self.execute();

        match &result {
            Ok(outcome) => {
                tracing::info!(
                    run_id = %run_id,
                    skipped = outcome.is_skip(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    "Pipeline finished"
                );
            }
            Err(error) => {
                tracing::error!(
                    run_id = %run_id,
                    state = %self.state,
                    error = %error,
                    "Pipeline failed"
                );
            }
        }

        result
    }

    fn execute(&mut self) -> Result<PipelineOutcome, PipelineError> {
        infrastructure::ensure_supported(&self.platform)?;
        self.advance(PipelineState::PlatformChecked);

        let Some(tool) = self.config.validated_tool() else {
            tracing::warn!(tool = %self.config.tool, "Unsupported linting tool, skipping run");
            return Ok(PipelineOutcome::SkippedUnsupportedTool {
                tool: self.config.tool.clone(),
            });
        };
        self.config.validate()?;
        self.advance(PipelineState::ToolValidated);

        let version = infrastructure::probe_python_version(&self.runner)?;
        infrastructure::upgrade_pip(&self.runner, &self.platform, &version)?;
        self.advance(PipelineState::PipUpgraded);

        infrastructure::install_package(&self.runner, tool.package())?;
        if tool == LintTool::Mypy {
            infrastructure::install_package(&self.runner, MYPY_REPORT_DEPENDENCY)?;
        }
        self.advance(PipelineState::ToolInstalled);

        self.lint(tool)?;
        self.advance(PipelineState::Linted);

        finalize_report(tool, &self.workdir, &self.config.artifact_name)?;
        self.advance(PipelineState::PostProcessed);

        let stored = publish_artifact(&self.store, &self.workdir, &self.config.artifact_name)?;
        self.advance(PipelineState::Published);

        self.advance(PipelineState::Done);
        Ok(PipelineOutcome::Completed(stored))
    }

    fn lint(&self, tool: LintTool) -> Result<(), PipelineError> {
        let command = build_command(tool, &self.config);
        tracing::info!(tool = %tool, command = %command, "Running lint");

        let started = Instant::now();
        let code = self.runner.run_shell(&command)?;
        if code != 0 {
            return Err(PipelineError::LintFailed {
                tool: tool.to_string(),
                code,
            });
        }

        tracing::info!(
            tool = %tool,
            duration_ms = started.elapsed().as_millis() as u64,
            "Lint completed"
        );
        Ok(())
    }

    fn advance(&mut self, next: PipelineState) {
        tracing::debug!(from = %self.state, to = %next, "State transition");
        self.state = next;
    }

    /// Logs the stages a run would execute and returns the built lint
    /// command, without spawning anything.
    ///
    /// Returns `None` on the benign unsupported-tool skip.
    pub fn plan(&self) -> Result<Option<String>, PipelineError> {
        infrastructure::ensure_supported(&self.platform)?;

        let Some(tool) = self.config.validated_tool() else {
            tracing::warn!(tool = %self.config.tool, "Unsupported linting tool, nothing to plan");
            return Ok(None);
        };
        self.config.validate()?;

        tracing::info!("Would check the Python version");
        tracing::info!("Would upgrade pip");
        tracing::info!(package = %tool.package(), "Would install the lint tool");
        if tool == LintTool::Mypy {
            tracing::info!(
                package = %MYPY_REPORT_DEPENDENCY,
                "Would install the report dependency"
            );
        }

        let command = build_command(tool, &self.config);
        tracing::info!(command = %command, "Would run lint");

        if tool == LintTool::Mypy {
            tracing::info!("Would rename the HTML report index");
        }
        tracing::info!(artifact = %self.config.artifact_name, "Would publish the report");

        Ok(Some(command))
    }
}
