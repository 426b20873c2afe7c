//! Subprocess execution
//!
//! Two execution modes cover every pipeline stage:
//!
//! - inherited stdio, for stages whose output belongs on the build log
//!   (pip upgrade, installs, the lint run itself)
//! - captured stdio, for the interpreter version probe, which needs the
//!   output text back
//!
//! Spawn-level failures (missing binary, unusable shell) surface as
//! [`PipelineError::Spawn`], distinct from a process that ran and exited
//! non-zero; the caller decides what a non-zero exit means for its stage.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::pipeline::PipelineError;

/// Shell execution configuration
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Working directory commands run in
    pub cwd: PathBuf,

    /// Extra environment variables
    pub env: HashMap<String, String>,

    /// Shell used for command strings (default: sh)
    pub shell: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            cwd: env::current_dir().unwrap_or_default(),
            env: HashMap::new(),
            shell: "sh".to_string(),
        }
    }
}

/// Captured output of a finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    /// Accumulated standard output
    pub stdout: String,

    /// Accumulated standard error
    pub stderr: String,

    /// Exit code (-1 when terminated by a signal)
    pub exit_code: i32,
}

impl Captured {
    /// Returns true if the process exited zero.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Process-spawning capability consumed by the pipeline stages
///
/// The driver is generic over this trait so stage sequencing can be tested
/// without spawning real processes.
pub trait CommandRunner {
    /// Runs a command string through the shell with inherited stdio and
    /// returns its exit code.
    fn run_shell(&self, command: &str) -> Result<i32, PipelineError>;

    /// Runs a program directly with inherited stdio and returns its exit
    /// code.
    fn run_program(&self, program: &str, args: &[&str]) -> Result<i32, PipelineError>;

    /// Runs a program directly with captured stdio.
    fn capture(&self, program: &str, args: &[&str]) -> Result<Captured, PipelineError>;
}

/// Runs commands on the host system
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    config: ShellConfig,
}

impl SystemRunner {
    /// Creates a runner with the given configuration.
    #[must_use]
    pub fn new(config: ShellConfig) -> Self {
        Self { config }
    }

    /// Sets the working directory.
    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.config.cwd = cwd.into();
        self
    }

    /// Adds an environment variable.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.env.insert(key.into(), value.into());
        self
    }

    /// Sets the shell used for command strings.
    #[must_use]
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.config.shell = shell.into();
        self
    }

    fn spawn_error(program: &str, err: &std::io::Error) -> PipelineError {
        PipelineError::Spawn {
            program: program.to_string(),
            reason: err.to_string(),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run_shell(&self, command: &str) -> Result<i32, PipelineError> {
        tracing::debug!(command = %command, shell = %self.config.shell, "Executing shell command");

        let status = Command::new(&self.config.shell)
            .arg("-c")
            .arg(command)
            .current_dir(&self.config.cwd)
            .envs(&self.config.env)
            .status()
            .map_err(|e| Self::spawn_error(&self.config.shell, &e))?;

        Ok(status.code().unwrap_or(-1))
    }

    fn run_program(&self, program: &str, args: &[&str]) -> Result<i32, PipelineError> {
        tracing::debug!(program = %program, ?args, "Executing program");

        let status = Command::new(program)
            .args(args)
            .current_dir(&self.config.cwd)
            .envs(&self.config.env)
            .status()
            .map_err(|e| Self::spawn_error(program, &e))?;

        Ok(status.code().unwrap_or(-1))
    }

    fn capture(&self, program: &str, args: &[&str]) -> Result<Captured, PipelineError> {
        tracing::debug!(program = %program, ?args, "Capturing program output");

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.config.cwd)
            .envs(&self.config.env)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| Self::spawn_error(program, &e))?;

        Ok(Captured {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_run_shell_reports_exit_code() {
        let runner = SystemRunner::default();
        assert_eq!(runner.run_shell("exit 0").unwrap(), 0);
        assert_eq!(runner.run_shell("exit 3").unwrap(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_capture_collects_streams() {
        let runner = SystemRunner::default();
        let captured = runner
            .capture("sh", &["-c", "echo out; echo err >&2"])
            .unwrap();
        assert_eq!(captured.stdout.trim(), "out");
        assert_eq!(captured.stderr.trim(), "err");
        assert!(captured.is_success());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_shell_respects_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        let runner = SystemRunner::default().with_cwd(temp.path());
        let code = runner.run_shell("pwd > where.txt").unwrap();
        assert_eq!(code, 0);
        assert!(temp.path().join("where.txt").exists());
    }

    #[test]
    fn test_missing_program_is_a_spawn_error() {
        let runner = SystemRunner::default();
        let err = runner
            .capture("lintpipe-no-such-binary", &["--version"])
            .unwrap_err();
        assert!(matches!(err, PipelineError::Spawn { .. }));
    }

    #[test]
    fn test_missing_shell_is_a_spawn_error() {
        let runner = SystemRunner::default().with_shell("lintpipe-no-such-shell");
        let err = runner.run_shell("echo hi").unwrap_err();
        assert!(matches!(err, PipelineError::Spawn { .. }));
    }
}
