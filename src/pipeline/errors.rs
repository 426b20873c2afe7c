//! Error types for the lint pipeline

use thiserror::Error;

/// Errors that can terminate a pipeline run
///
/// Every stage maps its local failure into exactly one of these variants.
/// The driver never recovers from any of them; translation to a process
/// exit code happens at the binary boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Host platform is not in the supported set
    #[error("Unsupported platform: {platform}")]
    UnsupportedPlatform {
        /// The detected OS identifier.
        platform: String,
    },

    /// The interpreter wrote to its error stream during the version probe
    #[error("Python version check failed: {stderr}")]
    VersionCheckStderr {
        /// Content of the interpreter's error stream.
        stderr: String,
    },

    /// The version probe exited non-zero
    #[error("Python version check failed with exit code {code}")]
    VersionCheckExit {
        /// Exit code returned by the interpreter.
        code: i32,
    },

    /// The pip self-upgrade exited non-zero
    #[error("Failed to upgrade pip with exit code {code}")]
    UpgradeFailed {
        /// Exit code returned by the upgrade command.
        code: i32,
    },

    /// A package install exited non-zero
    #[error("Failed to install {package} with exit code {code}")]
    InstallFailed {
        /// Name of the package that failed to install.
        package: String,
        /// Exit code returned by pip.
        code: i32,
    },

    /// The lint run exited non-zero
    #[error("{tool} exited with code {code}")]
    LintFailed {
        /// Name of the lint tool that failed.
        tool: String,
        /// Exit code returned by the tool.
        code: i32,
    },

    /// The report file could not be renamed into the artifact name
    #[error("Failed to rename {from} to {to}: {reason}")]
    RenameFailed {
        /// Source file name.
        from: String,
        /// Destination file name.
        to: String,
        /// Reason reported by the filesystem.
        reason: String,
    },

    /// The report artifact could not be read or stored
    #[error("Failed to publish {artifact}: {reason}")]
    PublishFailed {
        /// Name of the artifact.
        artifact: String,
        /// Reason the read or the store rejected it.
        reason: String,
    },

    /// Extra arguments are not parseable as shell words
    #[error("Invalid extra arguments: {reason}")]
    InvalidArguments {
        /// Reason the argument string was rejected.
        reason: String,
    },

    /// A subprocess could not be spawned at all
    ///
    /// Distinct from a non-zero exit: the program never ran.
    #[error("Failed to spawn {program}: {reason}")]
    Spawn {
        /// The program that could not be started.
        program: String,
        /// Reason reported by the operating system.
        reason: String,
    },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
