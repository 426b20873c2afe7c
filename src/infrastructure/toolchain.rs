//! Python toolchain management
//!
//! The stages that prepare the environment before a lint run: probing the
//! interpreter version, upgrading pip, and installing packages. All of them
//! stream their output to the build log except the probe, which needs the
//! version text back.

use crate::executor::CommandRunner;
use crate::pipeline::PipelineError;

/// Interpreter binary used for the version probe.
pub const PYTHON: &str = "python";

/// Auxiliary package mypy needs to produce its HTML report.
pub const MYPY_REPORT_DEPENDENCY: &str = "lxml";

/// Probes the interpreter version.
///
/// Resolves with the trimmed stdout text on a clean zero exit. Any write to
/// the error stream fails the probe even with a zero exit: historically the
/// interpreter reported its version there, and that spelling is not
/// supported.
pub fn probe_python_version(runner: &impl CommandRunner) -> Result<String, PipelineError> {
    tracing::info!("Checking Python version");

    let captured = runner.capture(PYTHON, &["--version"])?;

    if !captured.stderr.trim().is_empty() {
        return Err(PipelineError::VersionCheckStderr {
            stderr: captured.stderr.trim().to_string(),
        });
    }
    if !captured.is_success() {
        return Err(PipelineError::VersionCheckExit {
            code: captured.exit_code,
        });
    }

    let version = captured.stdout.trim().to_string();
    tracing::info!(version = %version, "Python version checked");
    Ok(version)
}

/// Chooses the pip upgrade invocation for the host.
///
/// macOS with a Python 3.10 interpreter needs the version-pinned module
/// invocation; every other combination uses the generic one.
#[must_use]
pub fn pip_upgrade_command(platform: &str, python_version: &str) -> &'static str {
    if platform == "macos" && python_version.starts_with("Python 3.10") {
        "python3.10 -m pip install --upgrade pip"
    } else {
        "pip install --upgrade pip"
    }
}

/// Upgrades pip through the shell, streaming output to the terminal.
///
/// Mutates the globally installed pip; safe to re-run, but a failed upgrade
/// may leave it partially upgraded.
pub fn upgrade_pip(
    runner: &impl CommandRunner,
    platform: &str,
    python_version: &str,
) -> Result<(), PipelineError> {
    let command = pip_upgrade_command(platform, python_version);
    tracing::info!(command = %command, "Upgrading pip");

    let code = runner.run_shell(command)?;
    if code != 0 {
        return Err(PipelineError::UpgradeFailed { code });
    }
    Ok(())
}

/// Installs a package with pip, streaming output to the terminal.
pub fn install_package(runner: &impl CommandRunner, package: &str) -> Result<(), PipelineError> {
    tracing::info!(package = %package, "Installing package");

    let code = runner.run_program("pip", &["install", package])?;
    if code != 0 {
        return Err(PipelineError::InstallFailed {
            package: package.to_string(),
            code,
        });
    }

    tracing::info!(package = %package, "Package installed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::Captured;
    use std::cell::RefCell;

    /// Runner that replays canned results and records every invocation.
    struct ScriptedRunner {
        capture_result: Captured,
        shell_code: i32,
        program_code: i32,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedRunner {
        fn new(capture_result: Captured) -> Self {
            Self {
                capture_result,
                shell_code: 0,
                program_code: 0,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run_shell(&self, command: &str) -> Result<i32, PipelineError> {
            self.calls.borrow_mut().push(format!("sh: {command}"));
            Ok(self.shell_code)
        }

        fn run_program(&self, program: &str, args: &[&str]) -> Result<i32, PipelineError> {
            self.calls
                .borrow_mut()
                .push(format!("{program} {}", args.join(" ")));
            Ok(self.program_code)
        }

        fn capture(&self, program: &str, args: &[&str]) -> Result<Captured, PipelineError> {
            self.calls
                .borrow_mut()
                .push(format!("capture: {program} {}", args.join(" ")));
            Ok(self.capture_result.clone())
        }
    }

    fn clean_probe(stdout: &str) -> Captured {
        Captured {
            stdout: stdout.to_string(),
            stderr: String::new(),
            exit_code: 0,
        }
    }

    #[test]
    fn test_probe_trims_version_text() {
        let runner = ScriptedRunner::new(clean_probe("Python 3.12.1\n"));
        let version = probe_python_version(&runner).unwrap();
        assert_eq!(version, "Python 3.12.1");
        assert_eq!(runner.calls.borrow()[0], "capture: python --version");
    }

    #[test]
    fn test_probe_rejects_stderr_output_even_on_zero_exit() {
        let runner = ScriptedRunner::new(Captured {
            stdout: String::new(),
            stderr: "Python 2.7.18\n".to_string(),
            exit_code: 0,
        });
        let err = probe_python_version(&runner).unwrap_err();
        assert_eq!(
            err,
            PipelineError::VersionCheckStderr {
                stderr: "Python 2.7.18".to_string()
            }
        );
    }

    #[test]
    fn test_probe_rejects_nonzero_exit() {
        let runner = ScriptedRunner::new(Captured {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: 9,
        });
        let err = probe_python_version(&runner).unwrap_err();
        assert_eq!(err, PipelineError::VersionCheckExit { code: 9 });
    }

    #[test]
    fn test_pip_command_is_pinned_only_on_macos_310() {
        assert_eq!(
            pip_upgrade_command("macos", "Python 3.10.4"),
            "python3.10 -m pip install --upgrade pip"
        );
        assert_eq!(
            pip_upgrade_command("macos", "Python 3.12.1"),
            "pip install --upgrade pip"
        );
        assert_eq!(
            pip_upgrade_command("linux", "Python 3.10.4"),
            "pip install --upgrade pip"
        );
    }

    #[test]
    fn test_upgrade_pip_maps_nonzero_exit() {
        let mut runner = ScriptedRunner::new(clean_probe(""));
        runner.shell_code = 2;
        let err = upgrade_pip(&runner, "linux", "Python 3.12.1").unwrap_err();
        assert_eq!(err, PipelineError::UpgradeFailed { code: 2 });
    }

    #[test]
    fn test_install_package_maps_nonzero_exit() {
        let mut runner = ScriptedRunner::new(clean_probe(""));
        runner.program_code = 1;
        let err = install_package(&runner, "flake8").unwrap_err();
        assert_eq!(
            err,
            PipelineError::InstallFailed {
                package: "flake8".to_string(),
                code: 1
            }
        );
    }

    #[test]
    fn test_install_package_invokes_pip_directly() {
        let runner = ScriptedRunner::new(clean_probe(""));
        install_package(&runner, "mypy").unwrap();
        assert_eq!(runner.calls.borrow().as_slice(), ["pip install mypy"]);
    }
}
