//! Tool-specific post-processing
//!
//! mypy writes its HTML report to a fixed-name index file inside the
//! working directory; the index is renamed into the configured artifact
//! name so the publisher finds it. Every other tool already wrote to the
//! artifact name and needs nothing here.

use std::fs;
use std::path::Path;

use super::config::LintTool;
use super::errors::PipelineError;

/// Fixed index file name of the mypy HTML report.
pub const MYPY_REPORT_INDEX: &str = "index.html";

/// Moves tool-written report output into the configured artifact name.
///
/// A no-op for every tool except mypy.
pub fn finalize_report(
    tool: LintTool,
    workdir: &Path,
    artifact_name: &str,
) -> Result<(), PipelineError> {
    if tool != LintTool::Mypy {
        return Ok(());
    }

    let from = workdir.join(MYPY_REPORT_INDEX);
    let to = workdir.join(artifact_name);

    fs::rename(&from, &to).map_err(|e| PipelineError::RenameFailed {
        from: from.display().to_string(),
        to: to.display().to_string(),
        reason: e.to_string(),
    })?;

    tracing::info!(from = %from.display(), to = %to.display(), "Report renamed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_mypy_report_is_renamed() {
        let workdir = TempDir::new().unwrap();
        fs::write(workdir.path().join(MYPY_REPORT_INDEX), "<html/>").unwrap();

        finalize_report(LintTool::Mypy, workdir.path(), "typecheck.html").unwrap();

        assert!(!workdir.path().join(MYPY_REPORT_INDEX).exists());
        assert_eq!(
            fs::read_to_string(workdir.path().join("typecheck.html")).unwrap(),
            "<html/>"
        );
    }

    #[test]
    fn test_missing_index_is_a_rename_error() {
        let workdir = TempDir::new().unwrap();
        let err = finalize_report(LintTool::Mypy, workdir.path(), "typecheck.html").unwrap_err();
        assert!(matches!(err, PipelineError::RenameFailed { .. }));
    }

    #[test]
    fn test_other_tools_are_untouched() {
        let workdir = TempDir::new().unwrap();
        // No index file exists and none is needed.
        for tool in LintTool::ALL {
            if tool == LintTool::Mypy {
                continue;
            }
            finalize_report(tool, workdir.path(), "report.txt").unwrap();
        }
    }
}
