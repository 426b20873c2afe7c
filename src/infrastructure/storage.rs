//! Artifact storage adapters
//!
//! The durable-storage collaborator the publisher hands the finished report
//! to. The trait is the seam; the filesystem store is the default adapter.

use std::fs;
use std::path::{Path, PathBuf};

use crate::pipeline::PipelineError;

/// Receipt for a stored artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
    /// Artifact name it was stored under
    pub name: String,

    /// Where the store placed it
    pub location: PathBuf,

    /// Size in bytes
    pub size: u64,
}

/// Durable storage for named report files
pub trait ArtifactStore {
    /// Persists the file at `path` under `name`.
    fn store(&self, name: &str, path: &Path) -> Result<StoredArtifact, PipelineError>;
}

/// Stores artifacts under a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    /// Default store directory, relative to the working directory.
    pub const DEFAULT_ROOT: &'static str = ".lintpipe/artifacts";

    /// Creates a store rooted at the given directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory artifacts are stored under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for FsArtifactStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ROOT)
    }
}

impl ArtifactStore for FsArtifactStore {
    fn store(&self, name: &str, path: &Path) -> Result<StoredArtifact, PipelineError> {
        fs::create_dir_all(&self.root).map_err(|e| PipelineError::PublishFailed {
            artifact: name.to_string(),
            reason: e.to_string(),
        })?;

        let location = self.root.join(name);
        let size = fs::copy(path, &location).map_err(|e| PipelineError::PublishFailed {
            artifact: name.to_string(),
            reason: e.to_string(),
        })?;

        tracing::info!(
            artifact = %name,
            location = %location.display(),
            size,
            "Artifact stored"
        );

        Ok(StoredArtifact {
            name: name.to_string(),
            location,
            size,
        })
    }
}

/// Publishes the report artifact.
///
/// Reads the file in full first: an unreadable report (the lint or rename
/// stage never produced it) fails here rather than inside the store.
pub fn publish_artifact(
    store: &impl ArtifactStore,
    workdir: &Path,
    name: &str,
) -> Result<StoredArtifact, PipelineError> {
    let path = workdir.join(name);

    let contents = fs::read_to_string(&path).map_err(|e| PipelineError::PublishFailed {
        artifact: name.to_string(),
        reason: e.to_string(),
    })?;
    tracing::debug!(artifact = %name, bytes = contents.len(), "Report artifact is readable");

    store.store(name, &path)
}
