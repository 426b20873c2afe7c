//! Infrastructure layer
//!
//! This module contains the adapters the pipeline talks to: the host
//! platform gate, the Python toolchain, artifact storage, and logging.

mod logging;
mod platform;
mod storage;
mod toolchain;

pub use logging::init_logging;
pub use platform::{SUPPORTED_PLATFORMS, current, ensure_supported};
pub use storage::{ArtifactStore, FsArtifactStore, StoredArtifact, publish_artifact};
pub use toolchain::{
    MYPY_REPORT_DEPENDENCY, PYTHON, install_package, pip_upgrade_command, probe_python_version,
    upgrade_pip,
};
