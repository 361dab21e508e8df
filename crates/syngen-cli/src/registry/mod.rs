mod archive;
mod logging;

pub use archive::archive_tree;
pub use logging::init_logging;

use thiserror::Error;

/// Errors raised while logging or packaging a run.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("archiver '{program}' could not be started: {source}")]
    ArchiverUnavailable {
        program: String,
        source: std::io::Error,
    },
    #[error("archiver exited with {status}: {stderr}")]
    ArchiveFailed { status: String, stderr: String },
}

/// Result type for registry operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
