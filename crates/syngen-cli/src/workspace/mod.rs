mod atomic;
mod settings;
mod work_dir;

pub use atomic::write_json_atomic;
pub use settings::{GenerateOverrides, load_settings};
pub use work_dir::{WorkDir, default_work_dir};

use thiserror::Error;

/// Errors raised while reading settings or managing the work directory.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings error: {0}")]
    Settings(#[from] toml::de::Error),
    #[error("invalid workspace: {0}")]
    Invalid(String),
}

/// Result type for workspace operations.
pub type WorkspaceResult<T> = std::result::Result<T, WorkspaceError>;
