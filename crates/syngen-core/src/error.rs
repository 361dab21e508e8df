use thiserror::Error;

/// Core error type shared across syngen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The workspace violates a referential or temporal invariant.
    #[error("invalid workspace: {0}")]
    InvalidWorkspace(String),
    /// A serialized document could not be mapped back into the model.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

/// Convenience alias for results returned by syngen crates.
pub type Result<T> = std::result::Result<T, Error>;
