use thiserror::Error;

/// Errors emitted by the export evaluator.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("invalid export: {0}")]
    InvalidExport(String),
    #[error("validation failed with {0} violation(s)")]
    Violations(u64),
    #[error("core error: {0}")]
    Core(#[from] syngen_core::Error),
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
