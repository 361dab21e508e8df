use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use syngen_core::timestamp::DayBoundary;

use crate::metrics::MetricsReport;

/// Options for export evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluateOptions {
    /// Fail when any violation is found.
    pub strict: bool,
    /// Limit the number of violations listed in the report.
    pub max_examples: usize,
    /// Time zone the day files were cut in.
    pub day_boundary: DayBoundary,
    /// Write `metrics.json` and `report.md` into this directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
}

impl Default for EvaluateOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_examples: 20,
            day_boundary: DayBoundary::Local,
            out_dir: None,
        }
    }
}

/// Structured violation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub code: String,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl Violation {
    pub fn new(code: &str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            path: path.into(),
            message: message.into(),
            example: None,
        }
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }
}

/// Result of an export evaluation.
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    pub export_dir: PathBuf,
    pub metrics_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub metrics: MetricsReport,
    pub report: String,
    pub violations: Vec<Violation>,
}
