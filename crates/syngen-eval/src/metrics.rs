use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metrics contract version for export evaluation.
pub const METRICS_VERSION: &str = "0.1";

/// Machine-readable metrics for an export evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    pub metrics_version: String,
    pub export_dir: String,
    pub counts: ExportCounts,
    pub channels: Vec<ChannelMetrics>,
    /// Violation totals keyed by violation code.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub violations: BTreeMap<String, u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<WarningItem>,
    pub performance: PerformanceMetrics,
}

/// Entity totals found in the export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportCounts {
    pub users: u64,
    pub channels: u64,
    pub messages: u64,
    pub day_files: u64,
    pub thread_parents: u64,
    pub thread_replies: u64,
}

/// Per-channel totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMetrics {
    pub name: String,
    pub members: u64,
    pub messages: u64,
    pub day_files: u64,
}

/// Structured warning entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningItem {
    pub code: String,
    pub path: String,
    pub message: String,
}

/// Performance timings for the evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub load_ms: u128,
    pub validate_ms: u128,
    pub total_ms: u128,
}
