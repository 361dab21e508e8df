//! Verification of syngen export trees.
//!
//! Reads `users.json`, `channels.json` and the per-channel day files back
//! into the workspace model, checks layout and thread invariants, and renders
//! metrics plus a markdown report.

pub mod engine;
pub mod errors;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod report;

pub use engine::ExportEvaluator;
pub use errors::EvalError;
pub use loader::{DayFile, ExportTree, load_export, read_export_tree};
pub use metrics::{ChannelMetrics, ExportCounts, MetricsReport};
pub use model::{EvaluateOptions, EvaluationResult, Violation};
pub use report::render_report;
