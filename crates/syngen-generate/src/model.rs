use serde::{Deserialize, Serialize};
use syngen_core::timestamp::DayBoundary;

use crate::errors::GenerationError;

/// Options for the generation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Number of users to synthesize.
    pub users: usize,
    /// Number of channels to synthesize.
    pub channels: usize,
    /// Number of messages to synthesize. Zero is allowed.
    pub messages: usize,
    /// Chance that a message in a channel with a recent active thread replies to it.
    pub thread_probability: f64,
    /// Chance that a message which did not reply starts a new thread.
    pub thread_start_probability: f64,
    /// Replies are only attached to parents younger than this.
    pub thread_window_hours: u32,
    /// Seed for every random draw of the run; drawn from the OS when absent.
    pub seed: Option<u64>,
    /// Reference "now" in epoch seconds; wall clock when absent.
    pub now: Option<i64>,
    /// Messages fall in the trailing window of this many days before `now`.
    pub window_days: u32,
    /// Channels are created at most this many days before `now`.
    pub channel_age_days: u32,
    /// Time zone used to group messages into day files.
    pub day_boundary: DayBoundary,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            users: 10,
            channels: 25,
            messages: 1000,
            thread_probability: 0.3,
            thread_start_probability: 0.2,
            thread_window_hours: 72,
            seed: None,
            now: None,
            window_days: 30,
            channel_age_days: 365,
            day_boundary: DayBoundary::Local,
        }
    }
}

impl GenerateOptions {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.users == 0 {
            return Err(GenerationError::InvalidOptions(
                "users must be > 0".to_string(),
            ));
        }
        if self.channels == 0 {
            return Err(GenerationError::InvalidOptions(
                "channels must be > 0".to_string(),
            ));
        }
        for (name, value) in [
            ("thread_probability", self.thread_probability),
            ("thread_start_probability", self.thread_start_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GenerationError::InvalidOptions(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.window_days == 0 {
            return Err(GenerationError::InvalidOptions(
                "window_days must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Structured generation issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationIssue {
    pub level: String,
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl GenerationIssue {
    pub fn write_failed(path: &std::path::Path, err: &dyn std::fmt::Display) -> Self {
        Self {
            level: "warning".to_string(),
            code: "write_failed".to_string(),
            message: err.to_string(),
            path: Some(path.display().to_string()),
        }
    }
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub seed: u64,
    pub users: u64,
    pub channels: u64,
    pub messages: u64,
    pub threads_started: u64,
    pub thread_parents: u64,
    pub thread_replies: u64,
    pub day_files: u64,
    pub bytes_written: u64,
    pub duration_ms: u64,
    pub issues: Vec<GenerationIssue>,
}

impl GenerationReport {
    pub fn new(run_id: String, seed: u64) -> Self {
        Self {
            run_id,
            seed,
            users: 0,
            channels: 0,
            messages: 0,
            threads_started: 0,
            thread_parents: 0,
            thread_replies: 0,
            day_files: 0,
            bytes_written: 0,
            duration_ms: 0,
            issues: Vec::new(),
        }
    }
}
