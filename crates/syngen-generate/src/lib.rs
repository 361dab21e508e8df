//! Synthetic workspace generation for syngen.
//!
//! This crate synthesizes users, channels and messages, simulates reply
//! threads over the time-sorted message stream, and writes the result as a
//! partitioned JSON export tree (`users.json`, `channels.json` and one
//! `<channel>/<YYYY-MM-DD>.json` per channel and day).

pub mod engine;
pub mod entities;
pub mod errors;
pub mod lexical;
pub mod model;
pub mod output;
pub mod sampling;
pub mod threads;

pub use engine::{GenerationEngine, GenerationResult};
pub use entities::{Timeline, generate_channels, generate_messages, generate_users, membership_bounds};
pub use errors::GenerationError;
pub use model::{GenerateOptions, GenerationIssue, GenerationReport};
pub use output::json::{PartitionKey, PartitionStats, partition_order, write_messages};
pub use threads::{ThreadSettings, ThreadStats, simulate_threads};
