use std::path::{Path, PathBuf};
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use syngen_core::{Workspace, validate_workspace};

use crate::entities::{Timeline, generate_channels, generate_messages, generate_users};
use crate::errors::GenerationError;
use crate::model::{GenerateOptions, GenerationReport};
use crate::output::json::{write_channels, write_messages, write_users};
use crate::threads::{ThreadSettings, ThreadStats, simulate_threads};

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub out_dir: PathBuf,
    pub workspace: Workspace,
    pub report: GenerationReport,
}

/// Entry point for synthesizing a workspace and writing its export tree.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Build the in-memory workspace for `seed` without touching the filesystem.
    ///
    /// Each stage draws from its own generator derived from `seed`, so changing
    /// the message count leaves users and channels unchanged.
    pub fn synthesize(&self, seed: u64) -> Result<(Workspace, ThreadStats), GenerationError> {
        self.options.validate()?;
        let timeline = self.timeline();

        let mut rng = ChaCha8Rng::seed_from_u64(hash_seed(seed, "users"));
        let users = generate_users(&mut rng, self.options.users);

        let mut rng = ChaCha8Rng::seed_from_u64(hash_seed(seed, "channels"));
        let channels = generate_channels(&mut rng, self.options.channels, &users, &timeline)?;

        let mut rng = ChaCha8Rng::seed_from_u64(hash_seed(seed, "messages"));
        let mut messages =
            generate_messages(&mut rng, self.options.messages, &channels, &timeline)?;

        let settings = ThreadSettings {
            reply_probability: self.options.thread_probability,
            start_probability: self.options.thread_start_probability,
            window_hours: self.options.thread_window_hours,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(hash_seed(seed, "threads"));
        let stats = simulate_threads(&mut rng, &mut messages, &settings);

        let workspace = Workspace {
            users,
            channels,
            messages,
        };
        validate_workspace(&workspace)?;
        Ok((workspace, stats))
    }

    /// Synthesize a workspace and write its export tree under `out_dir`.
    pub fn run(&self, out_dir: &Path) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        self.options.validate()?;
        let run_id = uuid::Uuid::new_v4().to_string();
        let seed = self.options.seed.unwrap_or_else(rand::random);

        info!(
            run_id = %run_id,
            seed,
            users = self.options.users,
            channels = self.options.channels,
            messages = self.options.messages,
            thread_probability = self.options.thread_probability,
            "generation started"
        );

        let (workspace, stats) = self.synthesize(seed)?;
        info!(
            threads_started = stats.threads_started,
            replies = stats.replies,
            "workspace synthesized"
        );

        std::fs::create_dir_all(out_dir)?;
        let mut report = GenerationReport::new(run_id.clone(), seed);
        let mut bytes_written = write_users(out_dir, &workspace.users)?;
        bytes_written += write_channels(out_dir, &workspace.channels, &mut report.issues)?;
        let partition = write_messages(
            out_dir,
            &workspace.channels,
            &workspace.messages,
            self.options.day_boundary,
            &mut report.issues,
        )?;
        bytes_written += partition.bytes_written;

        report.users = workspace.users.len() as u64;
        report.channels = workspace.channels.len() as u64;
        report.messages = workspace.messages.len() as u64;
        report.threads_started = stats.threads_started;
        report.thread_parents = workspace.thread_parents().count() as u64;
        report.thread_replies = stats.replies;
        report.day_files = partition.day_files;
        report.bytes_written = bytes_written;
        report.duration_ms = start.elapsed().as_millis() as u64;

        if !report.issues.is_empty() {
            warn!(run_id = %run_id, issues = report.issues.len(), "generation finished with issues");
        }
        info!(
            run_id = %run_id,
            day_files = report.day_files,
            bytes_written = report.bytes_written,
            duration_ms = report.duration_ms,
            "generation finished"
        );

        Ok(GenerationResult {
            out_dir: out_dir.to_path_buf(),
            workspace,
            report,
        })
    }

    fn timeline(&self) -> Timeline {
        Timeline {
            now: self
                .options
                .now
                .unwrap_or_else(|| chrono::Utc::now().timestamp()),
            window_days: self.options.window_days,
            channel_age_days: self.options.channel_age_days,
        }
    }
}

/// Derive a stage seed from the run seed.
fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
