use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::Path;
use std::time::Instant;

use chrono::NaiveDate;
use regex::Regex;
use tracing::{info, warn};

use syngen_core::timestamp::DayBoundary;
use syngen_core::{
    AVATAR_HASH_LEN, ChannelRecord, MAX_EMAIL_LEN, MAX_NAME_LEN, MessageRecord, Timestamp,
    validate_workspace,
};

use crate::errors::EvalError;
use crate::loader::{DayFile, ExportTree, read_export_tree};
use crate::metrics::{
    ChannelMetrics, ExportCounts, METRICS_VERSION, MetricsReport, PerformanceMetrics, WarningItem,
};
use crate::model::{EvaluateOptions, EvaluationResult, Violation};
use crate::report::render_report;

/// Evaluate an export tree against the workspace invariants.
#[derive(Debug, Clone)]
pub struct ExportEvaluator {
    options: EvaluateOptions,
}

impl ExportEvaluator {
    pub fn new(options: EvaluateOptions) -> Self {
        Self { options }
    }

    pub fn run(&self, export_dir: &Path) -> Result<EvaluationResult, EvalError> {
        let total_start = Instant::now();
        let load_start = Instant::now();
        let tree = read_export_tree(export_dir)?;
        let load_ms = load_start.elapsed().as_millis();

        let validate_start = Instant::now();
        let patterns = Patterns::new()?;
        let mut violations = Vec::new();
        let mut warnings = Vec::new();

        check_identifiers(&tree, &patterns, &mut violations);
        check_layout(
            &tree,
            &patterns,
            self.options.day_boundary,
            &mut violations,
            &mut warnings,
        );
        let counts = check_threads(&tree, &mut violations);

        if violations.is_empty() {
            if let Err(err) = validate_workspace(&tree.to_workspace()) {
                violations.push(Violation::new("invalid_workspace", ".", err.to_string()));
            }
        }
        sort_violations(&mut violations);
        let validate_ms = validate_start.elapsed().as_millis();

        let mut by_code = BTreeMap::new();
        for violation in &violations {
            *by_code.entry(violation.code.clone()).or_insert(0_u64) += 1;
        }

        let metrics = MetricsReport {
            metrics_version: METRICS_VERSION.to_string(),
            export_dir: export_dir.display().to_string(),
            counts: ExportCounts {
                users: tree.users.len() as u64,
                channels: tree.channels.len() as u64,
                day_files: tree.day_files.len() as u64,
                ..counts
            },
            channels: channel_metrics(&tree),
            violations: by_code,
            warnings,
            performance: PerformanceMetrics {
                load_ms,
                validate_ms,
                total_ms: total_start.elapsed().as_millis(),
            },
        };

        let report = render_report(&metrics, &violations, self.options.max_examples);
        let (metrics_path, report_path) = match &self.options.out_dir {
            Some(out_dir) => {
                std::fs::create_dir_all(out_dir)?;
                let metrics_path = out_dir.join("metrics.json");
                std::fs::write(&metrics_path, serde_json::to_vec_pretty(&metrics)?)?;
                let report_path = out_dir.join("report.md");
                std::fs::write(&report_path, report.as_bytes())?;
                (Some(metrics_path), Some(report_path))
            }
            None => (None, None),
        };

        if violations.is_empty() {
            info!(
                export_dir = %export_dir.display(),
                messages = metrics.counts.messages,
                day_files = metrics.counts.day_files,
                "export verified"
            );
        } else {
            warn!(
                export_dir = %export_dir.display(),
                violations = violations.len(),
                "export has violations"
            );
        }

        if self.options.strict && !violations.is_empty() {
            return Err(EvalError::Violations(violations.len() as u64));
        }

        Ok(EvaluationResult {
            export_dir: export_dir.to_path_buf(),
            metrics_path,
            report_path,
            metrics,
            report,
            violations,
        })
    }
}

struct Patterns {
    user_id: Regex,
    channel_id: Regex,
    day_file: Regex,
}

impl Patterns {
    fn new() -> Result<Self, EvalError> {
        Ok(Self {
            user_id: Regex::new(r"^U[0-9A-Z]{10}$")?,
            channel_id: Regex::new(r"^C[0-9A-Z]{10}$")?,
            day_file: Regex::new(r"^(\d{4}-\d{2}-\d{2})\.json$")?,
        })
    }

    fn day_of_file(&self, file_name: &str) -> Option<NaiveDate> {
        let captures = self.day_file.captures(file_name)?;
        NaiveDate::parse_from_str(captures.get(1)?.as_str(), "%Y-%m-%d").ok()
    }
}

fn check_identifiers(tree: &ExportTree, patterns: &Patterns, violations: &mut Vec<Violation>) {
    for user in &tree.users {
        let path = format!("users.json#{}", user.id);
        if !patterns.user_id.is_match(&user.id) {
            violations.push(Violation::new(
                "bad_identifier",
                &path,
                format!("user id '{}' is malformed", user.id),
            ));
        }
        if user.profile.avatar_hash.len() != AVATAR_HASH_LEN {
            violations.push(Violation::new(
                "bad_identifier",
                &path,
                format!("avatar hash '{}' is not {AVATAR_HASH_LEN} characters", user.profile.avatar_hash),
            ));
        }
        if user.name.len() > MAX_NAME_LEN || user.real_name.len() > MAX_NAME_LEN {
            violations.push(Violation::new("bad_identifier", &path, "user name is too long"));
        }
        if user.profile.email.len() > MAX_EMAIL_LEN {
            violations.push(Violation::new("bad_identifier", &path, "email is too long"));
        }
    }

    for channel in &tree.channels {
        let path = format!("channels.json#{}", channel.id);
        if !patterns.channel_id.is_match(&channel.id) {
            violations.push(Violation::new(
                "bad_identifier",
                &path,
                format!("channel id '{}' is malformed", channel.id),
            ));
        }
        if channel.name.is_empty() || channel.name.len() > MAX_NAME_LEN {
            violations.push(Violation::new(
                "bad_identifier",
                &path,
                format!("channel name '{}' has invalid length", channel.name),
            ));
        }
    }
}

fn check_layout(
    tree: &ExportTree,
    patterns: &Patterns,
    boundary: DayBoundary,
    violations: &mut Vec<Violation>,
    warnings: &mut Vec<WarningItem>,
) {
    let names: HashSet<&str> = tree.channels.iter().map(|c| c.name.as_str()).collect();
    let dirs: HashSet<&str> = tree.channel_dirs.iter().map(String::as_str).collect();

    for dir in &tree.channel_dirs {
        if !names.contains(dir.as_str()) {
            violations.push(Violation::new(
                "unknown_channel_dir",
                dir.as_str(),
                "directory matches no channel in channels.json",
            ));
        }
    }
    for channel in &tree.channels {
        if !dirs.contains(channel.name.as_str()) {
            warnings.push(WarningItem {
                code: "missing_channel_dir".to_string(),
                path: channel.name.clone(),
                message: "channel has no directory".to_string(),
            });
        }
    }
    for entry in &tree.stray_entries {
        warnings.push(WarningItem {
            code: "stray_entry".to_string(),
            path: entry.display().to_string(),
            message: "entry is not part of the export layout".to_string(),
        });
    }

    for file in &tree.day_files {
        let path = file_path(file);
        let Some(day) = patterns.day_of_file(&file.file_name) else {
            violations.push(Violation::new(
                "bad_file_name",
                &path,
                "day files must be named YYYY-MM-DD.json",
            ));
            continue;
        };
        if file.messages.is_empty() {
            warnings.push(WarningItem {
                code: "empty_day_file".to_string(),
                path: path.clone(),
                message: "day file holds no messages".to_string(),
            });
        }
        for message in &file.messages {
            if boundary.day_of(message.ts) != Some(day) {
                violations.push(
                    Violation::new("wrong_day", &path, "message falls on another day")
                        .with_example(message.ts.to_string()),
                );
            }
        }
    }
}

/// Check per-channel uniqueness, membership and thread consistency.
///
/// Returns message and thread totals over known channels.
fn check_threads(tree: &ExportTree, violations: &mut Vec<Violation>) -> ExportCounts {
    let mut by_channel: BTreeMap<&str, Vec<(&DayFile, &MessageRecord)>> = BTreeMap::new();
    for file in &tree.day_files {
        for message in &file.messages {
            by_channel
                .entry(file.channel.as_str())
                .or_default()
                .push((file, message));
        }
    }

    let channels: HashMap<&str, &ChannelRecord> = tree
        .channels
        .iter()
        .map(|channel| (channel.name.as_str(), channel))
        .collect();

    let mut counts = ExportCounts::default();
    for (name, messages) in by_channel {
        let Some(channel) = channels.get(name) else {
            continue;
        };
        counts.messages += messages.len() as u64;
        check_channel(channel, &messages, &mut counts, violations);
    }
    counts
}

fn check_channel(
    channel: &ChannelRecord,
    messages: &[(&DayFile, &MessageRecord)],
    counts: &mut ExportCounts,
    violations: &mut Vec<Violation>,
) {
    let mut seen = HashSet::new();
    let mut parents: HashMap<Timestamp, (&DayFile, &MessageRecord)> = HashMap::new();
    for &(file, message) in messages {
        let path = file_path(file);
        if !seen.insert(message.ts) {
            violations.push(
                Violation::new("duplicate_ts", &path, "timestamp repeats within the channel")
                    .with_example(message.ts.to_string()),
            );
        }
        if !channel.members.contains(&message.user) {
            violations.push(
                Violation::new(
                    "not_member",
                    &path,
                    format!("author '{}' is not a member of '{}'", message.user, channel.name),
                )
                .with_example(message.ts.to_string()),
            );
        }
        if message.parent_user_id.is_none() && message.thread_ts == Some(message.ts) {
            parents.insert(message.ts, (file, message));
        }
    }

    let mut actual: HashMap<Timestamp, BTreeSet<(Timestamp, &str)>> = HashMap::new();
    for &(file, message) in messages {
        let Some(parent_user) = message.parent_user_id.as_deref() else {
            continue;
        };
        counts.thread_replies += 1;
        let path = file_path(file);
        let orphan = |reason: &str| {
            Violation::new("orphan_reply", &path, reason).with_example(message.ts.to_string())
        };

        let Some(thread_ts) = message.thread_ts else {
            violations.push(orphan("reply has no thread_ts"));
            continue;
        };
        let Some((_, parent)) = parents.get(&thread_ts) else {
            violations.push(orphan("no parent with this thread_ts in the channel"));
            continue;
        };
        if parent.user != parent_user {
            violations.push(orphan("parent_user_id differs from the parent author"));
        }
        if parent.ts >= message.ts {
            violations.push(orphan("reply is not later than its parent"));
        }
        actual
            .entry(thread_ts)
            .or_default()
            .insert((message.ts, message.user.as_str()));
    }

    for (ts, (file, parent)) in &parents {
        let listed = parent.replies.as_deref().unwrap_or_default();
        if !listed.is_empty() {
            counts.thread_parents += 1;
        }
        let path = file_path(file);
        let example = ts.to_string();

        let listed_set: BTreeSet<(Timestamp, &str)> = listed
            .iter()
            .map(|reply| (reply.ts, reply.user.as_str()))
            .collect();
        let found = actual.get(ts).cloned().unwrap_or_default();
        if parent.reply_count.unwrap_or(0) != listed.len() || listed_set != found {
            violations.push(
                Violation::new(
                    "reply_count_mismatch",
                    &path,
                    format!(
                        "reply_count {} with {} listed and {} found replies",
                        parent.reply_count.unwrap_or(0),
                        listed.len(),
                        found.len()
                    ),
                )
                .with_example(example.clone()),
            );
        }

        if listed.is_empty() {
            continue;
        }
        if parent.latest_reply != listed.iter().map(|reply| reply.ts).max() {
            violations.push(
                Violation::new(
                    "latest_reply_mismatch",
                    &path,
                    "latest_reply is not the newest listed reply",
                )
                .with_example(example.clone()),
            );
        }

        let mut distinct = HashSet::new();
        let expected: Vec<&str> = listed
            .iter()
            .map(|reply| reply.user.as_str())
            .filter(|user| distinct.insert(*user))
            .collect();
        let reply_users: Vec<&str> = parent
            .reply_users
            .iter()
            .flatten()
            .map(String::as_str)
            .collect();
        if reply_users != expected || parent.reply_users_count != Some(reply_users.len()) {
            violations.push(
                Violation::new(
                    "reply_users_mismatch",
                    &path,
                    "reply_users must list distinct reply authors in first-seen order",
                )
                .with_example(example),
            );
        }
    }
}

fn channel_metrics(tree: &ExportTree) -> Vec<ChannelMetrics> {
    let mut metrics: Vec<ChannelMetrics> = tree
        .channels
        .iter()
        .map(|channel| {
            let files = tree
                .day_files
                .iter()
                .filter(|file| file.channel == channel.name);
            let (day_files, messages) = files.fold((0_u64, 0_u64), |(count, total), file| {
                (count + 1, total + file.messages.len() as u64)
            });
            ChannelMetrics {
                name: channel.name.clone(),
                members: channel.members.len() as u64,
                messages,
                day_files,
            }
        })
        .collect();
    metrics.sort_by(|a, b| a.name.cmp(&b.name));
    metrics
}

fn file_path(file: &DayFile) -> String {
    format!("{}/{}", file.channel, file.file_name)
}

fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(|a, b| {
        (a.code.as_str(), a.path.as_str(), a.example.as_deref()).cmp(&(
            b.code.as_str(),
            b.path.as_str(),
            b.example.as_deref(),
        ))
    });
}
