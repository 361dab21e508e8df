use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use syngen_core::timestamp::DayBoundary;
use syngen_core::{
    CHANNELS_FILE, Channel, ChannelRecord, Message, MessageRecord, Timestamp, USERS_FILE, User,
    UserRecord,
};

use crate::errors::GenerationError;
use crate::model::GenerationIssue;

/// Grouping key of a message in the export tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartitionKey<'a> {
    pub channel: &'a str,
    pub day: NaiveDate,
    pub ts: Timestamp,
}

impl PartitionKey<'_> {
    /// Whether two keys land in the same day file.
    pub fn same_group(&self, other: &PartitionKey<'_>) -> bool {
        self.channel == other.channel && self.day == other.day
    }
}

/// Totals of a partitioned write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartitionStats {
    pub day_files: u64,
    pub messages: u64,
    pub bytes_written: u64,
}

/// Message indices ordered by (channel id, day, timestamp), paired with their key.
///
/// The sort is stable, so equal keys keep their stream order.
pub fn partition_order(
    messages: &[Message],
    boundary: DayBoundary,
) -> Result<Vec<(PartitionKey<'_>, usize)>, GenerationError> {
    let mut keyed = Vec::new();
    keyed.try_reserve_exact(messages.len())?;
    for (index, message) in messages.iter().enumerate() {
        let day = boundary.day_of(message.ts).ok_or_else(|| {
            syngen_core::Error::InvalidWorkspace(format!(
                "timestamp {} is outside the calendar range",
                message.ts
            ))
        })?;
        keyed.push((
            PartitionKey {
                channel: message.channel.as_str(),
                day,
                ts: message.ts,
            },
            index,
        ));
    }
    keyed.sort_by(|left, right| left.0.cmp(&right.0));
    Ok(keyed)
}

/// Write `users.json`.
pub fn write_users(root: &Path, users: &[User]) -> Result<u64, GenerationError> {
    let records: Vec<UserRecord> = users.iter().map(UserRecord::from).collect();
    write_json_document(&root.join(USERS_FILE), &records)
}

/// Write `channels.json` and create one directory per channel.
///
/// Directory failures are logged and recorded in `issues`; the channel's day
/// files will then fail and be recorded too.
pub fn write_channels(
    root: &Path,
    channels: &[Channel],
    issues: &mut Vec<GenerationIssue>,
) -> Result<u64, GenerationError> {
    let records: Vec<ChannelRecord> = channels.iter().map(ChannelRecord::from).collect();
    let bytes = write_json_document(&root.join(CHANNELS_FILE), &records)?;

    for channel in channels {
        let dir = root.join(&channel.name);
        if let Err(err) = std::fs::create_dir_all(&dir) {
            warn!(channel = %channel.name, path = %dir.display(), error = %err, "channel directory failed");
            issues.push(GenerationIssue::write_failed(&dir, &err));
        }
    }
    Ok(bytes)
}

/// Write one `<channel-name>/<YYYY-MM-DD>.json` per (channel, day) group.
///
/// Messages are ordered once by [`partition_order`] and flushed in a single
/// pass, so every day file is written exactly once. A failed day file is
/// logged and recorded in `issues`; the remaining groups are still written.
pub fn write_messages(
    root: &Path,
    channels: &[Channel],
    messages: &[Message],
    boundary: DayBoundary,
    issues: &mut Vec<GenerationIssue>,
) -> Result<PartitionStats, GenerationError> {
    let names: HashMap<&str, &str> = channels
        .iter()
        .map(|channel| (channel.id.as_str(), channel.name.as_str()))
        .collect();
    let order = partition_order(messages, boundary)?;

    let mut stats = PartitionStats::default();
    let mut group: Vec<MessageRecord> = Vec::new();
    let mut current: Option<PartitionKey<'_>> = None;

    for (key, index) in order {
        if let Some(open) = current.filter(|open| !open.same_group(&key)) {
            flush_group(root, &names, &open, &mut group, &mut stats, issues)?;
        }
        current = Some(key);
        group.push(MessageRecord::from(&messages[index]));
    }
    if let Some(open) = current {
        flush_group(root, &names, &open, &mut group, &mut stats, issues)?;
    }

    Ok(stats)
}

/// Relative path of the day file of `channel_name` for `day`.
pub fn day_file_path(channel_name: &str, day: NaiveDate) -> PathBuf {
    Path::new(channel_name).join(format!("{}.json", day.format("%Y-%m-%d")))
}

fn flush_group(
    root: &Path,
    names: &HashMap<&str, &str>,
    key: &PartitionKey<'_>,
    group: &mut Vec<MessageRecord>,
    stats: &mut PartitionStats,
    issues: &mut Vec<GenerationIssue>,
) -> Result<(), GenerationError> {
    let name = names.get(key.channel).ok_or_else(|| {
        syngen_core::Error::InvalidWorkspace(format!(
            "message references unknown channel '{}'",
            key.channel
        ))
    })?;
    let path = root.join(day_file_path(name, key.day));
    let count = group.len() as u64;

    match write_json_document(&path, group.as_slice()) {
        Ok(bytes) => {
            debug!(path = %path.display(), messages = count, bytes, "day file written");
            stats.day_files += 1;
            stats.messages += count;
            stats.bytes_written = stats.bytes_written.saturating_add(bytes);
        }
        Err(err) => {
            warn!(path = %path.display(), messages = count, error = %err, "day file failed");
            issues.push(GenerationIssue::write_failed(&path, &err));
        }
    }
    group.clear();
    Ok(())
}

/// Serialize `value` as pretty JSON into `path`, returning the bytes written.
///
/// The document is written next to `path` and renamed into place, so a failed
/// write never leaves a partial file at `path`.
pub fn write_json_document<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<u64, GenerationError> {
    let tmp_path = temp_path(path)?;
    let written = write_pretty(&tmp_path, value).and_then(|bytes| {
        std::fs::rename(&tmp_path, path)?;
        Ok(bytes)
    });
    if written.is_err() {
        if let Err(err) = std::fs::remove_file(&tmp_path) {
            debug!(path = %tmp_path.display(), error = %err, "temp file cleanup skipped");
        }
    }
    written
}

fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<u64, GenerationError> {
    let writer = BufWriter::new(File::create(path)?);
    let mut counting = CountingWriter::new(writer);
    serde_json::to_writer_pretty(&mut counting, value)?;
    counting.flush()?;
    Ok(counting.bytes_written())
}

fn temp_path(path: &Path) -> Result<PathBuf, GenerationError> {
    let file_name = path.file_name().ok_or_else(|| {
        GenerationError::InvalidOptions(format!("invalid document path: {}", path.display()))
    })?;
    Ok(path.with_file_name(format!("{}.tmp", file_name.to_string_lossy())))
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(channel: &str, secs: i64) -> Message {
        Message::new("U1", channel, Timestamp::from_secs(secs), "hi.")
    }

    #[test]
    fn partition_order_groups_by_channel_then_day() {
        let day = 86_400;
        let messages = vec![
            message("C2", 10),
            message("C1", day + 5),
            message("C1", 7),
            message("C2", 3),
            message("C1", 8),
        ];
        let order = partition_order(&messages, DayBoundary::Utc).expect("order");
        let indices: Vec<usize> = order.iter().map(|(_, index)| *index).collect();
        assert_eq!(indices, vec![2, 4, 1, 3, 0]);

        let groups = order
            .windows(2)
            .filter(|pair| !pair[0].0.same_group(&pair[1].0))
            .count()
            + 1;
        assert_eq!(groups, 3);
    }

    #[test]
    fn partition_order_is_idempotent() {
        let messages: Vec<Message> = (0..50)
            .map(|i| message(if i % 3 == 0 { "C1" } else { "C2" }, (i * 7_919) % 300_000))
            .collect();
        let first = partition_order(&messages, DayBoundary::Utc).expect("order");

        let regrouped: Vec<Message> = first
            .iter()
            .map(|(_, index)| messages[*index].clone())
            .collect();
        let second = partition_order(&regrouped, DayBoundary::Utc).expect("order");
        let second_indices: Vec<usize> = second.iter().map(|(_, index)| *index).collect();
        assert_eq!(second_indices, (0..regrouped.len()).collect::<Vec<_>>());
    }

    #[test]
    fn day_file_path_uses_iso_date() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 7).expect("date");
        assert_eq!(
            day_file_path("lorem-ipsum", day),
            Path::new("lorem-ipsum").join("2025-03-07.json")
        );
    }

    struct FailsAfter(usize);

    impl Serialize for FailsAfter {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            use serde::ser::{Error, SerializeSeq};
            let mut seq = serializer.serialize_seq(None)?;
            for index in 0..self.0 {
                seq.serialize_element(&format!("message {index}"))?;
            }
            Err(S::Error::custom("stream interrupted"))
        }
    }

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("syngen_json_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create dir");
        dir
    }

    #[test]
    fn failed_document_leaves_no_file_behind() {
        let dir = scratch_dir();
        let path = dir.join("2025-03-07.json");

        let result = write_json_document(&path, &FailsAfter(500));
        assert!(matches!(result, Err(GenerationError::Json(_))));
        assert!(!path.exists(), "partial day file left at {}", path.display());
        let leftovers: Vec<_> = std::fs::read_dir(&dir).expect("read dir").collect();
        assert!(leftovers.is_empty(), "unexpected entries: {leftovers:?}");
    }

    #[test]
    fn failed_group_is_reported_and_skipped() {
        let dir = scratch_dir();
        let channel = Channel {
            id: "C1".to_string(),
            name: "lorem-ipsum".to_string(),
            created: 0,
            creator: "U1".to_string(),
            members: vec!["U1".to_string()],
        };
        let messages = vec![message("C1", 10), message("C1", 86_400 + 10)];
        std::fs::create_dir_all(dir.join("lorem-ipsum")).expect("channel dir");
        let blocked = dir.join("lorem-ipsum").join("1970-01-01.json");
        std::fs::create_dir_all(blocked.join("occupied")).expect("blocking dir");

        let mut issues = Vec::new();
        let stats = write_messages(&dir, &[channel], &messages, DayBoundary::Utc, &mut issues)
            .expect("write messages");

        assert_eq!(stats.day_files, 1);
        assert_eq!(stats.messages, 1);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "write_failed");
        assert!(blocked.is_dir());
        assert!(!dir.join("lorem-ipsum").join("1970-01-01.json.tmp").exists());
        assert!(dir.join("lorem-ipsum").join("1970-01-02.json").is_file());
    }

    #[test]
    fn counting_writer_tracks_bytes() {
        let mut counting = CountingWriter::new(Vec::new());
        counting.write_all(b"hello").expect("write");
        counting.write_all(b" world").expect("write");
        assert_eq!(counting.bytes_written(), 11);
        assert_eq!(counting.inner, b"hello world");
    }
}
