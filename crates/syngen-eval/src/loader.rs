use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use syngen_core::{
    CHANNELS_FILE, ChannelRecord, MessageRecord, USERS_FILE, UserRecord, Workspace,
};

use crate::errors::EvalError;

/// A `<channel>/<file>.json` document as found on disk.
#[derive(Debug, Clone)]
pub struct DayFile {
    /// Name of the directory holding the file.
    pub channel: String,
    pub file_name: String,
    pub path: PathBuf,
    pub messages: Vec<MessageRecord>,
}

/// Raw contents of an export tree.
#[derive(Debug, Clone, Default)]
pub struct ExportTree {
    pub users: Vec<UserRecord>,
    pub channels: Vec<ChannelRecord>,
    /// Names of the directories under the root, sorted.
    pub channel_dirs: Vec<String>,
    /// Day files in directory then file name order.
    pub day_files: Vec<DayFile>,
    /// Entries under the root or a channel directory that are neither
    /// documents nor channel directories.
    pub stray_entries: Vec<PathBuf>,
}

impl ExportTree {
    /// Rebuild the workspace model.
    ///
    /// Day files in directories that match no channel are skipped. Messages
    /// are ordered by timestamp, then channel identifier.
    pub fn to_workspace(&self) -> Workspace {
        let ids: HashMap<&str, &str> = self
            .channels
            .iter()
            .map(|channel| (channel.name.as_str(), channel.id.as_str()))
            .collect();

        let mut messages = Vec::new();
        for file in &self.day_files {
            let Some(channel_id) = ids.get(file.channel.as_str()) else {
                continue;
            };
            messages.extend(
                file.messages
                    .iter()
                    .cloned()
                    .map(|record| record.into_message(channel_id)),
            );
        }
        messages.sort_by(|left, right| {
            left.ts
                .cmp(&right.ts)
                .then_with(|| left.channel.cmp(&right.channel))
        });

        Workspace {
            users: self.users.iter().cloned().map(UserRecord::into_user).collect(),
            channels: self
                .channels
                .iter()
                .cloned()
                .map(ChannelRecord::into_channel)
                .collect(),
            messages,
        }
    }
}

/// Parse an export tree into the workspace model.
pub fn load_export(dir: &Path) -> Result<Workspace, EvalError> {
    Ok(read_export_tree(dir)?.to_workspace())
}

/// Read every document of the export tree rooted at `dir`.
pub fn read_export_tree(dir: &Path) -> Result<ExportTree, EvalError> {
    if !dir.is_dir() {
        return Err(EvalError::InvalidExport(format!(
            "'{}' is not a directory",
            dir.display()
        )));
    }

    let mut tree = ExportTree {
        users: read_document(&dir.join(USERS_FILE))?,
        channels: read_document(&dir.join(CHANNELS_FILE))?,
        ..ExportTree::default()
    };

    for entry in sorted_entries(dir)? {
        let name = file_name(&entry);
        if entry.is_dir() {
            read_channel_dir(&entry, &name, &mut tree)?;
            tree.channel_dirs.push(name);
        } else if name != USERS_FILE && name != CHANNELS_FILE {
            tree.stray_entries.push(entry);
        }
    }

    debug!(
        users = tree.users.len(),
        channels = tree.channels.len(),
        day_files = tree.day_files.len(),
        "export tree read"
    );
    Ok(tree)
}

fn read_channel_dir(dir: &Path, channel: &str, tree: &mut ExportTree) -> Result<(), EvalError> {
    for entry in sorted_entries(dir)? {
        let name = file_name(&entry);
        if entry.is_file() && name.ends_with(".json") {
            tree.day_files.push(DayFile {
                channel: channel.to_string(),
                messages: read_document(&entry)?,
                file_name: name,
                path: entry,
            });
        } else {
            tree.stray_entries.push(entry);
        }
    }
    Ok(())
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, EvalError> {
    let contents = fs::read_to_string(path).map_err(|err| {
        EvalError::InvalidExport(format!("cannot read '{}': {err}", path.display()))
    })?;
    serde_json::from_str(&contents).map_err(|err| {
        EvalError::InvalidExport(format!("cannot parse '{}': {err}", path.display()))
    })
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, EvalError> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        entries.push(entry?.path());
    }
    entries.sort();
    Ok(entries)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
