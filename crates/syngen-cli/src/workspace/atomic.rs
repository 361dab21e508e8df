use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{WorkspaceError, WorkspaceResult};

/// Write `value` as pretty JSON, replacing `path` only once the data is on disk.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> WorkspaceResult<()> {
    let data = serde_json::to_vec_pretty(value)?;
    write_bytes_atomic(path, &data)
}

fn write_bytes_atomic(path: &Path, data: &[u8]) -> WorkspaceResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

fn temp_path(path: &Path) -> WorkspaceResult<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| WorkspaceError::Invalid("invalid path for atomic write".to_string()))?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_json_and_leaves_no_temp_file() {
        let dir = std::env::temp_dir().join(format!("syngen_atomic_{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("report.json");
        write_json_atomic(&path, &serde_json::json!({"messages": 3})).expect("write");

        let written: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).expect("read")).expect("parse");
        assert_eq!(written["messages"], 3);
        assert!(!path.with_file_name("report.json.tmp").exists());
    }

    #[test]
    fn rejects_paths_without_file_name() {
        let err = write_json_atomic(Path::new("/"), &1).unwrap_err();
        assert!(matches!(err, WorkspaceError::Invalid(_)));
    }
}
