use std::path::{Path, PathBuf};

use tracing::debug;

use super::{WorkspaceError, WorkspaceResult};

/// `syngen_temp_<pid>` in the current directory.
pub fn default_work_dir() -> PathBuf {
    PathBuf::from(format!("syngen_temp_{}", std::process::id()))
}

/// Directory the export tree is written to before archiving.
#[derive(Debug)]
pub struct WorkDir {
    path: PathBuf,
}

impl WorkDir {
    /// Create `path`, refusing a directory that already has content.
    pub fn prepare(path: PathBuf) -> WorkspaceResult<Self> {
        if path.exists() {
            if !path.is_dir() {
                return Err(WorkspaceError::Invalid(format!(
                    "work directory '{}' is not a directory",
                    path.display()
                )));
            }
            if std::fs::read_dir(&path)?.next().is_some() {
                return Err(WorkspaceError::Invalid(format!(
                    "work directory '{}' is not empty",
                    path.display()
                )));
            }
        }
        std::fs::create_dir_all(&path)?;
        debug!(path = %path.display(), "work directory ready");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the directory and everything in it.
    pub fn remove(self) -> WorkspaceResult<()> {
        std::fs::remove_dir_all(&self.path)?;
        debug!(path = %self.path.display(), "work directory removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!("syngen_{label}_{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn default_name_carries_process_id() {
        let name = default_work_dir();
        assert_eq!(
            name.to_string_lossy(),
            format!("syngen_temp_{}", std::process::id())
        );
    }

    #[test]
    fn prepare_then_remove() {
        let path = temp_path("work");
        let work_dir = WorkDir::prepare(path.clone()).expect("prepare");
        std::fs::write(work_dir.path().join("users.json"), b"[]").expect("write");
        work_dir.remove().expect("remove");
        assert!(!path.exists());
    }

    #[test]
    fn refuses_non_empty_directory() {
        let path = temp_path("busy");
        std::fs::create_dir_all(&path).expect("mkdir");
        std::fs::write(path.join("stale.json"), b"{}").expect("write");

        let err = WorkDir::prepare(path).unwrap_err();
        assert!(matches!(err, WorkspaceError::Invalid(_)));
    }
}
