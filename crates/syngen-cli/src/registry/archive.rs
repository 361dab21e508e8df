use std::path::Path;
use std::process::Command;

use tracing::info;

use super::{RegistryError, RegistryResult};

/// System tool used to fold the export tree into one file.
pub const ARCHIVE_PROGRAM: &str = "zip";

/// Zip the contents of `tree_dir` into `output`.
pub fn archive_tree(tree_dir: &Path, output: &Path) -> RegistryResult<()> {
    archive_tree_with(ARCHIVE_PROGRAM, tree_dir, output)
}

/// Run `<program> -q -r <output> .` inside `tree_dir`.
///
/// Entries are stored relative to `tree_dir`, so the archive holds
/// `users.json`, `channels.json` and the channel directories at its root.
/// `output` should be absolute; a relative path resolves against `tree_dir`.
pub fn archive_tree_with(program: &str, tree_dir: &Path, output: &Path) -> RegistryResult<()> {
    let result = Command::new(program)
        .arg("-q")
        .arg("-r")
        .arg(output)
        .arg(".")
        .current_dir(tree_dir)
        .output()
        .map_err(|source| RegistryError::ArchiverUnavailable {
            program: program.to_string(),
            source,
        })?;

    if !result.status.success() {
        return Err(RegistryError::ArchiveFailed {
            status: result.status.to_string(),
            stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        });
    }

    info!(output = %output.display(), "archive written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_archiver_is_reported() {
        let dir = std::env::temp_dir();
        let err = archive_tree_with(
            "syngen-no-such-archiver",
            &dir,
            &dir.join("out.zip"),
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::ArchiverUnavailable { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn failing_archiver_reports_status() {
        let dir = std::env::temp_dir();
        let err = archive_tree_with("false", &dir, &dir.join("out.zip")).unwrap_err();
        assert!(matches!(err, RegistryError::ArchiveFailed { .. }));
    }
}
