use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn temp_dir(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!("syngen_cli_{label}_{}", uuid::Uuid::new_v4()))
}

fn syngen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_syngen"))
        .args(args)
        .output()
        .expect("run syngen")
}

fn zip_available() -> bool {
    Command::new("zip")
        .arg("-v")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf-8 path")
}

#[test]
fn generate_archives_and_cleans_up() {
    let root = temp_dir("generate");
    let work_dir = root.join("work");
    let archive = root.join("export.zip");

    let output = syngen(&[
        "generate",
        "-u",
        "3",
        "-c",
        "2",
        "-m",
        "20",
        "--seed",
        "1",
        "--utc",
        "--work-dir",
        path_str(&work_dir),
        path_str(&archive),
    ]);

    if zip_available() {
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        assert!(archive.is_file());
        assert!(!work_dir.exists());
    } else {
        assert!(!output.status.success());
        assert!(work_dir.join("users.json").is_file(), "tree is left intact");
    }
}

#[test]
fn kept_work_dir_verifies_cleanly() {
    let root = temp_dir("verify");
    let work_dir = root.join("work");
    let report = root.join("report.json");

    syngen(&[
        "generate",
        "-u",
        "4",
        "-c",
        "3",
        "-m",
        "120",
        "-t",
        "0.5",
        "--seed",
        "9",
        "--utc",
        "--keep-work-dir",
        "--work-dir",
        path_str(&work_dir),
        "--report",
        path_str(&report),
        path_str(&root.join("export.zip")),
    ]);
    assert!(report.is_file());

    let output = syngen(&["verify", "--strict", "--utc", path_str(&work_dir)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("# Syngen Export Report"));
    assert!(stdout.contains("- messages: 120"));
}

#[test]
fn invalid_counts_exit_non_zero() {
    let root = temp_dir("invalid");
    let work_dir = root.join("work");
    let output = syngen(&[
        "generate",
        "-u",
        "0",
        "--work-dir",
        path_str(&work_dir),
        path_str(&root.join("export.zip")),
    ]);

    assert!(!output.status.success());
    assert!(!work_dir.exists());
}
