//! End-to-end tests driving the vidbatch binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// Test utilities

fn vidbatch() -> Command {
    let mut cmd = Command::cargo_bin("vidbatch").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn setup(files: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for file in files {
        let path = temp_dir.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"fake video data").unwrap();
    }
    temp_dir
}

fn exists(root: &Path, name: &str) -> bool {
    root.join(name).exists()
}

// ============================================================================
// GENERAL CLI TESTS
// ============================================================================

#[test]
fn test_help_lists_commands() {
    vidbatch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rename"))
        .stdout(predicate::str::contains("transcode"))
        .stdout(predicate::str::contains("remux"));
}

#[test]
fn test_missing_root_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    vidbatch()
        .arg("rename")
        .arg(temp_dir.path().join("missing"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_root_and_here_conflict() {
    let temp_dir = TempDir::new().unwrap();
    vidbatch()
        .arg("rename")
        .arg(temp_dir.path())
        .arg("--here")
        .assert()
        .failure();
}

#[test]
fn test_root_is_required() {
    vidbatch().arg("rename").assert().failure();
}

#[test]
fn test_invalid_config_file_is_fatal() {
    let temp_dir = setup(&["a.webm"]);
    let config = temp_dir.path().join("vidbatch.toml");
    fs::write(&config, "[rename]\nstyle = \"roman\"\n").unwrap();

    vidbatch()
        .arg("--config")
        .arg(&config)
        .arg("rename")
        .arg(temp_dir.path())
        .assert()
        .code(1);

    assert!(exists(temp_dir.path(), "a.webm"));
}

// ============================================================================
// RENAME COMMAND TESTS
// ============================================================================

#[test]
fn test_rename_only_webm() {
    let temp_dir = setup(&["b.webm", "a.webm", "c.txt"]);

    vidbatch()
        .arg("rename")
        .arg(temp_dir.path())
        .args(["--only", "webm"])
        .assert()
        .success();

    assert!(exists(temp_dir.path(), "1_a.webm"));
    assert!(exists(temp_dir.path(), "2_b.webm"));
    assert!(exists(temp_dir.path(), "c.txt"));
}

#[test]
fn test_rename_json_report() {
    let temp_dir = setup(&["b.webm", "a.webm", "c.txt"]);

    vidbatch()
        .arg("--json")
        .arg("rename")
        .arg(temp_dir.path())
        .args(["--only", ".webm", "--style", "episode"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"command\": \"rename\""))
        .stdout(predicate::str::contains("\"changed\": 2"))
        .stdout(predicate::str::contains("\"skipped\": 1"));

    assert!(exists(temp_dir.path(), "E01_a.webm"));
    assert!(exists(temp_dir.path(), "E02_b.webm"));
}

#[test]
fn test_rename_here_uses_current_directory() {
    let temp_dir = setup(&["clip.mkv"]);

    vidbatch()
        .current_dir(temp_dir.path())
        .args(["rename", "--here"])
        .assert()
        .success();

    assert!(exists(temp_dir.path(), "1_clip.mkv"));
}

#[test]
fn test_rename_collision_exits_with_errors() {
    let temp_dir = setup(&["a.webm", "b.webm"]);
    fs::create_dir(temp_dir.path().join("1_a.webm")).unwrap();

    vidbatch()
        .arg("rename")
        .arg(temp_dir.path())
        .assert()
        .code(2);

    assert!(exists(temp_dir.path(), "a.webm"));
    assert!(exists(temp_dir.path(), "2_b.webm"));
}

#[test]
fn test_rename_dry_run() {
    let temp_dir = setup(&["b.webm", "a.webm"]);

    vidbatch()
        .arg("rename")
        .arg(temp_dir.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stderr(predicate::str::contains("Would rename"));

    assert!(exists(temp_dir.path(), "a.webm"));
    assert!(exists(temp_dir.path(), "b.webm"));
}

#[test]
fn test_rename_only_and_exclude_conflict() {
    let temp_dir = setup(&["a.webm"]);

    vidbatch()
        .arg("rename")
        .arg(temp_dir.path())
        .args(["--only", "webm", "--exclude", "py"])
        .assert()
        .failure();

    assert!(exists(temp_dir.path(), "a.webm"));
}

// ============================================================================
// ENCODE COMMAND TESTS
// ============================================================================

#[test]
fn test_transcode_missing_encoder_is_fatal() {
    let temp_dir = setup(&["a.mp4"]);

    vidbatch()
        .arg("transcode")
        .arg(temp_dir.path())
        .args(["--encoder", "vidbatch-no-such-encoder"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("vidbatch-no-such-encoder"));
}

#[test]
fn test_missing_encoder_is_fatal_without_inputs() {
    let temp_dir = setup(&["notes.txt"]);

    vidbatch()
        .arg("transcode")
        .arg(temp_dir.path())
        .args(["--encoder", "vidbatch-no-such-encoder"])
        .assert()
        .code(1);
}

#[test]
fn test_remux_missing_encoder_leaves_tree_untouched() {
    let temp_dir = setup(&["s1/a.mp4"]);

    vidbatch()
        .arg("remux")
        .arg(temp_dir.path())
        .args(["--encoder", "vidbatch-no-such-encoder"])
        .assert()
        .code(1);

    assert!(!temp_dir.path().join("processed").exists());
}

#[cfg(unix)]
#[test]
fn test_transcode_encoder_failure_exits_with_errors() {
    let temp_dir = setup(&["a.mp4", "b.mov"]);

    vidbatch()
        .arg("--json")
        .arg("transcode")
        .arg(temp_dir.path())
        .args(["--encoder", "false"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"processed\": 2"));
}

#[cfg(unix)]
#[test]
fn test_transcode_encoder_success() {
    let temp_dir = setup(&["a.mp4"]);

    vidbatch()
        .arg("transcode")
        .arg(temp_dir.path())
        .args(["--encoder", "true", "--stream"])
        .assert()
        .success();
}

#[cfg(unix)]
#[test]
fn test_remux_creates_mirrored_directories() {
    let temp_dir = setup(&["s1/a.mp4", "s2/b.mkv"]);

    vidbatch()
        .arg("remux")
        .arg(temp_dir.path())
        .args(["--encoder", "true"])
        .assert()
        .success();

    assert!(temp_dir.path().join("processed/s1").is_dir());
    assert!(!temp_dir.path().join("processed/s2").exists());
}
