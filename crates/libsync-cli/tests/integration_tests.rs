//! Integration tests for the libsync CLI binary.
//!
//! These tests exercise the actual compiled binary using assert_cmd.

use assert_cmd::Command;
use libsync_test_utils::TestLibrary;
use predicates::prelude::*;

/// Get a Command for the libsync binary with colors disabled
fn libsync_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("libsync"));
    cmd.env("NO_COLOR", "1")
        .env_remove("LIBSYNC_SOURCE")
        .env_remove("LIBSYNC_DEST");
    cmd
}

/// Command pointed at a test library's source and destination roots
fn sync_cmd(lib: &TestLibrary) -> Command {
    let mut cmd = libsync_cmd();
    cmd.arg("--source")
        .arg(lib.source_root())
        .arg("--dest")
        .arg(lib.dest_root());
    cmd
}

// ============================================================================
// Help, Version and Argument Errors
// ============================================================================

#[test]
fn test_help_output() {
    libsync_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--no-diff"));
}

#[test]
fn test_help_performs_no_sync() {
    let lib = TestLibrary::new();
    lib.write_source("agents", "a.md", "A");

    sync_cmd(&lib).arg("--help").assert().success();

    assert!(lib.snapshot_dest().is_empty());
}

#[test]
fn test_version_output() {
    libsync_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("libsync"));
}

#[test]
fn test_unknown_flag_exits_one_with_usage() {
    let lib = TestLibrary::new();
    lib.write_source("agents", "a.md", "A");

    sync_cmd(&lib)
        .arg("--mirror")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--mirror"))
        .stderr(predicate::str::contains("Usage"));

    assert!(lib.snapshot_dest().is_empty());
}

#[test]
fn test_bad_config_exits_one() {
    let lib = TestLibrary::new();
    lib.write_source("agents", "a.md", "A");
    std::fs::write(lib.source_root().join("libsync.toml"), "destination = [").unwrap();

    sync_cmd(&lib)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("libsync.toml"));
}

// ============================================================================
// Sync Scenarios
// ============================================================================

#[test]
fn test_first_sync_then_update() {
    let lib = TestLibrary::new();
    lib.write_source("commands", "a.md", "X\n")
        .write_source("commands", "b.md", "Y\n");

    sync_cmd(&lib)
        .assert()
        .success()
        .stdout(predicate::str::contains("+ a.md"))
        .stdout(predicate::str::contains("+ b.md"))
        .stdout(predicate::str::contains("New: 2"))
        .stdout(predicate::str::contains("Updated: 0"))
        .stdout(predicate::str::contains("Unchanged: 0"))
        .stdout(predicate::str::contains("Synced 2 file(s)."));

    lib.write_source("commands", "a.md", "X2\n");

    sync_cmd(&lib)
        .assert()
        .success()
        .stdout(predicate::str::contains("~ a.md"))
        .stdout(predicate::str::contains("= b.md"))
        .stdout(predicate::str::contains("-X"))
        .stdout(predicate::str::contains("+X2"))
        .stdout(predicate::str::contains("New: 0"))
        .stdout(predicate::str::contains("Updated: 1"))
        .stdout(predicate::str::contains("Unchanged: 1"));

    lib.assert_dest_eq("commands", "a.md", "X2\n");
}

#[test]
fn test_second_run_is_up_to_date() {
    let lib = TestLibrary::new();
    lib.write_source("agents", "a.md", "A");

    sync_cmd(&lib).assert().success();
    sync_cmd(&lib)
        .assert()
        .success()
        .stdout(predicate::str::contains("Unchanged: 1"))
        .stdout(predicate::str::contains("Everything is already up to date."));
}

#[test]
fn test_dry_run_reports_but_does_not_write() {
    let lib = TestLibrary::new();
    lib.write_source("commands", "a.md", "X\n")
        .write_source("commands", "b.md", "Y\n");
    sync_cmd(&lib).assert().success();
    lib.write_source("commands", "a.md", "X2\n");

    sync_cmd(&lib)
        .args(["--dry-run", "--backup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.md (would update)"))
        .stdout(predicate::str::contains("Updated: 1"))
        .stdout(predicate::str::contains("Dry run: no changes were applied."));

    lib.assert_dest_eq("commands", "a.md", "X\n");
    assert!(lib.read_dest("commands", "a.md.bak").is_none());
}

#[test]
fn test_no_diff_suppresses_diff() {
    let lib = TestLibrary::new();
    lib.write_dest("skills", "s.md", "old line\n")
        .write_source("skills", "s.md", "new line\n");

    sync_cmd(&lib)
        .arg("--no-diff")
        .assert()
        .success()
        .stdout(predicate::str::contains("~ s.md"))
        .stdout(predicate::str::contains("+new line").not())
        .stdout(predicate::str::contains("@@").not());
}

#[test]
fn test_backup_flag_writes_bak() {
    let lib = TestLibrary::new();
    lib.write_dest("agents", "a.md", "before")
        .write_source("agents", "a.md", "after");

    sync_cmd(&lib)
        .arg("--backup")
        .assert()
        .success()
        .stdout(predicate::str::contains("(backup: a.md.bak)"));

    lib.assert_dest_eq("agents", "a.md", "after");
    lib.assert_dest_eq("agents", "a.md.bak", "before");
}

#[test]
fn test_verbose_reports_checking() {
    let lib = TestLibrary::new();
    lib.write_source("agents", "a.md", "A");

    sync_cmd(&lib)
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("checking agents/a.md"));
}

#[test]
fn test_missing_category_warns_and_exits_zero() {
    let lib = TestLibrary::new();
    lib.write_source("agents", "a.md", "A");

    sync_cmd(&lib)
        .assert()
        .success()
        .stdout(predicate::str::contains("WARN"))
        .stdout(predicate::str::contains("commands"))
        .stdout(predicate::str::contains("New: 1"));
}

#[test]
fn test_empty_library_exits_zero() {
    let lib = TestLibrary::new();

    sync_cmd(&lib)
        .assert()
        .success()
        .stdout(predicate::str::contains("Everything is already up to date."));
}

#[test]
fn test_file_error_is_reported_and_run_continues() {
    let lib = TestLibrary::new();
    lib.write_source("agents", "a.md", "A")
        .write_source("agents", "b.md", "B");
    std::fs::create_dir_all(lib.dest_dir("agents").join("a.md")).unwrap();

    sync_cmd(&lib)
        .assert()
        .success()
        .stdout(predicate::str::contains("! a.md"))
        .stdout(predicate::str::contains("Skipped: 1"))
        .stdout(predicate::str::contains("New: 1"));

    lib.assert_dest_eq("agents", "b.md", "B");
}

#[test]
fn test_environment_selects_roots() {
    let lib = TestLibrary::new();
    lib.write_source("skills", "s.md", "S");

    libsync_cmd()
        .env("LIBSYNC_SOURCE", lib.source_root())
        .env("LIBSYNC_DEST", lib.dest_root())
        .assert()
        .success();

    lib.assert_dest_eq("skills", "s.md", "S");
}

#[test]
fn test_config_file_maps_categories() {
    let lib = TestLibrary::new();
    lib.write_source("prompts", "p.md", "P");
    std::fs::write(
        lib.source_root().join("libsync.toml"),
        "[[categories]]\nlabel = \"prompts\"\ndestination = \"commands\"\n",
    )
    .unwrap();

    sync_cmd(&lib).assert().success();

    lib.assert_dest_eq("commands", "p.md", "P");
}

#[test]
fn test_source_defaults_to_current_directory() {
    let lib = TestLibrary::new();
    lib.write_source("agents", "a.md", "A");

    libsync_cmd()
        .current_dir(lib.source_root())
        .arg("--dest")
        .arg(lib.dest_root())
        .assert()
        .success();

    lib.assert_dest_eq("agents", "a.md", "A");
}
