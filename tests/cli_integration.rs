use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn dragly(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dragly").unwrap();
    cmd.env("DRAGLY_HOME", home).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_add_and_list() {
    let temp_dir = tempfile::tempdir().unwrap();

    dragly(temp_dir.path())
        .args(["add", "Buy", "milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added (1): Buy milk"));

    dragly(temp_dir.path())
        .args(["add", "Call Bob"])
        .assert()
        .success();

    let output = dragly(temp_dir.path()).arg("list").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let bob = stdout.find("Call Bob").unwrap();
    let milk = stdout.find("Buy milk").unwrap();
    assert!(bob < milk, "newest snippet should be listed first");
}

#[test]
fn test_add_blank_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    dragly(temp_dir.path())
        .args(["add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));
}

#[test]
fn test_empty_queue() {
    let temp_dir = tempfile::tempdir().unwrap();

    dragly(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Queue is empty."));
}

#[test]
fn test_copy_print_marks_used_and_clear_removes() {
    let temp_dir = tempfile::tempdir().unwrap();

    dragly(temp_dir.path()).args(["add", "first"]).assert().success();
    dragly(temp_dir.path()).args(["add", "second"]).assert().success();

    dragly(temp_dir.path())
        .args(["copy", "2", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::diff("first\n"));

    dragly(temp_dir.path())
        .args(["copy", "2", "--print"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already used"));

    dragly(temp_dir.path())
        .args(["list", "--active"])
        .assert()
        .success()
        .stdout(predicate::str::contains("second").and(predicate::str::contains("first").not()));

    dragly(temp_dir.path())
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 used snippet"));

    dragly(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("second").and(predicate::str::contains("first").not()));
}

#[test]
fn test_toggle_remove_and_bad_index() {
    let temp_dir = tempfile::tempdir().unwrap();

    for text in ["a", "b", "c"] {
        dragly(temp_dir.path()).args(["add", text]).assert().success();
    }

    dragly(temp_dir.path())
        .args(["toggle", "1-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked used (1): c"))
        .stdout(predicate::str::contains("Marked used (2): b"));

    dragly(temp_dir.path())
        .args(["rm", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Index 9 not found"));

    dragly(temp_dir.path())
        .args(["rm", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed (3): a"));

    dragly(temp_dir.path())
        .args(["clear", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 2 snippets"));
}

#[test]
fn test_edit_and_move() {
    let temp_dir = tempfile::tempdir().unwrap();

    dragly(temp_dir.path()).args(["add", "old"]).assert().success();
    dragly(temp_dir.path()).args(["add", "top"]).assert().success();

    dragly(temp_dir.path())
        .args(["edit", "2", "new", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated (2): new text"));

    dragly(temp_dir.path())
        .args(["mv", "2", "1"])
        .assert()
        .success();

    dragly(temp_dir.path())
        .args(["copy", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::diff("new text\n"));
}

#[test]
fn test_path_points_into_data_dir() {
    let temp_dir = tempfile::tempdir().unwrap();

    dragly(temp_dir.path())
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("dragly.items.json"));
}

#[test]
fn test_data_dir_flag_overrides_env() {
    let env_dir = tempfile::tempdir().unwrap();
    let flag_dir = tempfile::tempdir().unwrap();

    dragly(env_dir.path())
        .arg("--data-dir")
        .arg(flag_dir.path())
        .args(["add", "flagged"])
        .assert()
        .success();

    assert!(flag_dir.path().join("dragly.items.json").exists());
    dragly(env_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Queue is empty."));
}

#[test]
fn test_list_leaves_unparsable_data_untouched() {
    let temp_dir = tempfile::tempdir().unwrap();
    let data_file = temp_dir.path().join("dragly.items.json");
    let truncated =
        r#"[{"id":"0b7c1f7e-0a0c-4d59-9d25-3c0a3c1f8b11","text":"keep me","isUsed":false},"#;
    fs::write(&data_file, truncated).unwrap();

    dragly(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Queue is empty."));

    dragly(temp_dir.path())
        .args(["rm", "1"])
        .assert()
        .failure();

    assert_eq!(fs::read_to_string(&data_file).unwrap(), truncated);
}

#[test]
fn test_malformed_config_falls_back_to_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("config.json"), "{ broken").unwrap();

    dragly(temp_dir.path())
        .args(["add", "still works"])
        .assert()
        .success();

    dragly(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("still works"));
    assert!(temp_dir.path().join("dragly.items.json").exists());
}
