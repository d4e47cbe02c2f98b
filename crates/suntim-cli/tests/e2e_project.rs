//! E2E tests for saving and reopening project documents.

mod common;

use common::{script, suntim_cmd};
use predicates::str::contains;

#[test]
fn save_then_reopen() {
    let dir = tempfile::tempdir().expect("create project dir");
    let file = dir.path().join("bali.suntim");
    let file_arg = file.to_str().expect("valid utf8");

    let (mut cmd, _guard) = suntim_cmd();
    cmd.args(["--save", file_arg])
        .write_stdin(script("title LKPD Bali\nstage review_kabid\nassign O1 KT 0 p1\n"))
        .assert()
        .success()
        .stdout(contains("saved"));

    let json = std::fs::read_to_string(&file).expect("read saved file");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["version"], "1.0");
    assert_eq!(value["projectTitle"], "LKPD Bali");
    assert_eq!(value["status"], "review_kabid");
    assert_eq!(value["assignments"]["O1:KT:0"], "p1");
    assert_eq!(value["examiners"].as_array().map(Vec::len), Some(4));

    let (mut cmd, _guard) = suntim_cmd();
    cmd.args(["--project", file_arg])
        .write_stdin("status\nshow\nundo\n")
        .assert()
        .success()
        .stdout(contains("project: LKPD Bali [RevKabid]"))
        .stdout(contains("can_undo: false"))
        .stdout(contains("KT   0  p1 Budi Santoso"))
        .stdout(contains("nothing to undo"));
}

#[test]
fn save_into_directory_uses_generated_name() {
    let dir = tempfile::tempdir().expect("create project dir");
    let dir_arg = dir.path().to_str().expect("valid utf8");

    let (mut cmd, _guard) = suntim_cmd();
    cmd.args(["--save", dir_arg])
        .write_stdin(script("stage final\n"))
        .assert()
        .success()
        .stdout(contains("SUNTIM_FINAL_"));

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .expect("read dir")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("SUNTIM_FINAL_"));
    assert!(names[0].ends_with(".suntim"));

    // A directory as --project opens its newest document.
    let (mut cmd, _guard) = suntim_cmd();
    cmd.args(["--project", dir_arg])
        .write_stdin("show\n")
        .assert()
        .success()
        .stdout(contains("O2 Kota Denpasar"));
}

#[test]
fn save_command_uses_project_dir_from_env() {
    let dir = tempfile::tempdir().expect("create project dir");

    let (mut cmd, _guard) = suntim_cmd();
    cmd.env("SUNTIM_PROJECT_DIR", dir.path())
        .write_stdin(script("save\n"))
        .assert()
        .success()
        .stdout(contains("SUNTIM_DraftDAC_"));

    assert_eq!(std::fs::read_dir(dir.path()).expect("read dir").count(), 1);
}

#[test]
fn missing_project_fails() {
    let (mut cmd, guard) = suntim_cmd();
    let missing = guard.path().join("nope.suntim");
    cmd.args(["--project", missing.to_str().expect("valid utf8")])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(contains("cannot open"));
}

#[test]
fn future_version_is_rejected() {
    let dir = tempfile::tempdir().expect("create project dir");
    let file = dir.path().join("future.suntim");
    std::fs::write(
        &file,
        r#"{"version":"2.0","timestamp":"2024-01-01T00:00:00Z"}"#,
    )
    .expect("write file");

    let (mut cmd, _guard) = suntim_cmd();
    cmd.args(["--project", file.to_str().expect("valid utf8")])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(contains("version incompatible"));
}

#[test]
fn invalid_document_is_rejected() {
    let dir = tempfile::tempdir().expect("create project dir");
    let file = dir.path().join("broken.suntim");
    std::fs::write(
        &file,
        r#"{
  "version": "1.0",
  "timestamp": "2024-01-01T00:00:00Z",
  "objects": [{ "id": "O1", "name": "Bali", "slots": { "KT": 1 } }],
  "assignments": { "O1:KT:0": "p1", "O1:KT:5": "p2" }
}"#,
    )
    .expect("write file");

    let (mut cmd, _guard) = suntim_cmd();
    cmd.args(["--project", file.to_str().expect("valid utf8")])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(contains("invalid project"));
}

#[test]
fn script_file_argument() {
    let dir = tempfile::tempdir().expect("create script dir");
    let path = dir.path().join("setup.txt");
    std::fs::write(&path, script("assign O2 AT 1 p3\nshow\n")).expect("write script");

    let (mut cmd, _guard) = suntim_cmd();
    cmd.args(["--script", path.to_str().expect("valid utf8")])
        .assert()
        .success()
        .stdout(contains("AT   1  p3 Eka"));
}
