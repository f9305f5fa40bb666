//! End-to-end CLI tests against a temp data file.

use std::path::Path;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn td(data_file: &Path) -> Command {
    let mut cmd = Command::cargo_bin("td").expect("binary");
    cmd.env("TD_DATA_FILE", data_file);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn add_task(data_file: &Path, text: &str, priority: &str) -> serde_json::Value {
    let output = td(data_file)
        .args(["add", text, "--priority", priority, "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("json envelope")
}

fn task_id(envelope: &serde_json::Value) -> String {
    envelope["data"]["id"]
        .as_str()
        .expect("task id")
        .to_string()
}

#[test]
fn add_list_toggle_remove_flow() {
    let temp = TempDir::new().expect("tempdir");
    let data_file = temp.path().join("tasks.json");

    let a = task_id(&add_task(&data_file, "A", "low"));
    let b = task_id(&add_task(&data_file, "B", "high"));
    assert_ne!(a, b);

    // Both ongoing, insertion order preserved
    let output = td(&data_file)
        .args(["list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let listed: serde_json::Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(listed["data"]["count"], 2);
    assert_eq!(listed["data"]["tasks"][0]["text"], "A");
    assert_eq!(listed["data"]["tasks"][0]["priority"], "Low");
    assert_eq!(listed["data"]["tasks"][0]["completed"], false);
    assert_eq!(listed["data"]["tasks"][1]["text"], "B");

    // Complete A
    td(&data_file).args(["toggle", &a]).assert().success();

    let output = td(&data_file)
        .args(["list", "--filter", "completed", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let completed: serde_json::Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(completed["data"]["count"], 1);
    assert_eq!(completed["data"]["tasks"][0]["id"], a.as_str());
    assert!(completed["data"]["tasks"][0]["completedAt"].is_string());

    let output = td(&data_file)
        .args(["list", "--filter", "ongoing", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let ongoing: serde_json::Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(ongoing["data"]["count"], 1);
    assert_eq!(ongoing["data"]["tasks"][0]["id"], b.as_str());

    // Remove A; only B remains
    td(&data_file).args(["remove", &a]).assert().success();
    let output = td(&data_file)
        .args(["list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let remaining: serde_json::Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(remaining["data"]["count"], 1);
    assert_eq!(remaining["data"]["tasks"][0]["id"], b.as_str());
}

#[test]
fn edit_changes_text_and_priority_only() {
    let temp = TempDir::new().expect("tempdir");
    let data_file = temp.path().join("tasks.json");

    let id = task_id(&add_task(&data_file, "Draft email", "low"));
    td(&data_file).args(["toggle", &id]).assert().success();

    let output = td(&data_file)
        .args(["edit", &id, "--text", "Send email", "--priority", "high", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let edited: serde_json::Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(edited["data"]["text"], "Send email");
    assert_eq!(edited["data"]["priority"], "High");
    assert_eq!(edited["data"]["completed"], true);
    assert!(edited["data"]["completedAt"].is_string());
}

#[test]
fn id_prefix_is_accepted() {
    let temp = TempDir::new().expect("tempdir");
    let data_file = temp.path().join("tasks.json");

    let id = task_id(&add_task(&data_file, "Prefixed", "medium"));
    td(&data_file)
        .args(["show", &id[..8]])
        .assert()
        .success()
        .stdout(contains("Prefixed"));
}

#[test]
fn empty_text_is_a_user_error() {
    let temp = TempDir::new().expect("tempdir");
    let data_file = temp.path().join("tasks.json");

    td(&data_file)
        .args(["add", "   "])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("cannot be empty"));

    td(&data_file)
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(contains("\"count\": 0"));
}

#[test]
fn unknown_id_is_a_user_error() {
    let temp = TempDir::new().expect("tempdir");
    let data_file = temp.path().join("tasks.json");

    add_task(&data_file, "Only task", "medium");

    for cmd in ["toggle", "remove", "show"] {
        td(&data_file)
            .args([cmd, "ffffffff"])
            .assert()
            .failure()
            .code(2)
            .stderr(contains("Task not found"));
    }
}

#[test]
fn unknown_priority_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let data_file = temp.path().join("tasks.json");

    td(&data_file)
        .args(["add", "Task", "--priority", "urgent"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Unknown priority"));
}

#[test]
fn json_envelope_has_schema_version() {
    let temp = TempDir::new().expect("tempdir");
    let data_file = temp.path().join("tasks.json");

    let envelope = add_task(&data_file, "Enveloped", "low");
    assert_eq!(envelope["schema_version"], "td.v1");
    assert_eq!(envelope["command"], "add");
    assert_eq!(envelope["status"], "success");
}

#[test]
fn json_error_envelope_on_stdout() {
    let temp = TempDir::new().expect("tempdir");
    let data_file = temp.path().join("tasks.json");

    let output = td(&data_file)
        .args(["toggle", "ffffffff", "--json"])
        .assert()
        .failure()
        .code(2)
        .get_output()
        .stdout
        .clone();
    let envelope: serde_json::Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["error"]["kind"], "user_error");
    assert_eq!(envelope["error"]["code"], 2);
}

#[test]
fn legacy_saved_data_is_migrated_on_load() {
    let temp = TempDir::new().expect("tempdir");
    let data_file = temp.path().join("tasks.json");

    let legacy = r#"[
        { "text": "Old task", "completed": false, "priority": "Low",
          "createdAt": "2023-05-01T12:00:00Z", "completedAt": null },
        { "text": "Done task", "completed": true, "priority": "High" }
    ]"#;
    std::fs::write(&data_file, legacy).expect("write legacy");

    let output = td(&data_file)
        .args(["list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let listed: serde_json::Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(listed["data"]["count"], 2);
    assert!(listed["data"]["tasks"][0]["id"].is_string());
    assert_eq!(listed["data"]["tasks"][1]["completed"], true);

    // Any mutation rewrites the file in the versioned format
    add_task(&data_file, "New task", "medium");
    let content = std::fs::read_to_string(&data_file).expect("read");
    assert!(content.contains("td.tasks.v1"));
}

#[test]
fn corrupt_saved_data_starts_empty() {
    let temp = TempDir::new().expect("tempdir");
    let data_file = temp.path().join("tasks.json");
    std::fs::write(&data_file, b"{ not json").expect("write");

    td(&data_file)
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(contains("\"count\": 0"));
}
