use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("taskdeck-{nanos}-{file_name}"))
}

fn taskdeck(store_path: &PathBuf) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_taskdeck"));
    command
        .env("TASKDECK_STORE_PATH", store_path)
        .env("TASKDECK_CONFIG_PATH", temp_path("no-config.json"));
    command
}

#[test]
fn add_command_persists_task() {
    let store_path = temp_path("cli-add.json");
    let output = taskdeck(&store_path)
        .args(["add", "Buy milk", "--priority", "high", "--due", "2026-09-01"])
        .output()
        .expect("failed to run add command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task"));
    assert!(stdout.contains("Buy milk"));

    let stored = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();
    let envelope: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(envelope["version"], "1.0.0");
    assert_eq!(envelope["tasks"][0]["title"], "Buy milk");
    assert_eq!(envelope["tasks"][0]["priority"], "high");
    assert_eq!(envelope["tasks"][0]["dueDate"], "2026-09-01");
}

#[test]
fn add_command_rejects_missing_title() {
    let store_path = temp_path("cli-add-missing.json");
    let output = taskdeck(&store_path)
        .args(["add"])
        .output()
        .expect("failed to run add command");

    std::fs::remove_file(&store_path).ok();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}

#[test]
fn add_command_rejects_bad_due_date() {
    let store_path = temp_path("cli-add-bad-due.json");
    let output = taskdeck(&store_path)
        .args(["add", "demo", "--due", "next tuesday"])
        .output()
        .expect("failed to run add command");

    std::fs::remove_file(&store_path).ok();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_data"));
}

#[test]
fn add_command_emits_json_when_asked() {
    let store_path = temp_path("cli-add-json.json");
    let output = taskdeck(&store_path)
        .args(["add", "demo", "--json"])
        .output()
        .expect("failed to run add command");

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let task: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout was not JSON");
    assert_eq!(task["title"], "demo");
    assert!(task["id"].as_str().unwrap().starts_with("task-"));
    assert_eq!(task["completed"], false);
}

#[test]
fn add_command_honors_language_override() {
    let store_path = temp_path("cli-add-lang.json");
    let output = taskdeck(&store_path)
        .args(["add", "demo", "--lang", "zh-tw"])
        .output()
        .expect("failed to run add command");

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("已新增任務"));
}
