//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! and verify outputs.

use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

/// Run a CLI command against the dev data dir and return output.
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "focustrack-cli", "--"])
        .args(args)
        .env("FOCUSTRACK_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// A title that will not collide across test runs.
fn unique_title(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix} {nanos}")
}

#[test]
fn test_task_add_and_get() {
    let title = unique_title("CLI add");
    let (stdout, stderr, code) = run_cli(&["task", "add", &title]);
    assert_eq!(code, 0, "task add failed: {stderr}");

    let task: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(task["title"], title.as_str());
    assert_eq!(task["status"], "PENDING");

    let id = task["id"].as_i64().unwrap().to_string();
    let (stdout, _, code) = run_cli(&["task", "get", &id]);
    assert_eq!(code, 0);
    let fetched: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(fetched["title"], title.as_str());
}

#[test]
fn test_task_list_is_json_array() {
    let (stdout, stderr, code) = run_cli(&["task", "list"]);
    assert_eq!(code, 0, "task list failed: {stderr}");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed.is_array());
}

#[test]
fn test_duplicate_title_exits_with_conflict() {
    let title = unique_title("CLI duplicate");
    let (_, _, code) = run_cli(&["task", "add", &title]);
    assert_eq!(code, 0);
    let (_, stderr, code) = run_cli(&["task", "add", &title]);
    assert_eq!(code, 4, "expected conflict exit code");
    assert!(stderr.contains("already exists"));
}

#[test]
fn test_missing_task_exits_with_not_found() {
    let (_, stderr, code) = run_cli(&["task", "get", "999999999"]);
    assert_eq!(code, 3, "expected not-found exit code");
    assert!(stderr.contains("doesn't exist"));
}

#[test]
fn test_focus_start_stop_roundtrip() {
    let title = unique_title("CLI focus");
    let (stdout, _, code) = run_cli(&["task", "add", &title]);
    assert_eq!(code, 0);
    let task: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let id = task["id"].as_i64().unwrap().to_string();

    let (stdout, stderr, code) = run_cli(&["focus", "start", &id, "--duration", "25"]);
    assert_eq!(code, 0, "focus start failed: {stderr}");
    let interval: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(interval["completed"], false);
    assert_eq!(interval["duration_min"], 25);

    // A second start on the same task conflicts.
    let (_, _, code) = run_cli(&["focus", "start", &id]);
    assert_eq!(code, 4);

    let (stdout, stderr, code) = run_cli(&["focus", "stop", &id]);
    assert_eq!(code, 0, "focus stop failed: {stderr}");
    let stopped: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stopped["completed"], true);
}

#[test]
fn test_stats_show_reports_total_time() {
    let (stdout, stderr, code) = run_cli(&["stats", "show"]);
    assert_eq!(code, 0, "stats show failed: {stderr}");
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(report["total_time"].is_u64());
}

#[test]
fn test_config_get_default_duration() {
    let (stdout, stderr, code) = run_cli(&["config", "get", "focus.default_duration_min"]);
    assert_eq!(code, 0, "config get failed: {stderr}");
    assert!(stdout.trim().parse::<u32>().is_ok());
}
