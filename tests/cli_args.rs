//! Tests for CLI argument parsing, run against the built binary.

mod common;

use std::path::Path;
use std::process::{Command, Output};

use common::temp_file;

const SCRIPT: &str = r#"
initial = { name = "home" }

[[steps]]
op = "push"
screen = { name = "detail", id = 1 }

[[steps]]
op = "present"
modal = "settings"
"#;

fn waymark(config_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_waymark"))
        .arg("--config")
        .arg(config_dir.join("absent.toml"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_help_lists_subcommands() {
    let output = Command::new(env!("CARGO_BIN_EXE_waymark"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("run"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("--log-level"));
}

#[test]
fn test_check_reports_step_count() {
    let (dir, path) = temp_file("flow.toml", SCRIPT);
    let output = waymark(dir.path(), &["check", path.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 step(s) ok"));
}

#[test]
fn test_run_prints_text_transcript() {
    let (dir, path) = temp_file("flow.toml", SCRIPT);
    let output = waymark(dir.path(), &["run", path.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[home > detail#1]"));
    assert!(stdout.contains("{sheet:settings}"));
}

#[test]
fn test_run_json_format() {
    let (dir, path) = temp_file("flow.toml", SCRIPT);
    let output = waymark(dir.path(), &["run", path.to_str().unwrap(), "--format", "json"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["lines"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["lines"][1]["modals"][0], "sheet:settings");
}

#[test]
fn test_policy_flag_overrides_default() {
    let (dir, path) = temp_file(
        "flow.toml",
        r#"
initial = { name = "home" }

[[steps]]
op = "present"
modal = "a"

[[steps]]
op = "present"
modal = "b"
"#,
    );
    let output = waymark(
        dir.path(),
        &["run", path.to_str().unwrap(), "--policy", "reject_if_active"],
    );

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("rejected"));
}

#[test]
fn test_invalid_policy_is_rejected_by_parser() {
    let (dir, path) = temp_file("flow.toml", SCRIPT);
    let output = waymark(dir.path(), &["run", path.to_str().unwrap(), "--policy", "sometimes"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown policy 'sometimes'"));
}

#[test]
fn test_failed_step_exits_with_code_2() {
    let (dir, path) = temp_file(
        "flow.toml",
        "initial = { name = \"home\" }\n[[steps]]\nop = \"finish\"\n",
    );
    let output = waymark(dir.path(), &["run", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stdout).contains("failed"));
}

#[test]
fn test_missing_script_exits_with_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");
    let output = waymark(dir.path(), &["run", missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Failed to read script"));
}

#[test]
fn test_broken_config_exits_with_error() {
    let (dir, script) = temp_file("flow.toml", SCRIPT);
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[defaults]\nmax_steps = 0\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_waymark"))
        .arg("--config")
        .arg(&config)
        .args(["check", script.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("loading configuration"));
}
