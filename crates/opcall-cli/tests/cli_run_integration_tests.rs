//! CLI integration tests
//!
//! These tests run the built `opcall` binary and check stdout, stderr and
//! the exit status.

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn opcall(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_opcall"))
        .args(["--log-profile", "production"])
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute CLI")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_cli_run_max() {
    let output = opcall(&["run", "10", "20", "max"]);

    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout_lines(&output), vec!["20"]);
}

#[test]
fn test_cli_run_reports_every_execution_in_order() {
    let output = opcall(&["run", "5", "max", "100", "max"]);

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["5", "100"]);
}

#[test]
fn test_cli_run_negative_operands() {
    let output = opcall(&["run", "-3", "-7.5", "min"]);

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["-7.5"]);
}

#[test]
fn test_cli_run_json_output() {
    let output = opcall(&["run", "--json", "1", "2", "sum"]);

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);

    let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(value["command"], "sum");
    assert_eq!(value["result"], 3.0);
}

#[test]
fn test_cli_run_unknown_command_fails() {
    let output = opcall(&["run", "unknown_command"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("ERR_UNKNOWN_COMMAND"),
        "stderr should carry the error code: {}",
        stderr
    );
}

#[test]
fn test_cli_run_empty_operand_set_fails() {
    let output = opcall(&["run", "max"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_EMPTY_OPERAND_SET"));
}

#[test]
fn test_cli_run_structured_token_rejected() {
    let output = opcall(&["run", "1", "{\"a\":1}", "max"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_UNSUPPORTED_INPUT_TYPE"));
    assert!(stdout_lines(&output).is_empty());
}

#[test]
fn test_cli_run_input_file_then_tokens() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("inputs.json");
    fs::write(&input_path, r#"[10, 20, "max", 30]"#).unwrap();

    let output = opcall(&["run", "--input", input_path.to_str().unwrap(), "max"]);

    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout_lines(&output), vec!["20", "30"]);
}

#[test]
fn test_cli_run_input_file_with_object_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("inputs.json");
    fs::write(&input_path, r#"[1, {"op": "max"}]"#).unwrap();

    let output = opcall(&["run", "--input", input_path.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_UNSUPPORTED_INPUT_TYPE"));
}

#[test]
fn test_cli_run_respects_config_cap() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("opcall.toml");
    fs::write(&config_path, "max_operands = 2\n").unwrap();

    let output = opcall(&[
        "run",
        "--config",
        config_path.to_str().unwrap(),
        "1",
        "2",
        "3",
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_CAPACITY_EXCEEDED"));
}

#[test]
fn test_cli_commands_lists_configured_builtins() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("opcall.toml");
    fs::write(&config_path, "builtins = [\"sum\", \"max\"]\n").unwrap();

    let output = opcall(&["commands", "--config", config_path.to_str().unwrap()]);

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["max", "sum"]);
}

#[test]
fn test_cli_commands_default_registry() {
    let output = opcall(&["commands"]);

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["max", "mean", "min", "sum"]);
}

#[test]
fn test_cli_invalid_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("opcall.toml");
    fs::write(&config_path, "builtins = [\"median\"]\n").unwrap();

    let output = opcall(&["commands", "--config", config_path.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_INVALID_CONFIG"));
}
