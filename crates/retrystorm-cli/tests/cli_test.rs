//! End-to-end tests for the `retrystorm` binary: formats and exit codes.

use std::path::Path;
use std::process::{Command, Output};

const HEALTHY: &str = r#"
services:
  api:
    timeout: 10s
    retry: { max_attempts: 2 }
    circuit_breaker: { threshold: 5 }
    calls: [backend]
  backend:
    timeout: 3s
    retry: { max_attempts: 1 }
    circuit_breaker: { threshold: 3 }
    calls: []
"#;

const UNHEALTHY: &str = r#"
services:
  gateway:
    timeout: 3s
    retry: { max_attempts: 3 }
    calls: [svc-a]
  svc-a:
    timeout: 5s
    retry: { max_attempts: 4 }
    calls: [svc-b]
  svc-b:
    timeout: 2s
    retry: { max_attempts: 3 }
    calls: []
"#;

const WARNINGS_ONLY: &str = r#"
services:
  edge:
    timeout: 1s
    calls: [core]
  core:
    timeout: 2s
"#;

fn run(dir: &Path, topology: &str, args: &[&str]) -> Output {
    let path = dir.join("topology.yaml");
    std::fs::write(&path, topology).unwrap();
    Command::new(env!("CARGO_BIN_EXE_retrystorm"))
        .arg(&path)
        .args(args)
        .current_dir(dir)
        .env_remove("RETRYSTORM_CONFIG")
        .env_remove("RETRYSTORM_AMPLIFICATION_THRESHOLD")
        .env_remove("RETRYSTORM_MAX_PATHS")
        .env_remove("RETRYSTORM_MAX_PATH_LENGTH")
        .env_remove("RETRYSTORM_STRICT")
        .output()
        .unwrap()
}

#[test]
fn test_healthy_topology_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), HEALTHY, &["--no-color"]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("No resilience issues found"));
}

#[test]
fn test_json_output_and_error_exit() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), UNHEALTHY, &["--format", "json"]);
    assert_eq!(out.status.code(), Some(1));

    let data: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let kinds: Vec<&str> = data["findings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"retry-amplification"));
    assert!(kinds.contains(&"timeout-inversion"));
    assert!(kinds.contains(&"circuit-breaker-gap"));
    assert_eq!(data["summary"]["errors"], 1);
}

#[test]
fn test_sarif_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), UNHEALTHY, &["--format", "sarif"]);
    let sarif: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(sarif["version"], "2.1.0");
    assert_eq!(sarif["runs"][0]["tool"]["driver"]["name"], "retrystorm");
    assert_eq!(sarif["runs"][0]["results"].as_array().unwrap().len(), 4);
}

#[test]
fn test_warnings_pass_unless_strict() {
    let dir = tempfile::tempdir().unwrap();
    let relaxed = run(dir.path(), WARNINGS_ONLY, &["--no-color"]);
    assert_eq!(relaxed.status.code(), Some(0));

    let strict = run(dir.path(), WARNINGS_ONLY, &["--no-color", "--strict"]);
    assert_eq!(strict.status.code(), Some(1));
}

#[test]
fn test_threshold_flag_controls_amplification() {
    let dir = tempfile::tempdir().unwrap();
    // gateway(3) * svc-a(4) * svc-b(3) = 36
    let at = run(dir.path(), UNHEALTHY, &["--format", "json", "--threshold", "36"]);
    let data: serde_json::Value = serde_json::from_slice(&at.stdout).unwrap();
    assert_eq!(data["summary"]["errors"], 0);
    assert_eq!(at.status.code(), Some(0));

    let below = run(dir.path(), UNHEALTHY, &["--format", "json", "--threshold", "35"]);
    assert_eq!(below.status.code(), Some(1));
}

#[test]
fn test_project_config_file_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("retrystorm.toml"), "[gate]\nstrict = true\n").unwrap();
    let out = run(dir.path(), WARNINGS_ONLY, &["--no-color"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_undeclared_service_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(
        dir.path(),
        "services:\n  a:\n    calls: [ghost]\n",
        &[],
    );
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("ghost"));
}

#[test]
fn test_missing_file_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_retrystorm"))
        .arg(dir.path().join("missing.yaml"))
        .current_dir(dir.path())
        .env_remove("RETRYSTORM_CONFIG")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
}
