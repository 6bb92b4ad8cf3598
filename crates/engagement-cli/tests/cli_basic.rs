//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary inside a temporary directory and verify
//! outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command in `dir` and return (exit code, stdout, stderr).
fn run_cli(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_engagement-cli"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_no_args_writes_chart_png() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(dir.path(), &[]);

    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(
        stdout.trim(),
        "Success: Generated 'chart.png' with dimensions 512x512 pixels."
    );
    assert!(dir.path().join("chart.png").exists());
}

#[test]
fn test_render_custom_output() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["render", "--output", "out.png", "--seed", "7", "--palette", "viridis"],
    );

    assert_eq!(code, 0);
    assert!(stdout.contains("'out.png'"));
    assert!(dir.path().join("out.png").exists());
    assert!(!dir.path().join("chart.png").exists());
}

#[test]
fn test_render_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(dir.path(), &["render", "-o", "nowhere/chart.png"]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("error:"));
    assert!(stderr.contains("Output directory does not exist"));
}

#[test]
fn test_render_rejects_non_png_output() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["chart.jpg", "chart.bmp", "chart"] {
        let (code, stdout, stderr) = run_cli(dir.path(), &["render", "-o", name]);

        assert_eq!(code, 1, "{name}");
        assert!(stdout.is_empty(), "{name}: {stdout}");
        assert!(stderr.contains("must have a .png extension"), "{name}: {stderr}");
        assert!(!dir.path().join(name).exists());
    }
}

#[test]
fn test_unknown_palette_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["render", "--palette", "rainbow"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("rainbow"));
}

#[test]
fn test_table_json() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["table"]);
    assert_eq!(code, 0);

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["days"].as_array().unwrap().len(), 7);
    assert_eq!(parsed["hours"].as_array().unwrap().len(), 24);
    assert_eq!(parsed["scores"][5].as_array().unwrap().len(), 24);
    assert!(!dir.path().join("chart.png").exists());
}

#[test]
fn test_table_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let (_, first, _) = run_cli(dir.path(), &["table", "--format", "records"]);
    let (_, second, _) = run_cli(dir.path(), &["table", "--format", "records"]);
    assert_eq!(first, second);

    let records: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 168);
}

#[test]
fn test_table_ascii() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["table", "--format", "ascii"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Engagement Heatmap"));
    assert!(stdout.contains("Sun"));
}

#[test]
fn test_config_init_then_render() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["config", "init", "chart.toml"]);
    assert_eq!(code, 0);

    let (code, _, stderr) = run_cli(dir.path(), &["config", "init", "chart.toml"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("already exists"));

    std::fs::write(
        dir.path().join("chart.toml"),
        "output = \"from-config.png\"\n[style]\ndpi = 32\n",
    )
    .unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["--config", "chart.toml"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("256x256"));
    assert!(dir.path().join("from-config.png").exists());
}

#[test]
fn test_config_show_and_validate() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("seed = 42"));

    std::fs::write(
        dir.path().join("bad.toml"),
        "[model.noise]\nlow = 5\nhigh = 5\n",
    )
    .unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["--config", "bad.toml", "config", "validate"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("model.noise"));
}
