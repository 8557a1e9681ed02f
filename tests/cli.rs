//! Binary tests: one JSON command on stdin, one JSON result on stdout

use serde_json::Value;
use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn run_backend(input: &str, args: &[&str]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_smartfile"))
        .args(args)
        .env_remove("SMARTFILE_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start backend");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn parse_stdout(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not a JSON object")
}

#[test]
fn successful_move_exits_zero() {
    let root = TempDir::new().unwrap();
    let src = root.path().join("src");
    let dst = root.path().join("dst");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dst).unwrap();
    fs::write(src.join("a.jpg"), "a").unwrap();
    fs::write(src.join("b.png"), "b").unwrap();

    let input = serde_json::json!({
        "action": "move",
        "pattern": ".jpg",
        "source": src,
        "destination": dst,
    })
    .to_string();
    let output = run_backend(&input, &[]);

    assert!(output.status.success());
    let json = parse_stdout(&output);
    assert_eq!(json["success"], true);
    assert_eq!(json["operation"], "move");
    assert_eq!(json["files_scanned"], 2);
    assert_eq!(json["files_matched"], 1);
    assert_eq!(json["files_affected"], 1);
    assert!(json.get("errors").is_none());
    assert!(json.get("error_message").is_none());
    assert!(dst.join("a.jpg").exists());
}

#[test]
fn unsafe_source_exits_non_zero_with_result() {
    let input = r#"{"action":"delete","source":"/bin","pattern":"*"}"#;
    let output = run_backend(input, &[]);

    assert!(!output.status.success());
    let json = parse_stdout(&output);
    assert_eq!(json["success"], false);
    assert_eq!(json["error_message"], "Source directory is not safe to operate on");
}

#[test]
fn malformed_input_emits_nothing() {
    for input in ["not json", r#"{"source":"/tmp"}"#, r#"{"action":3}"#, r#"{"action":"rename"}"#] {
        let output = run_backend(input, &[]);
        assert!(!output.status.success(), "{} should be rejected", input);
        assert!(output.stdout.is_empty(), "{} should not produce a result", input);
    }
}

#[test]
fn invalid_command_emits_nothing() {
    let output = run_backend(r#"{"action":"copy","source":"/tmp/x"}"#, &[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn verbose_narration_stays_on_stderr() {
    let root = TempDir::new().unwrap();
    let target = root.path().join("made");
    let input = serde_json::json!({
        "action": "create_folder",
        "destination": target,
        "verbose": true,
    })
    .to_string();

    let output = run_backend(&input, &[]);

    assert!(output.status.success());
    let json = parse_stdout(&output);
    assert_eq!(json["files_affected"], 1);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Creating folder"));
    assert!(target.is_dir());
}

#[test]
fn input_file_and_pretty_output() {
    let root = TempDir::new().unwrap();
    let cmd_path = root.path().join("cmd.json");
    let target = root.path().join("planned");
    fs::write(
        &cmd_path,
        serde_json::json!({"action": "create_folder", "destination": target, "dry_run": true})
            .to_string(),
    )
    .unwrap();

    let output = run_backend("", &["--input", cmd_path.to_str().unwrap(), "--pretty"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\n  \"success\": true"));
    assert!(!target.exists());
}

#[test]
fn per_file_failures_reach_stderr_at_default_level() {
    let root = TempDir::new().unwrap();
    let src = root.path().join("src");
    let dst = root.path().join("dst");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(dst.join("b.txt").join("occupied")).unwrap();
    fs::write(src.join("a.txt"), "a").unwrap();
    fs::write(src.join("b.txt"), "b").unwrap();

    let input = serde_json::json!({
        "action": "move",
        "pattern": "*.txt",
        "source": src,
        "destination": dst,
    })
    .to_string();
    let output = run_backend(&input, &[]);

    assert!(output.status.success());
    let json = parse_stdout(&output);
    assert_eq!(json["files_affected"], 1);
    assert_eq!(json["errors"].as_array().map(Vec::len), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to move"));
    assert!(!stderr.contains("Moving:"));
}
