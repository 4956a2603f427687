//! End-to-end tests against the built `pythaw` binary: the core
//! scenarios (direct/indirect hits, exit codes, rule selection) driven
//! through the CLI surface (argument parsing, exit codes, concise/JSON
//! output), not just the library API already covered by each crate's
//! own unit tests.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

fn pythaw_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    path.pop();
    path.push("pythaw");
    if !path.exists() {
        let status = Command::new("cargo")
            .args(["build", "-p", "pythaw-cli"])
            .status()
            .expect("failed to build pythaw-cli");
        assert!(status.success(), "failed to build pythaw binary");
    }
    path
}

fn write(root: &std::path::Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

#[test]
fn check_exits_one_and_prints_concise_violation() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "h.py",
        "import boto3\ndef lambda_handler(event, context):\n    c = boto3.client(\"s3\")\n    return c\n",
    );

    let out = Command::new(pythaw_bin())
        .args(["check"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("PW001"), "stdout was: {stdout}");
    assert!(stdout.contains("Found 1 violation in 1 file."), "stdout was: {stdout}");
}

#[test]
fn check_exits_zero_on_clean_tree() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "h.py",
        "import boto3\nc = boto3.client(\"s3\")\ndef lambda_handler(e, x): return c\n",
    );

    let out = Command::new(pythaw_bin())
        .args(["check"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn check_json_emits_parseable_report() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "h.py",
        "import boto3\ndef lambda_handler(event, context):\n    return boto3.client(\"s3\")\n",
    );

    let out = Command::new(pythaw_bin())
        .args(["check", "--json"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    let parsed: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid JSON");
    assert_eq!(parsed["violations"][0]["code"], "PW001");
    assert_eq!(parsed["files_scanned"], 1);
}

#[test]
fn check_respects_disable_flag() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "h.py",
        "import boto3\ndef lambda_handler(event, context):\n    return boto3.client(\"s3\")\n",
    );

    let out = Command::new(pythaw_bin())
        .args(["check", "--disable", "PW001"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn check_unknown_disabled_rule_exits_two() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "h.py", "def lambda_handler(e, x):\n    return 1\n");

    let out = Command::new(pythaw_bin())
        .args(["check", "--disable", "PW999"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn check_custom_handler_pattern_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "h.py",
        "import boto3\ndef my_entry(event, context):\n    return boto3.client(\"s3\")\n",
    );

    // Default patterns would not match "my_entry" — should be clean.
    let default_out = Command::new(pythaw_bin())
        .args(["check"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert_eq!(default_out.status.code(), Some(0));

    let custom_out = Command::new(pythaw_bin())
        .args(["check", "--handler-pattern", "my_entry"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert_eq!(custom_out.status.code(), Some(1));
}

#[test]
fn rules_lists_all_builtins() {
    let out = Command::new(pythaw_bin()).args(["rules"]).output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("PW001"));
    assert!(stdout.contains("PW010"));
}

#[test]
fn rules_explain_unknown_code_exits_two() {
    let out = Command::new(pythaw_bin())
        .args(["rules", "--explain", "PW999"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn rules_explain_known_code_prints_message() {
    let out = Command::new(pythaw_bin())
        .args(["rules", "--explain", "PW001"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("boto3.client"));
}
