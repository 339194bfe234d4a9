//! Integration tests for unnest-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;
use unnest_core::test_utils::create_test_zip;
use unnest_core::test_utils::nested_zip_chain;

fn unnest_cmd() -> Command {
    cargo_bin_cmd!("unnest")
}

/// Writes a zip holding one nested zip and a text file.
fn nested_fixture(dir: &Path) -> PathBuf {
    let inner = create_test_zip(vec![("inner.txt", b"inner content")]);
    let outer = create_test_zip(vec![("inner.zip", &inner), ("top.txt", b"top content")]);
    let path = dir.join("bundle.zip");
    std::fs::write(&path, outer).expect("failed to write fixture");
    path
}

#[test]
fn test_version_flag() {
    unnest_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("unnest"));
}

#[test]
fn test_help_flag() {
    unnest_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("nested archives"))
        .stdout(predicate::str::contains("--max-iterations"));
}

#[test]
fn test_missing_archive_argument() {
    unnest_cmd().assert().failure();
}

#[test]
fn test_extract_nested_default_destination() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = nested_fixture(temp.path());

    unnest_cmd()
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("Extraction complete"))
        .stdout(predicate::str::contains("Archives extracted: 2"));

    let out = temp.path().join("bundle");
    assert_eq!(std::fs::read(out.join("top.txt")).unwrap(), b"top content");
    assert_eq!(
        std::fs::read(out.join("inner/inner.txt")).unwrap(),
        b"inner content"
    );
    assert!(archive.exists(), "archive kept without --cleanup");
}

#[test]
fn test_extract_to_output_dir() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = nested_fixture(temp.path());
    let out = temp.path().join("custom");

    unnest_cmd()
        .arg(&archive)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("inner/inner.txt").exists());
    assert!(!temp.path().join("bundle").exists());
}

#[test]
fn test_stats_flag() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = nested_fixture(temp.path());

    unnest_cmd()
        .arg(&archive)
        .arg("--stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Extraction Statistics:"))
        .stdout(predicate::str::contains("Archives extracted:   2"))
        .stdout(predicate::str::contains("Size difference:"));
}

#[test]
fn test_cleanup_flag() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = nested_fixture(temp.path());

    unnest_cmd()
        .arg(&archive)
        .arg("--cleanup")
        .assert()
        .success();

    assert!(!archive.exists());
    assert!(!temp.path().join("bundle/inner.zip").exists());
    assert!(temp.path().join("bundle/inner/inner.txt").exists());
}

#[test]
fn test_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = nested_fixture(temp.path());

    let output = unnest_cmd()
        .arg(&archive)
        .arg("--json")
        .output()
        .expect("failed to run unnest");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["operation"], "extract");
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["extractions"], 2);
    assert_eq!(value["data"]["files_processed"], 2);
    assert!(value["data"]["warnings"].as_array().unwrap().is_empty());
}

#[test]
fn test_quiet_suppresses_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = nested_fixture(temp.path());

    unnest_cmd()
        .arg(&archive)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_nonexistent_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");

    unnest_cmd()
        .arg(temp.path().join("missing.zip"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Archive not found"))
        .stderr(predicate::str::contains("HINT"));
}

#[test]
fn test_invalid_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let fake = temp.path().join("fake.zip");
    std::fs::write(&fake, b"this is plain text").unwrap();

    unnest_cmd()
        .arg(&fake)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid archive"));
}

#[test]
fn test_invalid_archive_json() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let fake = temp.path().join("fake.tar");
    std::fs::write(&fake, b"this is plain text").unwrap();

    unnest_cmd()
        .arg(&fake)
        .arg("--json")
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"status\": \"error\""));
}

#[test]
fn test_max_iterations_flag() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("chain.zip");
    std::fs::write(&archive, nested_zip_chain(6, b"bottom")).unwrap();

    unnest_cmd()
        .arg(&archive)
        .arg("--max-iterations")
        .arg("2")
        .arg("--stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Scan iterations:      2"))
        .stdout(predicate::str::contains("maximum iteration limit (2)"));
}

#[test]
fn test_max_iterations_rejects_zero() {
    unnest_cmd()
        .arg("a.zip")
        .arg("--max-iterations")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn test_completion_bash() {
    unnest_cmd()
        .arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("unnest"));
}
