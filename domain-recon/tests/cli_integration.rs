// domain-recon/tests/cli_integration.rs

//! End-to-end CLI tests.
//!
//! These run the compiled binary. Every case here is hermetic: inputs are
//! crafted so that no network query is ever attempted (invalid domains,
//! bare public suffixes, missing files), which keeps the suite fast and
//! deterministic.

use std::fs;
use std::io::Write;
use std::process::Command;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_domain-recon"))
}

#[test]
fn test_help_runs() {
    let output = binary().arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("collect"));
    assert!(stdout.contains("variants"));
}

#[test]
fn test_list_tlds_prints_catalog() {
    let output = binary()
        .args(["variants", "--list-tlds"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(".com"));
    assert!(stdout.contains(".xyz"));
}

#[test]
fn test_list_tlds_respects_tld_flag() {
    let output = binary()
        .args(["variants", "--list-tlds", "-t", "dev,app"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(".app"));
    assert!(stdout.contains(".dev"));
    assert!(!stdout.contains(".com"));
}

#[test]
fn test_collect_missing_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("out.csv");

    let output = binary()
        .args([
            "collect",
            "--input",
            "/nonexistent/domains.csv",
            "--output",
            &out_path.to_string_lossy(),
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error"));
}

#[test]
fn test_variants_requires_input_and_output() {
    let output = binary().arg("variants").output().unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--input"));
}

/// Invalid rows produce placeholder rows without any network activity:
/// one output row per input row, with the flag text in place of data.
#[test]
fn test_collect_invalid_rows_offline() {
    let dir = tempfile::tempdir().unwrap();
    let in_path = dir.path().join("domains.csv");
    let out_path = dir.path().join("out.csv");

    let mut input = fs::File::create(&in_path).unwrap();
    writeln!(input, "no-dot-here,comment").unwrap();
    writeln!(input, ",empty first column").unwrap();
    drop(input);

    let output = binary()
        .args([
            "collect",
            "--input",
            &in_path.to_string_lossy(),
            "--output",
            &out_path.to_string_lossy(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let written = fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "Domain,Information");
    assert_eq!(lines.len(), 3);
    assert!(written.contains("Invalid domain format"));
    assert!(written.contains("EMPTY_ROW"));
}

/// Unextractable and malformed variant inputs also stay offline and still
/// produce exactly one row each.
#[test]
fn test_variants_error_rows_offline() {
    let dir = tempfile::tempdir().unwrap();
    let in_path = dir.path().join("domains.txt");
    let out_path = dir.path().join("out.csv");

    // A bare public suffix and a whitespace-carrying line: no probes
    fs::write(&in_path, "co.uk\nbad domain.com\n").unwrap();

    let output = binary()
        .args([
            "variants",
            "--input",
            &in_path.to_string_lossy(),
            "--output",
            &out_path.to_string_lossy(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let written = fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert!(lines[0].starts_with("Original Input Domain,Base Name Extracted"));
    assert_eq!(lines.len(), 3);
    assert!(written.contains("Could not extract base name from input."));
    assert!(written.contains("Invalid domain format"));
}

#[test]
fn test_variants_empty_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let in_path = dir.path().join("empty.txt");
    let out_path = dir.path().join("out.csv");
    fs::write(&in_path, "\n\n").unwrap();

    let output = binary()
        .args([
            "variants",
            "--input",
            &in_path.to_string_lossy(),
            "--output",
            &out_path.to_string_lossy(),
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
}
