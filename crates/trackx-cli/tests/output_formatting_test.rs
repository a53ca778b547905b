//! Integration tests for output formatting
//!
//! These tests run the compiled binary end to end and verify JSON output
//! structure and exit codes.

use std::path::PathBuf;
use std::process::Command;

fn trackx_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove 'deps' directory
    path.push("trackx");
    path
}

/// Write a fixture file into a fresh per-test directory under /tmp
fn write_fixture(dir: &str, name: &str, content: &str) -> PathBuf {
    let dir = PathBuf::from(dir);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_extract_json_output_is_valid() {
    let file = write_fixture(
        "/tmp/trackx-test-extract-json",
        "report.txt",
        "Vehicle parked at -26.1367, 28.2411 overnight.",
    );

    let output = Command::new(trackx_bin())
        .args(["extract", file.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");

    assert_eq!(parsed.get("status").and_then(|v| v.as_str()), Some("success"));
    let data = parsed.get("data").expect("Should have data field");
    assert_eq!(data["total_points"].as_u64(), Some(1));
    assert_eq!(data["extraction"]["stoppedPoints"][0]["ignitionStatus"], "Stopped");

    let _ = std::fs::remove_dir_all("/tmp/trackx-test-extract-json");
}

#[test]
fn test_extract_fails_without_coordinates() {
    let file = write_fixture(
        "/tmp/trackx-test-extract-empty",
        "report.txt",
        "A narrative report with no location data at all.",
    );

    let output = Command::new(trackx_bin())
        .args(["extract", file.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should exit non-zero");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("No GPS coordinates"),
        "stderr should explain the failure: {}",
        stderr
    );

    let _ = std::fs::remove_dir_all("/tmp/trackx-test-extract-empty");
}

#[test]
fn test_extract_writes_output_file() {
    let file = write_fixture(
        "/tmp/trackx-test-extract-output",
        "report.txt",
        "Ignition off at -26.1367, 28.2411. Resumed driving near -25.7479, 28.2293.",
    );
    let out_path = "/tmp/trackx-test-extract-output/points.json";

    let output = Command::new(trackx_bin())
        .args(["extract", file.to_str().unwrap(), "--output", out_path])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");

    let written = std::fs::read_to_string(out_path).expect("Output file should exist");
    let parsed: serde_json::Value =
        serde_json::from_str(&written).expect("Output file should be valid JSON");

    assert_eq!(parsed["raw"].as_array().map(|a| a.len()), Some(2));
    assert!(parsed["stoppedPoints"].is_array());

    let _ = std::fs::remove_dir_all("/tmp/trackx-test-extract-output");
}

#[test]
fn test_extract_builds_case_payload() {
    let file = write_fixture(
        "/tmp/trackx-test-extract-case",
        "report.txt",
        "Vehicle stopped at -26.1367, 28.2411 until morning.",
    );

    let output = Command::new(trackx_bin())
        .args([
            "extract",
            file.to_str().unwrap(),
            "--json",
            "--date",
            "2024-03-15",
            "--case-number",
            "CASE-042",
            "--title",
            "Hijacking route analysis",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");

    let payload = &parsed["data"]["payload"];
    assert_eq!(payload["case_number"], "CASE-042");
    assert_eq!(payload["date_of_incident"], "2024-03-15");
    assert_eq!(payload["csv_data"].as_array().map(|a| a.len()), Some(1));
    assert_eq!(payload["all_points"].as_array().map(|a| a.len()), Some(1));

    let _ = std::fs::remove_dir_all("/tmp/trackx-test-extract-case");
}

#[test]
fn test_case_payload_requires_date() {
    let file = write_fixture(
        "/tmp/trackx-test-case-no-date",
        "report.txt",
        "Parked at -26.1367, 28.2411.",
    );

    let output = Command::new(trackx_bin())
        .args(["extract", file.to_str().unwrap(), "--case-number", "CASE-042"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should exit non-zero");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--date is required"), "stderr was: {}", stderr);

    let _ = std::fs::remove_dir_all("/tmp/trackx-test-case-no-date");
}

#[test]
fn test_extract_csv_reports_summary() {
    let file = write_fixture(
        "/tmp/trackx-test-extract-csv",
        "export.csv",
        "Latitude,Longitude,Status\n-26.1367,28.2411,Stopped\n-25.7479,28.2293,Moving\n",
    );

    let output = Command::new(trackx_bin())
        .args(["extract", file.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");

    let data = &parsed["data"];
    assert_eq!(data["total_points"].as_u64(), Some(2));
    assert_eq!(data["points_of_interest"].as_u64(), Some(1));
    assert_eq!(data["csv_summary"]["totalPoints"].as_u64(), Some(2));
    assert_eq!(data["csv_summary"]["derivedStatus"], false);

    let _ = std::fs::remove_dir_all("/tmp/trackx-test-extract-csv");
}

#[test]
fn test_formats_lists_all_readers() {
    let output = Command::new(trackx_bin())
        .args(["formats", "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");

    let formats = parsed["data"]["formats"].as_array().expect("Should list formats");
    let names: Vec<&str> = formats.iter().filter_map(|f| f["name"].as_str()).collect();

    assert!(names.contains(&"PDF"));
    assert!(names.contains(&"Text"));
    assert!(names.contains(&"CSV"));
}

#[test]
fn test_inspect_rejects_unknown_extension() {
    let file = write_fixture(
        "/tmp/trackx-test-inspect-unknown",
        "report.docx",
        "not a real document",
    );

    let output = Command::new(trackx_bin())
        .args(["inspect", file.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should exit non-zero");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unsupported file format: docx"),
        "stderr was: {}",
        stderr
    );

    let _ = std::fs::remove_dir_all("/tmp/trackx-test-inspect-unknown");
}

#[test]
fn test_inspect_reports_text_file() {
    let file = write_fixture(
        "/tmp/trackx-test-inspect-text",
        "report.txt",
        "Tracker update: halted at -26.1367, 28.2411 for 45 minutes.",
    );

    let output = Command::new(trackx_bin())
        .args(["inspect", file.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");

    let data = &parsed["data"];
    assert_eq!(data["format"], "Text");
    assert_eq!(data["valid"], true);
    assert_eq!(data["page_count"].as_u64(), Some(1));
    assert_eq!(data["candidate_count"].as_u64(), Some(1));
    assert!(data["sample"].as_str().unwrap().starts_with("Tracker update"));

    let _ = std::fs::remove_dir_all("/tmp/trackx-test-inspect-text");
}
