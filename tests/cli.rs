//! Runs the `bache` binary against files in a temporary directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::TempDir;

fn bache(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bache"))
        .args(args)
        .env("RUST_LOG", "off")
        .env_remove("BACHE_MAP_ZOOM")
        .output()
        .expect("Failed to run bache")
}

fn write_json(dir: &Path, name: &str, value: &Value) -> String {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path.to_string_lossy().into_owned()
}

fn candidate(score: u32) -> Value {
    json!({
        "userId": "uid-1",
        "timestamp": "2024-05-01T12:00:00.000Z",
        "location": "-38.71830, -62.26610",
        "aiSummary": "Bache profundo",
        "approxDimensions": "30cm x 50cm",
        "surfaceArea": 0.15,
        "approxVolume": 0.02,
        "score": score,
        "isPothole": true,
        "photoUrl": "https://storage.example.com/pothole_reports/a.jpg",
        "photoHash": "ab".repeat(32),
        "modelVersion": "googleai/gemini-2.0-flash"
    })
}

fn stored_reports() -> Value {
    let mut first = candidate(72);
    first["id"] = json!("doc-1");
    first["alias"] = json!("BraveOtter-3fa91c");
    first["aiSummary"] = json!("Pozo \"enorme\", cerca de la esquina");
    json!([first])
}

#[test]
fn test_validate_accepts_and_prints_report() {
    let dir = TempDir::new().unwrap();
    let file = write_json(dir.path(), "report.json", &candidate(72));

    let output = bache(&["validate", &file]);
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["score"], 72);
    assert_eq!(
        report["alias"],
        json!(bache_core::generate_alias("uid-1").unwrap())
    );
}

#[test]
fn test_validate_rejects_with_failing_exit_code() {
    let dir = TempDir::new().unwrap();
    let file = write_json(dir.path(), "report.json", &candidate(150));

    let output = bache(&["validate", &file]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("score must be between 1 and 100"), "stderr: {}", stderr);
}

#[test]
fn test_validate_issue_exit_codes() {
    let dir = TempDir::new().unwrap();
    let ok = write_json(
        dir.path(),
        "ok.json",
        &json!({"issueType": "bug", "description": "El mapa no carga en mi teléfono"}),
    );
    let short = write_json(dir.path(), "short.json", &json!({"issueType": "bug", "description": "roto"}));

    assert!(bache(&["validate-issue", &ok]).status.success());
    assert_eq!(bache(&["validate-issue", &short]).status.code(), Some(1));
}

#[test]
fn test_export_csv_to_file() {
    let dir = TempDir::new().unwrap();
    let reports = write_json(dir.path(), "reports.json", &stored_reports());
    let out_path = dir.path().join("pothole_reports.csv");

    let output = bache(&["export-csv", &reports, "--output", &out_path.to_string_lossy()]);
    assert!(output.status.success());

    let csv = fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = csv.split('\n').collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("ID,User ID,Alias,Timestamp,Location"));
    assert!(lines[1].starts_with("doc-1,uid-1,BraveOtter-3fa91c,"));
    assert!(lines[1].contains(r#""Pozo ""enorme"", cerca de la esquina""#));
}

#[test]
fn test_bad_map_config_only_breaks_map() {
    let dir = TempDir::new().unwrap();
    let reports = write_json(dir.path(), "reports.json", &stored_reports());

    let run = |args: &[&str]| {
        Command::new(env!("CARGO_BIN_EXE_bache"))
            .args(args)
            .env("RUST_LOG", "off")
            .env("BACHE_MAP_ZOOM", "close")
            .output()
            .expect("Failed to run bache")
    };

    assert!(run(&["alias", "uid-1"]).status.success());
    assert!(run(&["leaderboard", &reports]).status.success());
    assert!(!run(&["map", &reports]).status.success());
}
