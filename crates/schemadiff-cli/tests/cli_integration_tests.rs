//! CLI integration tests
//!
//! Each test runs the `schemadiff` binary inside a scratch directory so that
//! no workspace config leaks in unless the test writes one.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const BASE: &str = r#"{"id": {"type": "INT"}, "name": {"type": "VARCHAR"}, "age": {"type": "INT"}}"#;
const CURRENT: &str = r#"{"id": {"type": "INT"}, "age": {"type": "INT"}, "name": {"type": "VARCHAR"}, "email": {"type": "TEXT"}}"#;

const LINEAGE: &str = r#"{
    "nodes": {
        "model.customers": {
            "change_status": "added",
            "current_columns": {"id": {"type": "INT"}}
        },
        "model.orders": {
            "change_status": "modified",
            "base_columns": {"id": {"type": "INT"}, "amount": {"type": "INT"}},
            "current_columns": {"id": {"type": "INT"}, "amount": {"type": "DECIMAL"}}
        }
    },
    "modified_set": ["model.customers", "model.orders", "model.ghost"]
}"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_schemadiff"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_schema_markdown_reports_reorder_and_addition() {
    let temp = TempDir::new().unwrap();
    write(&temp, "base.json", BASE);
    write(&temp, "current.json", CURRENT);

    let output = run(
        temp.path(),
        &["schema", "--base", "base.json", "--current", "current.json"],
    );

    assert!(output.status.success(), "Stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("## Schema Diff"));
    assert!(out.contains("**Classification**: Changed"));
    assert!(out.contains("| 3 | `name` | `VARCHAR` | `VARCHAR` | reordered |"));
    assert!(out.contains("| 4 | `email` | - | `TEXT` | added |"));
    assert!(out.contains("| 1 | `id` | `INT` | `INT` | unchanged |"));
}

#[test]
fn test_schema_json_changed_only() {
    let temp = TempDir::new().unwrap();
    write(&temp, "base.json", BASE);
    write(&temp, "current.json", CURRENT);

    let output = run(
        temp.path(),
        &[
            "schema",
            "--base",
            "base.json",
            "--current",
            "current.json",
            "--format",
            "json",
            "--changed-only",
        ],
    );

    assert!(output.status.success(), "Stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();

    assert_eq!(json["diff"]["diff_schema_version"], 1);
    assert_eq!(json["diff"]["counts"]["reordered"], 2);
    assert_eq!(json["diff"]["counts"]["added"], 1);

    let names: Vec<&str> = json["grid"]["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["age", "name", "email"]);
    assert_eq!(json["grid"]["rows"][2]["row_class"], "schema-row-added");
}

#[test]
fn test_schema_missing_side_is_empty() {
    let temp = TempDir::new().unwrap();
    write(&temp, "base.json", BASE);

    let output = run(
        temp.path(),
        &["schema", "--base", "base.json", "--format", "json"],
    );

    assert!(output.status.success(), "Stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["diff"]["counts"]["removed"], 3);
    assert_eq!(json["diff"]["classification"], "Changed");
}

#[test]
fn test_schema_writes_output_file() {
    let temp = TempDir::new().unwrap();
    write(&temp, "base.json", BASE);
    write(&temp, "current.json", BASE);

    let output = run(
        temp.path(),
        &[
            "schema",
            "--base",
            "base.json",
            "--current",
            "current.json",
            "--output",
            "diff.md",
        ],
    );

    assert!(output.status.success(), "Stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Written to"));
    let written = fs::read_to_string(temp.path().join("diff.md")).unwrap();
    assert!(written.contains("_No schema changes detected._"));
}

#[test]
fn test_schema_invalid_json_fails_with_code() {
    let temp = TempDir::new().unwrap();
    write(&temp, "base.json", BASE);
    write(&temp, "current.json", "[\"id\", \"name\"]");

    let output = run(
        temp.path(),
        &["schema", "--base", "base.json", "--current", "current.json"],
    );

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Error: [ERR_INVALID_COLUMN_MAP]"), "Stderr: {}", err);
    assert!(err.contains("entity_id: current"));
    assert!(err.contains("request_id: "));
}

#[test]
fn test_schema_nonexistent_file_fails() {
    let temp = TempDir::new().unwrap();

    let output = run(temp.path(), &["schema", "--base", "missing.json"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ERR_INVALID_INPUT"));
}

#[test]
fn test_columns_lists_present_columns() {
    let temp = TempDir::new().unwrap();
    write(
        &temp,
        "cols.json",
        r#"{"id": {"type": "INT"}, "dropped": null, "name": {"type": "TEXT"}}"#,
    );

    let output = run(temp.path(), &["columns", "cols.json", "--format", "json"]);

    assert!(output.status.success(), "Stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["index"], 2);
    assert_eq!(rows[1]["name"], "name");
}

#[test]
fn test_summary_markdown() {
    let temp = TempDir::new().unwrap();
    write(&temp, "lineage.json", LINEAGE);

    let output = run(temp.path(), &["summary", "lineage.json"]);

    assert!(output.status.success(), "Stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("## Change Summary"));
    assert!(out.contains("| Nodes | 1 | 0 | 1 |"));
    assert!(out.contains("| Columns | 1 | 0 | 1 |"));
}

#[test]
fn test_summary_invalid_lineage_fails() {
    let temp = TempDir::new().unwrap();
    write(&temp, "lineage.json", r#"{"nodes": [], "modified_set": []}"#);

    let output = run(temp.path(), &["summary", "lineage.json"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ERR_INVALID_LINEAGE"));
}

#[test]
fn test_workspace_config_sets_default_format() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join(".schemadiff")).unwrap();
    write(
        &temp,
        ".schemadiff/config.toml",
        "[output]\nformat = \"json\"\n\n[logging]\nprofile = \"production\"\n",
    );
    write(&temp, "lineage.json", LINEAGE);

    let output = run(temp.path(), &["summary", "lineage.json"]);

    assert!(output.status.success(), "Stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["node_added"], 1);
    assert_eq!(json["col_modified"], 1);

    // Flag overrides the configured format
    let output = run(temp.path(), &["summary", "lineage.json", "--format", "markdown"]);
    assert!(stdout(&output).contains("## Change Summary"));
}

#[test]
fn test_invalid_config_fails_with_config_code() {
    let temp = TempDir::new().unwrap();
    let config = write(&temp, "broken.toml", "[output\n");
    write(&temp, "lineage.json", LINEAGE);

    let output = run(
        temp.path(),
        &["--config", config.to_str().unwrap(), "summary", "lineage.json"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ERR_CONFIG"));
}
