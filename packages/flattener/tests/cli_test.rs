//! Tests for the `xml-flatten` binary.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn xml_flatten() -> Command {
    Command::cargo_bin("xml-flatten").unwrap()
}

#[test]
fn test_flatten_stdin_lines() {
    xml_flatten()
        .arg("flatten")
        .write_stdin(r#"<event time="t" name="n" uid="u">v</event>"#)
        .assert()
        .success()
        .stdout("event@time=t\nevent@name=n\nevent@uid=u\nevent=v\n");
}

#[test]
fn test_flatten_with_exclude() {
    xml_flatten()
        .args(["flatten", "--exclude", "root-event2(.*)", "-"])
        .write_stdin("<root><event>a</event><event>b</event></root>")
        .assert()
        .success()
        .stdout("root-event=a\n");
}

#[test]
fn test_flatten_file_json() {
    let output = xml_flatten()
        .args(["flatten", "--format", "json"])
        .arg(fixture("catalog.xml"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["orders-order2-line-price"], "1.25");
    assert_eq!(json["orders-order-line2@sku"], "B-7");
}

#[test]
fn test_flatten_empty_input_is_noop() {
    xml_flatten()
        .arg("flatten")
        .write_stdin("")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_flatten_malformed_fails() {
    xml_flatten()
        .arg("flatten")
        .write_stdin("<root><event>")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("XML parsing failed"));
}

#[test]
fn test_flatten_invalid_pattern_fails() {
    xml_flatten()
        .args(["flatten", "--exclude", "(oops"])
        .write_stdin("<a>1</a>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid exclusion pattern '(oops'"));
}

#[test]
fn test_ingest_document() {
    let output = xml_flatten()
        .arg("ingest")
        .arg("--config")
        .arg(fixture("pipeline.yaml"))
        .arg(fixture("document.json"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["id"], 42);
    assert_eq!(json["root-event"], "a");
    assert_eq!(json["root-event@time"], "t");
    assert_eq!(json["root-event2"], "b");
}

#[test]
fn test_ingest_missing_field_is_noop() {
    let output = xml_flatten()
        .arg("ingest")
        .arg("--config")
        .arg(fixture("pipeline.yaml"))
        .write_stdin(r#"{"other": "value"}"#)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json, serde_json::json!({"other": "value"}));
}

#[test]
fn test_ingest_bad_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.yaml");
    std::fs::write(&config, "field: source_field\nexclude: ['[unterminated']\n").unwrap();

    xml_flatten()
        .arg("ingest")
        .arg("--config")
        .arg(&config)
        .write_stdin(r#"{"source_field": "<a/>"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid exclusion pattern"));
}
