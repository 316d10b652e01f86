//! Integration tests for the `wjson` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the check, format,
//! and stats subcommands through the actual binary, including stdin/stdout piping,
//! file I/O, byte encodings, and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the sample.json fixture.
fn sample_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.json")
}

/// Helper: a scratch path unique to one test.
fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("wjson-test-{}-{name}", std::process::id()))
}

fn wjson() -> Command {
    Command::cargo_bin("wjson").unwrap()
}

const SAMPLE_COMPACT: &str = r#"{"active":true,"dimensions":{"height":4.25,"unit":null,"width":3},"name":"Widget","price":12.5,"stock":40,"tags":["tools","garden"]}"#;

// ─────────────────────────────────────────────────────────────────────────────
// Check subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_stdin_object() {
    wjson()
        .arg("check")
        .write_stdin(r#"{"name":"Alice","age":30}"#)
        .assert()
        .success()
        .stdout("valid object\n");
}

#[test]
fn check_reports_top_level_type() {
    for (input, kind) in [
        ("null", "null"),
        (" true ", "boolean"),
        ("-12", "integer"),
        ("1.5e3", "float"),
        (r#""s""#, "string"),
        ("[1,2]", "list"),
    ] {
        wjson()
            .arg("check")
            .write_stdin(input)
            .assert()
            .success()
            .stdout(format!("valid {kind}\n"));
    }
}

#[test]
fn check_file() {
    wjson()
        .args(["check", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout("valid object\n");
}

#[test]
fn check_invalid_json_fails() {
    wjson()
        .arg("check")
        .write_stdin("[1,2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode UTF-8 JSON"))
        .stderr(predicate::str::contains("Unexpected end of input in list at 4"));
}

#[test]
fn check_trailing_garbage_fails() {
    wjson()
        .arg("check")
        .write_stdin("{} x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unexpected trailing character at 3"));
}

#[test]
fn check_invalid_utf8_fails() {
    wjson()
        .arg("check")
        .write_stdin(&b"\"ab\xff\""[..])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid multibyte sequence at 3"));
}

#[test]
fn check_latin1_input() {
    wjson()
        .args(["check", "-e", "latin1"])
        .write_stdin(&b"\"gar\xe7on\""[..])
        .assert()
        .success()
        .stdout("valid string\n");
}

#[test]
fn check_unknown_encoding_fails() {
    wjson()
        .args(["check", "-e", "klingon-8"])
        .write_stdin("null")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Could not initialize decoder for encoding 'klingon-8'",
        ));
}

#[test]
fn check_missing_file_fails() {
    wjson()
        .args(["check", "-i", "/nonexistent/wjson/input.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Format subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn format_file_to_stdout() {
    wjson()
        .args(["format", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout(SAMPLE_COMPACT);
}

#[test]
fn format_file_to_file() {
    let output_path = temp_path("format-output.json");
    let _ = std::fs::remove_file(&output_path);

    wjson()
        .args(["format", "-i", sample_json_path(), "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout("");

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    assert_eq!(content, SAMPLE_COMPACT);

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn format_sorts_keys_and_drops_whitespace() {
    wjson()
        .arg("format")
        .write_stdin("{ \"b\" : [ 1 , 2.0 ] , \"a\" : \"\\u00e9\" }")
        .assert()
        .success()
        .stdout(r#"{"a":"é","b":[1,2.0]}"#);
}

#[test]
fn format_pretty() {
    wjson()
        .args(["format", "--pretty"])
        .write_stdin(r#"{"k":[1,true]}"#)
        .assert()
        .success()
        .stdout("{\n  \"k\": [\n    1,\n    true\n  ]\n}");
}

#[test]
fn format_transcodes_latin1_to_utf8() {
    wjson()
        .args(["format", "-e", "latin1", "--output-encoding", "UTF-8"])
        .write_stdin(&b"[\"caf\xe9\"]"[..])
        .assert()
        .success()
        .stdout("[\"café\"]");
}

#[test]
fn format_keeps_input_encoding_by_default() {
    wjson()
        .args(["format", "-e", "latin1"])
        .write_stdin(&b"[ \"caf\xe9\" ]"[..])
        .assert()
        .success()
        .stdout(&b"[\"caf\xe9\"]"[..]);
}

#[test]
fn format_pretty_transcodes() {
    wjson()
        .args(["format", "--pretty", "--output-encoding", "latin1"])
        .write_stdin("[\"café\"]")
        .assert()
        .success()
        .stdout(&b"[\n  \"caf\xe9\"\n]"[..]);
}

#[test]
fn format_unmappable_output_fails() {
    wjson()
        .args(["format", "--output-encoding", "latin1"])
        .write_stdin("\"日本\"")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to encode output as latin1"));
}

#[test]
fn format_utf16_output_unsupported() {
    wjson()
        .args(["format", "--output-encoding", "UTF-16LE"])
        .write_stdin("null")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not initialize encoder"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Stats subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn stats_from_file() {
    let size = std::fs::metadata(sample_json_path()).unwrap().len();

    wjson()
        .args(["stats", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Input size: {size} bytes")))
        .stdout(predicate::str::contains("Max depth:  2"))
        .stdout(predicate::str::contains("Nodes:      12"))
        .stdout(predicate::str::contains("  integer:  2"))
        .stdout(predicate::str::contains("  float:    2"))
        .stdout(predicate::str::contains("  string:   3"))
        .stdout(predicate::str::contains("  object:   2"));
}

#[test]
fn stats_scalar_has_zero_depth() {
    wjson()
        .arg("stats")
        .write_stdin("42")
        .assert()
        .success()
        .stdout(predicate::str::contains("Max depth:  0"))
        .stdout(predicate::str::contains("Nodes:      1"));
}

#[test]
fn stats_deep_nesting() {
    let input = format!("{}{}", "[".repeat(50), "]".repeat(50));

    wjson()
        .arg("stats")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Max depth:  50"))
        .stdout(predicate::str::contains("  list:     50"));
}

#[test]
fn check_excessive_nesting_fails_cleanly() {
    wjson()
        .arg("check")
        .write_stdin("[".repeat(100_000))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nesting too deep at 128"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Pipelines and edge cases
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn format_output_is_stable() {
    let first = wjson()
        .args(["format", "-i", sample_json_path()])
        .output()
        .unwrap();
    assert!(first.status.success());

    wjson()
        .arg("format")
        .write_stdin(first.stdout.clone())
        .assert()
        .success()
        .stdout(String::from_utf8(first.stdout).unwrap());
}

#[test]
fn format_output_parses_with_serde_json() {
    let output = wjson()
        .args(["format", "-i", sample_json_path()])
        .output()
        .unwrap();
    let ours: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let original: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(sample_json_path()).unwrap()).unwrap();
    assert_eq!(ours, original);
}

#[test]
fn large_input_roundtrip() {
    let items: Vec<String> = (0..5000).map(|i| format!("{{\"id\":{i},\"v\":\"é{i}\"}}")).collect();
    let input = format!("[{}]", items.join(","));

    wjson()
        .arg("format")
        .write_stdin(input.clone())
        .assert()
        .success()
        .stdout(input);
}

#[test]
fn help_flag_shows_usage() {
    wjson()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("format"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn unknown_subcommand_fails() {
    wjson().arg("minify").assert().failure();
}
