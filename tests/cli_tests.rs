use assert_cmd::Command;
use predicates::prelude::*;

fn fuzzgate() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("fuzzgate").unwrap()
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_json_parser_fails_gate() {
    let output = fuzzgate()
        .args(["demo", "--fn", "parse_json", "--json"])
        .assert()
        .code(1)
        .get_output()
        .clone();

    let reports = stdout_json(&output);
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["fn"], "parse_json");
    assert_eq!(reports[0]["gate"], "fail");
    let crashes = reports[0]["crashes"].as_array().unwrap();
    assert!(crashes.iter().any(|c| c["type"] == "SyntaxError"));
    assert!(reports[0]["ms"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_defensive_function_passes_gate() {
    fuzzgate()
        .args(["demo", "--fn", "safe_length"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gate: PASS"))
        .stdout(predicate::str::contains("safe_length: 242 runs, 0 unique crashes"));
}

#[test]
fn test_console_lists_crashes() {
    fuzzgate()
        .args(["demo", "--fn", "unsafe_length"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[TypeError]"))
        .stdout(predicate::str::contains("Input: [null]"))
        .stdout(predicate::str::contains("Gate: FAIL"));
}

#[test]
fn test_sarif_output() {
    let output = fuzzgate()
        .args(["demo", "--fn", "unsafe_length", "--sarif"])
        .assert()
        .code(1)
        .get_output()
        .clone();

    let log = stdout_json(&output);
    assert_eq!(log["version"], "2.1.0");
    assert_eq!(log["runs"][0]["tool"]["driver"]["name"], "FuzzGate");
    let results = log["runs"][0]["results"].as_array().unwrap();
    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r["ruleId"] == "fuzz/TypeError"));
    assert!(results.iter().all(|r| r["level"] == "error"));
    assert!(results[0]["message"]["text"]
        .as_str()
        .unwrap()
        .starts_with("unsafe_length(): Cannot read properties of"));
}

#[test]
fn test_non_callable_export_is_skipped() {
    let output = fuzzgate()
        .args(["demo", "--fn", "VERSION", "--fn", "safe_length", "--json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("VERSION is not a function"))
        .get_output()
        .clone();

    let reports = stdout_json(&output);
    assert_eq!(reports.as_array().unwrap().len(), 1);
    assert_eq!(reports[0]["fn"], "safe_length");
}

#[test]
fn test_fail_fast_stops_at_first_crash() {
    let output = fuzzgate()
        .args(["demo", "--fn", "always_throw", "--fail-fast", "--json"])
        .assert()
        .code(1)
        .get_output()
        .clone();

    let reports = stdout_json(&output);
    assert_eq!(reports[0]["runs"], 1);
    assert_eq!(reports[0]["crashes"][0]["error"], "boom");
    assert_eq!(reports[0]["crashes"][0]["type"], "Error");
}

#[test]
fn test_seed_is_reported() {
    let output = fuzzgate()
        .args(["text", "--fn", "word_count", "--seed", "42", "--json"])
        .assert()
        .success()
        .get_output()
        .clone();

    let reports = stdout_json(&output);
    assert_eq!(reports[0]["seed"], 42);
    assert_eq!(reports[0]["gate"], "pass");
}

#[test]
fn test_unknown_module_exits_with_usage_error() {
    fuzzgate()
        .arg("nope")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown module 'nope'"));
}

#[test]
fn test_invalid_flag_value_exits_with_usage_error() {
    fuzzgate()
        .args(["demo", "--duration", "soon"])
        .assert()
        .code(2);
}

#[test]
fn test_missing_module_prints_usage() {
    fuzzgate()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_list_modules() {
    fuzzgate()
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("parse_json/1"))
        .stdout(predicate::str::contains("VERSION (string)"))
        .stdout(predicate::str::contains("slugify/1"));
}
