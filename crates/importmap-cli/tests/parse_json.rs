//! Integration tests for `importmap parse`.

use std::path::Path;
use std::process::Command;

const BASE_URL: &str = "https://example.com/app/index.html";

const MAP: &str = r#"{
    "imports": {
        "moment": "/node_modules/moment/src/moment.js",
        "lodash/": "/node_modules/lodash-es/",
        "bad/": "./no-slash",
        "": "/empty.js"
    },
    "scopes": {
        "/vendor/": { "moment": "./moment-vendored.js" }
    }
}"#;

fn cargo_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO"));
    cmd.args(["run", "-p", "importmap-cli", "--bin", "importmap", "--"]);
    cmd.env_remove("IMPORTMAP_BASE_URL");
    cmd
}

fn write_map(dir: &Path, contents: &str) -> String {
    let path = dir.join("importmap.json");
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_parse_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let map = write_map(dir.path(), MAP);

    let output = cargo_bin()
        .args(["--json", "--base-url", BASE_URL, "parse", &map])
        .output()
        .expect("Failed to run parse command");

    assert!(output.status.success(), "parse should succeed: {output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should be valid JSON");

    assert_eq!(json["schema_version"].as_u64(), Some(1));

    let imports = &json["import_map"]["imports"];
    assert_eq!(
        imports["moment"],
        "https://example.com/node_modules/moment/src/moment.js"
    );
    assert_eq!(imports["lodash/"], "https://example.com/node_modules/lodash-es/");
    assert!(imports["bad/"].is_null());
    assert!(imports.get("").is_none());

    let scoped = &json["import_map"]["scopes"]["https://example.com/vendor/"];
    assert_eq!(
        scoped["moment"],
        "https://example.com/vendor/moment-vendored.js"
    );

    let codes: Vec<&str> = json["warnings"]
        .as_array()
        .expect("warnings should be an array")
        .iter()
        .filter_map(|w| w["code"].as_str())
        .collect();
    assert!(codes.contains(&"EMPTY_SPECIFIER_KEY"), "{codes:?}");
    assert!(codes.contains(&"NOT_STARTS_WITH_BASE_URL"), "{codes:?}");
}

#[test]
fn test_parse_json_keys_sorted_longest_first() {
    let dir = tempfile::tempdir().unwrap();
    let map = write_map(
        dir.path(),
        r#"{ "imports": { "a": "/a.js", "a/b/c": "/abc.js", "a/b": "/ab.js" } }"#,
    );

    let output = cargo_bin()
        .args(["--json", "--base-url", BASE_URL, "parse", &map])
        .output()
        .expect("Failed to run parse command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should be valid JSON");

    let keys: Vec<&String> = json["import_map"]["imports"]
        .as_object()
        .expect("imports should be an object")
        .keys()
        .collect();
    assert_eq!(keys, ["a/b/c", "a/b", "a"]);
}

#[test]
fn test_parse_deny_warnings_fails() {
    let dir = tempfile::tempdir().unwrap();
    let map = write_map(dir.path(), MAP);

    let output = cargo_bin()
        .args(["--base-url", BASE_URL, "parse", "--deny-warnings", &map])
        .output()
        .expect("Failed to run parse command");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_parse_base_url_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let map = write_map(dir.path(), r#"{ "imports": { "x": "./x.js" } }"#);

    let output = cargo_bin()
        .env("IMPORTMAP_BASE_URL", "https://cdn.example/root/")
        .args(["--json", "parse", "--deny-warnings", &map])
        .output()
        .expect("Failed to run parse command");

    assert!(output.status.success(), "parse should succeed: {output:?}");
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    assert_eq!(json["import_map"]["imports"]["x"], "https://cdn.example/root/x.js");
}

#[test]
fn test_parse_rejects_invalid_shape() {
    let dir = tempfile::tempdir().unwrap();
    let map = write_map(dir.path(), r#"{ "imports": ["not", "an", "object"] }"#);

    let output = cargo_bin()
        .args(["--base-url", BASE_URL, "parse", &map])
        .output()
        .expect("Failed to run parse command");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_parse_requires_base_url() {
    let dir = tempfile::tempdir().unwrap();
    let map = write_map(dir.path(), "{}");

    let output = cargo_bin()
        .args(["parse", &map])
        .output()
        .expect("Failed to run parse command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("base URL"), "stderr: {stderr}");
}

#[test]
fn test_parse_json_logs_warnings_with_span() {
    let dir = tempfile::tempdir().unwrap();
    let map = write_map(dir.path(), MAP);

    let output = cargo_bin()
        .args(["--json", "--base-url", BASE_URL, "parse", &map])
        .output()
        .expect("Failed to run parse command");

    let stderr = String::from_utf8_lossy(&output.stderr);
    let warnings: Vec<serde_json::Value> = stderr
        .lines()
        .filter(|l| l.trim_start().starts_with('{'))
        .map(|l| serde_json::from_str(l).expect("log line should be valid JSON"))
        .filter(|v: &serde_json::Value| v["level"] == "WARN")
        .collect();
    assert!(!warnings.is_empty(), "expected warning log lines: {stderr}");

    for line in &warnings {
        assert_eq!(line["span"]["cmd"], "parse", "{line}");
        assert!(line["span"]["file"].is_string(), "{line}");
        assert!(line["fields"]["code"].is_string(), "{line}");
    }
    let codes: Vec<&str> = warnings
        .iter()
        .filter_map(|l| l["fields"]["code"].as_str())
        .collect();
    assert!(codes.contains(&"NOT_STARTS_WITH_BASE_URL"), "{codes:?}");
}
