//! Integration tests for `importmap resolve`.

use std::path::Path;
use std::process::Command;

const MAP: &str = r#"{
    "imports": {
        "moment": "/node_modules/moment/src/moment.js",
        "lodash/": "/node_modules/lodash-es/",
        "blocked": null
    },
    "scopes": {
        "/legacy/": { "moment": "/node_modules/moment-1/moment.js" }
    }
}"#;

fn cargo_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO"));
    cmd.args(["run", "-p", "importmap-cli", "--bin", "importmap", "--"]);
    cmd.env_remove("IMPORTMAP_BASE_URL");
    cmd
}

fn write_map(dir: &Path) -> String {
    let path = dir.join("importmap.json");
    std::fs::write(&path, MAP).unwrap();
    path.to_string_lossy().into_owned()
}

fn resolve_json(map: &str, base_url: &str, specifiers: &[&str]) -> (i32, serde_json::Value) {
    let output = cargo_bin()
        .args([
            "--json",
            "--base-url",
            base_url,
            "resolve",
            "--map-base-url",
            "https://example.com/",
            "--map",
            map,
        ])
        .args(specifiers)
        .output()
        .expect("Failed to run resolve command");

    let json = serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    (output.status.code().unwrap_or(-1), json)
}

#[test]
fn test_resolve_json_success() {
    let dir = tempfile::tempdir().unwrap();
    let map = write_map(dir.path());

    let (code, json) = resolve_json(
        &map,
        "https://example.com/app/main.mjs",
        &["moment", "lodash/map.js", "./util.js"],
    );

    assert_eq!(code, 0);
    assert_eq!(json["schema_version"].as_u64(), Some(1));
    assert_eq!(json["ok"], true);

    let results = json["results"].as_array().expect("results should be an array");
    assert_eq!(results.len(), 3);
    assert_eq!(
        results[0]["resolved"],
        "https://example.com/node_modules/moment/src/moment.js"
    );
    assert_eq!(
        results[1]["resolved"],
        "https://example.com/node_modules/lodash-es/map.js"
    );
    assert_eq!(results[2]["resolved"], "https://example.com/app/util.js");
    assert!(results[0]["error_code"].is_null());
    assert!(results[0].get("trace").is_none());
}

#[test]
fn test_resolve_json_uses_scope() {
    let dir = tempfile::tempdir().unwrap();
    let map = write_map(dir.path());

    let (code, json) = resolve_json(&map, "https://example.com/legacy/app.mjs", &["moment"]);

    assert_eq!(code, 0);
    assert_eq!(
        json["results"][0]["resolved"],
        "https://example.com/node_modules/moment-1/moment.js"
    );
}

#[test]
fn test_resolve_json_failures_exit_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let map = write_map(dir.path());

    let (code, json) = resolve_json(
        &map,
        "https://example.com/app/main.mjs",
        &["moment", "blocked", "react"],
    );

    assert_eq!(code, 1);
    assert_eq!(json["ok"], false);

    let results = &json["results"];
    assert!(results[0]["resolved"].is_string());
    assert!(results[1]["resolved"].is_null());
    assert_eq!(results[1]["error_code"], "BLOCKED_BY_NULL_ENTRY");
    assert_eq!(results[2]["error_code"], "UNMAPPED_BARE_SPECIFIER");
    assert!(results[2]["error"].as_str().unwrap().contains("react"));
}

#[test]
fn test_resolve_trace_steps() {
    let dir = tempfile::tempdir().unwrap();
    let map = write_map(dir.path());

    let output = cargo_bin()
        .args([
            "--json",
            "--base-url",
            "https://example.com/app/main.mjs",
            "resolve",
            "--map-base-url",
            "https://example.com/",
            "--map",
            &map,
            "--trace",
            "lodash/map.js",
        ])
        .output()
        .expect("Failed to run resolve command");

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");

    let steps: Vec<&str> = json["results"][0]["trace"]["steps"]
        .as_array()
        .expect("trace steps should be an array")
        .iter()
        .filter_map(|s| s["step"].as_str())
        .collect();
    assert_eq!(steps.first(), Some(&"parse_specifier"));
    assert!(steps.contains(&"match_prefix"), "{steps:?}");
}

#[test]
fn test_resolve_human_output() {
    let dir = tempfile::tempdir().unwrap();
    let map = write_map(dir.path());

    let output = cargo_bin()
        .args([
            "--base-url",
            "https://example.com/app/main.mjs",
            "resolve",
            "--map-base-url",
            "https://example.com/",
            "--map",
            &map,
            "moment",
        ])
        .output()
        .expect("Failed to run resolve command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        "moment -> https://example.com/node_modules/moment/src/moment.js"
    );
}
