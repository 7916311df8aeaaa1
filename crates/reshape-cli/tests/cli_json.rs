//! Integration tests for the `reshape` binary.

use serde_json::{json, Value};
use std::path::Path;
use std::process::{Command, Output};

fn reshape() -> Command {
    Command::new(env!("CARGO_BIN_EXE_reshape"))
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    reshape()
        .arg("--cwd")
        .arg(dir)
        .args(args)
        .output()
        .expect("Failed to run reshape")
}

/// `function f(a, b) { return b; }` with its scope tree.
fn document() -> Value {
    json!({
        "tree": {
            "root": 8,
            "nodes": [
                { "type": "BindingIdentifier", "name": "f" },
                { "type": "BindingIdentifier", "name": "a" },
                { "type": "BindingIdentifier", "name": "b" },
                { "type": "FormalParameters", "items": [1, 2], "rest": null },
                { "type": "IdentifierExpression", "name": "b" },
                { "type": "ReturnStatement", "expression": 4 },
                { "type": "FunctionBody", "directives": [], "statements": [5] },
                { "type": "FunctionDeclaration", "isAsync": false, "isGenerator": false,
                  "name": 0, "params": 3, "body": 6 },
                { "type": "Script", "directives": [], "statements": [7] }
            ]
        },
        "scopes": {
            "root": 0,
            "scopes": [
                { "kind": "Global", "children": [1], "variables": [] },
                { "kind": "Script", "children": [2], "variables": [
                    { "name": "f", "declarations": [{ "node": 0, "kind": "FunctionDeclaration" }] }
                ]},
                { "kind": "Function", "variables": [
                    { "name": "a", "declarations": [{ "node": 1, "kind": "Parameter" }] },
                    { "name": "b", "declarations": [{ "node": 2, "kind": "Parameter" }],
                      "references": [{ "node": 4, "access": "Read" }] }
                ]}
            ]
        }
    })
}

fn write_json(dir: &Path, name: &str, value: &Value) {
    std::fs::write(dir.join(name), serde_json::to_string(value).unwrap()).unwrap();
}

fn node_name(doc: &Value, id: usize) -> &str {
    doc["tree"]["nodes"][id]["name"].as_str().unwrap()
}

#[test]
fn test_version_prints_name() {
    let output = reshape().arg("version").output().expect("Failed to run reshape");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("reshape "));
}

#[test]
fn test_rename_outputs_renamed_document() {
    let dir = tempfile::tempdir().unwrap();
    write_json(dir.path(), "doc.json", &document());

    let output = run_in(dir.path(), &["rename", "doc.json"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let doc: Value = serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    assert_eq!(node_name(&doc, 0), "f");
    assert_eq!(node_name(&doc, 1), "$arg0_1");
    assert_eq!(node_name(&doc, 2), "$arg1_2");
    assert_eq!(node_name(&doc, 4), "$arg1_2");
}

#[test]
fn test_rename_start_and_config() {
    let dir = tempfile::tempdir().unwrap();
    write_json(dir.path(), "doc.json", &document());
    write_json(dir.path(), "reshape.json", &json!({ "rename": { "exempt": ["Global"] } }));

    let output = run_in(dir.path(), &["--config", "reshape.json", "rename", "doc.json", "--start", "10"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let doc: Value = serde_json::from_slice(&output.stdout).unwrap();
    // The script scope is no longer exempt, so `f` takes the first id.
    assert_eq!(node_name(&doc, 0), "$$10");
    assert_eq!(node_name(&doc, 1), "$arg0_11");
    assert_eq!(node_name(&doc, 2), "$arg1_12");
}

#[test]
fn test_rename_rejects_malformed_document() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = document();
    doc["tree"]["nodes"][5]["expression"] = json!(2);
    write_json(dir.path(), "doc.json", &doc);

    let output = run_in(dir.path(), &["rename", "doc.json"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_rename_rejects_cyclic_scopes() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = document();
    doc["scopes"]["scopes"][2]["children"] = json!([0]);
    write_json(dir.path(), "doc.json", &doc);

    let output = run_in(dir.path(), &["rename", "doc.json"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_classify_rejects_detached_node() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = document();
    doc["tree"]["nodes"]
        .as_array_mut()
        .unwrap()
        .push(json!({ "type": "StaticMemberExpression", "object": 9, "property": "x" }));
    write_json(dir.path(), "doc.json", &doc);

    let output = run_in(dir.path(), &["classify", "doc.json", "9"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    write_json(dir.path(), "pattern.json", &json!({}));
    let output = run_in(dir.path(), &["match", "pattern.json", "doc.json", "--node", "9"]);
    assert!(!output.status.success());
}

#[test]
fn test_match_raw_json() {
    let dir = tempfile::tempdir().unwrap();
    write_json(dir.path(), "pattern.json", &json!({ "items": [] }));
    write_json(dir.path(), "yes.json", &json!({ "items": [1, 2, 3], "extra": true }));
    write_json(dir.path(), "no.json", &json!({ "other": [] }));

    let output = run_in(dir.path(), &["--json", "match", "pattern.json", "yes.json"]);
    assert!(output.status.success());
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["matches"], json!(true));

    let output = run_in(dir.path(), &["match", "pattern.json", "no.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "false");
}

#[test]
fn test_match_document_node() {
    let dir = tempfile::tempdir().unwrap();
    write_json(dir.path(), "doc.json", &document());
    write_json(
        dir.path(),
        "pattern.json",
        &json!({ "type": "FunctionDeclaration", "params": { "items": [{ "name": "a" }] } }),
    );

    let output = run_in(dir.path(), &["match", "pattern.json", "doc.json", "--node", "7"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "true");
}

#[test]
fn test_classify_node() {
    let dir = tempfile::tempdir().unwrap();
    write_json(dir.path(), "doc.json", &document());

    let output = run_in(dir.path(), &["classify", "doc.json", "7"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["type"], json!("FunctionDeclaration"));
    assert_eq!(report["statement"], json!(true));
    assert_eq!(report["literal"], json!(false));
    assert_eq!(report["inner_body"], json!(6));
    assert!(report.get("root_identifier").is_none());
}
