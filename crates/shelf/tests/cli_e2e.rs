#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn shelf_cmd(root: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("shelf"));
    cmd.env_remove("RUST_LOG").arg("--root").arg(root.path());
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_set_get_delete_workflow() {
    let root = TempDir::new().unwrap();

    let receipt = stdout_json(shelf_cmd(&root).args([
        "set",
        "products",
        "laptop",
        r#"{"name": "Laptop Pro", "category": "Electronics"}"#,
    ]));
    assert_eq!(receipt, json!({"id": "laptop", "file": "laptop.json"}));
    assert!(root.path().join("products").join("laptop.json").exists());

    let doc = stdout_json(shelf_cmd(&root).args(["get", "products", "laptop"]));
    assert_eq!(doc, json!({"name": "Laptop Pro", "category": "Electronics"}));

    let outcome = stdout_json(shelf_cmd(&root).args(["delete", "products", "laptop"]));
    assert_eq!(outcome, json!({"deleted": true, "not_found": false}));

    let outcome = stdout_json(shelf_cmd(&root).args(["delete", "products", "laptop"]));
    assert_eq!(outcome, json!({"deleted": false, "not_found": true}));

    shelf_cmd(&root)
        .args(["get", "products", "laptop"])
        .assert()
        .success()
        .stdout("null\n");
}

#[test]
fn test_set_reads_stdin() {
    let root = TempDir::new().unwrap();

    shelf_cmd(&root)
        .args(["set", "notes", "n1"])
        .write_stdin(r#"{"text": "from stdin"}"#)
        .assert()
        .success();

    let doc = stdout_json(shelf_cmd(&root).args(["get", "notes", "n1"]));
    assert_eq!(doc, json!({"text": "from stdin"}));
}

#[test]
fn test_set_rejects_empty_input() {
    let root = TempDir::new().unwrap();

    shelf_cmd(&root)
        .args(["set", "notes", "n1"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));

    assert!(!root.path().join("notes").exists());
}

#[test]
fn test_get_repairs_malformed_file_with_warning() {
    let root = TempDir::new().unwrap();
    shelf_cmd(&root).args(["create", "users"]).assert().success();
    fs::write(
        root.path().join("users").join("alice.json"),
        r#"{"name": "Alice", "tags": ["a",],}"#,
    )
    .unwrap();

    let output = shelf_cmd(&root)
        .args(["get", "users", "alice"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Malformed JSON"))
        .get_output()
        .stdout
        .clone();
    let doc: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(doc, json!({"name": "Alice", "tags": ["a"]}));
}

#[test]
fn test_find_skips_unrepairable_file_with_warning() {
    let root = TempDir::new().unwrap();
    shelf_cmd(&root)
        .args(["set", "users", "bob", r#"{"name": "Bob"}"#])
        .assert()
        .success();
    fs::write(root.path().join("users").join("broken.json"), r#"{"name": }"#).unwrap();

    let output = shelf_cmd(&root)
        .args(["find", "users"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipping corrupt document"))
        .get_output()
        .stdout
        .clone();
    let docs: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(docs, json!([{"name": "Bob"}]));
}

#[test]
fn test_traversal_id_is_rejected() {
    let root = TempDir::new().unwrap();

    shelf_cmd(&root)
        .args(["set", "notes", "../escape", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid document id"));

    assert!(!root.path().join("escape.json").exists());
}

#[test]
fn test_find_with_match_and_like() {
    let root = TempDir::new().unwrap();
    shelf_cmd(&root)
        .args([
            "set",
            "products",
            "laptop",
            r#"{"name": "Laptop Pro", "category": "Electronics", "tags": ["a", "b"]}"#,
        ])
        .assert()
        .success();
    shelf_cmd(&root)
        .args([
            "set",
            "products",
            "novel",
            r#"{"name": "Novel", "category": "Books", "tags": ["c"]}"#,
        ])
        .assert()
        .success();

    let all = stdout_json(shelf_cmd(&root).args(["find", "products"]));
    assert_eq!(all.as_array().unwrap().len(), 2);

    let found = stdout_json(shelf_cmd(&root).args([
        "find",
        "products",
        "--match",
        r#"{"tags": "a"}"#,
        "--like",
        r#"{"name": "PRO"}"#,
    ]));
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["name"], "Laptop Pro");

    let none = stdout_json(shelf_cmd(&root).args([
        "find",
        "products",
        "--like",
        r#"{"name": "phone"}"#,
    ]));
    assert_eq!(none, json!([]));
}

#[test]
fn test_collections_lifecycle() {
    let root = TempDir::new().unwrap();

    let created = stdout_json(shelf_cmd(&root).args(["create", "orders"]));
    assert_eq!(created, json!({"collection": "orders", "created": true}));
    shelf_cmd(&root)
        .args(["set", "users", "alice", "{}"])
        .assert()
        .success();

    let names = stdout_json(shelf_cmd(&root).args(["collections"]));
    assert_eq!(names, json!(["orders", "users"]));

    let dropped = stdout_json(shelf_cmd(&root).args(["drop", "users"]));
    assert_eq!(dropped, json!({"collection": "users", "dropped": true}));

    shelf_cmd(&root)
        .args(["get", "users", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Collection not found"));
}

#[test]
fn test_write_failure_reports_backup() {
    let root = TempDir::new().unwrap();
    shelf_cmd(&root).args(["create", "users"]).assert().success();
    fs::create_dir(root.path().join("users").join("alice.json")).unwrap();

    shelf_cmd(&root)
        .args(["set", "users", "alice", r#"{"name": "Alice"}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("backed up"));

    let backups: Vec<_> = fs::read_dir(root.path().join(".backup").join("users"))
        .unwrap()
        .collect();
    assert_eq!(backups.len(), 1);
}

#[test]
fn test_config_respects_shelf_toml() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("shelf.toml"), "max_id_len = 8\n").unwrap();

    let config = stdout_json(shelf_cmd(&root).arg("config"));
    assert_eq!(config["max_id_len"], 8);

    shelf_cmd(&root)
        .args(["set", "notes", "much-too-long", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds 8 characters"));
}
