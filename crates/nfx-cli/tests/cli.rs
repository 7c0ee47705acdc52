//! Black-box tests for the `nfx` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn nfx() -> Command {
    Command::cargo_bin("nfx").unwrap()
}

#[test]
fn categories_lists_the_full_taxonomy() {
    nfx()
        .args(["categories"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Alimentação"))
        .stdout(predicate::str::contains("9. Outros"));
}

#[test]
fn categories_json_is_a_nine_entry_array() {
    let output = nfx().args(["categories", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = listing.as_array().unwrap();
    assert_eq!(entries.len(), 9);
    assert_eq!(entries[0]["name"], "Alimentação");
    assert!(entries[0]["examples"].as_array().is_some());
}

#[test]
fn extract_fails_for_missing_input() {
    nfx()
        .args(["extract", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn extract_fails_for_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foto.png");
    std::fs::write(&path, b"not an invoice").unwrap();

    nfx()
        .args(["extract", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn extract_requires_an_api_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nota.txt");
    std::fs::write(&path, "Nota Fiscal nº 123").unwrap();

    nfx()
        .env_remove("GEMINI_API_KEY")
        .args(["extract", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}
