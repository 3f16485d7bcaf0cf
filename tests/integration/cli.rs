//! Command-line binary, run as a subprocess.

use std::process::{Command, Output};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/legislation.json");

fn provision(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_provision"))
        .args(args)
        .env_remove("PROVISION_CORPUS_PATH")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run provision binary")
}

#[test]
fn test_search_json_output() {
    let output = provision(&[
        "search",
        "--corpus",
        FIXTURE,
        "--method",
        "hybrid",
        "--json",
        "levy exemption",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let results: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let results = results.as_array().unwrap();
    assert!(!results.is_empty());
    assert_eq!(results[0]["id"], "ptp-41");
    assert!(results[0]["score"].as_f64().unwrap() <= 1.0);
}

#[test]
fn test_search_human_output() {
    let output = provision(&["search", "--corpus", FIXTURE, "-k", "2", "reportable incident"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ndis-73"));
    assert!(stdout.contains("matched:"));
}

#[test]
fn test_stats_output() {
    let output = provision(&["stats", "--corpus", FIXTURE]);
    assert!(output.status.success());

    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["totalDocuments"], 8);
    assert_eq!(stats["indexed"], true);
    assert_eq!(stats["skippedPassages"], 0);
}

#[test]
fn test_missing_corpus_fails() {
    let output = provision(&["search", "levy"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("PROVISION_CORPUS_PATH"));
}
