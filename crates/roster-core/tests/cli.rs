//! CLI tests for the `roster` binary.
//!
//! Every test passes `--config` pointing at a temp file so a developer's own
//! `roster.toml` never leaks into the run.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .display()
        .to_string()
}

/// Isolated config dir holding a `roster.toml` with `contents`.
fn config_with(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("roster.toml");
    std::fs::write(&path, contents).expect("write config");
    (dir, path)
}

fn roster(config: &PathBuf) -> Command {
    let mut cmd = Command::cargo_bin("roster").expect("roster binary should exist");
    cmd.env_remove("ROSTER_CONFIG")
        .env_remove("ROSTER_CONFIG_DIR")
        .env_remove("ROSTER_LOG")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config);
    cmd
}

fn show_json(config: &PathBuf, extra: &[&str]) -> Value {
    let output = roster(config)
        .args(["show", "--source", &fixture("members.json")])
        .args(extra)
        .output()
        .expect("run roster show");
    assert!(output.status.success(), "roster show failed: {output:?}");
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn row_ids(snapshot: &Value) -> Vec<String> {
    snapshot["rows"]
        .as_array()
        .expect("rows array")
        .iter()
        .map(|r| r["id"].as_str().expect("id").to_string())
        .collect()
}

// ============================================================================
// show
// ============================================================================

mod show {
    use super::*;

    #[test]
    fn first_page_by_default() {
        let (_dir, config) = config_with("");
        let snapshot = show_json(&config, &[]);

        assert_eq!(snapshot["filtered_count"], 12);
        assert_eq!(snapshot["pagination"]["current_page"], 1);
        assert_eq!(snapshot["pagination"]["page_count"], 2);
        assert_eq!(row_ids(&snapshot).len(), 10);
        assert_eq!(snapshot["summary"]["text"], "0 of 12 row(s) selected");
    }

    #[test]
    fn search_matches_name_substring() {
        let (_dir, config) = config_with("");
        let snapshot = show_json(&config, &["--search", "ali"]);
        assert_eq!(row_ids(&snapshot), ["1"]);
        assert_eq!(snapshot["pagination"]["page_count"], 1);
    }

    #[test]
    fn search_is_case_insensitive_over_role() {
        let (_dir, config) = config_with("");
        let snapshot = show_json(&config, &["--search", "ADMIN"]);
        assert_eq!(row_ids(&snapshot), ["1", "6"]);
        // Total stays unfiltered
        assert_eq!(snapshot["summary"]["total"], 12);
    }

    #[test]
    fn second_page() {
        let (_dir, config) = config_with("");
        let snapshot = show_json(&config, &["--page", "2"]);
        assert_eq!(row_ids(&snapshot), ["11", "12"]);
        assert_eq!(snapshot["pagination"]["has_prev"], true);
        assert_eq!(snapshot["pagination"]["has_next"], false);
    }

    #[test]
    fn out_of_range_page_stays_on_first() {
        let (_dir, config) = config_with("");
        let snapshot = show_json(&config, &["--page", "9"]);
        assert_eq!(snapshot["pagination"]["current_page"], 1);
    }

    #[test]
    fn page_size_from_config_file() {
        let (_dir, config) = config_with("page_size = 5\n");
        let snapshot = show_json(&config, &[]);
        assert_eq!(snapshot["pagination"]["page_count"], 3);
        assert_eq!(snapshot["pagination"]["buttons"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn page_size_flag_overrides_config() {
        let (_dir, config) = config_with("page_size = 5\n");
        let snapshot = show_json(&config, &["--page-size", "4", "--page", "3"]);
        assert_eq!(row_ids(&snapshot), ["9", "10", "11", "12"]);
    }

    #[test]
    fn page_size_flag_repairs_invalid_config_value() {
        let (_dir, config) = config_with("page_size = 0\n");
        let snapshot = show_json(&config, &["--page-size", "6"]);
        assert_eq!(snapshot["pagination"]["page_count"], 2);
        assert_eq!(row_ids(&snapshot).len(), 6);
    }

    #[test]
    fn source_from_config_file() {
        let (_dir, config) = config_with(&format!("source = {:?}\n", fixture("members.json")));
        roster(&config)
            .args(["show", "--format", "table"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Alice Johnson"));
    }

    #[test]
    fn table_format() {
        let (_dir, config) = config_with("");
        roster(&config)
            .args(["show", "--format", "table", "--source", &fixture("members.json")])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("ID"))
            .stdout(predicate::str::contains("alice@example.com"))
            .stdout(predicate::str::contains("Page 1 of 2  |  0 of 12 row(s) selected"));
    }

    #[test]
    fn table_format_without_matches() {
        let (_dir, config) = config_with("");
        roster(&config)
            .args(["show", "--format", "table", "--search", "zzz"])
            .args(["--source", &fixture("members.json")])
            .assert()
            .success()
            .stdout(predicate::str::contains("No matching records"))
            .stdout(predicate::str::contains("Page 1 of 1"));
    }
}

// ============================================================================
// Errors and exit codes
// ============================================================================

mod errors {
    use super::*;

    #[test]
    fn missing_source_file_is_source_error() {
        let (dir, config) = config_with("");
        let missing = dir.path().join("nope.json");
        roster(&config)
            .args(["show", "--source"])
            .arg(&missing)
            .assert()
            .code(12)
            .stderr(predicate::str::contains("Fetch Failed"));
    }

    #[test]
    fn malformed_feed_is_source_error() {
        let (_dir, config) = config_with("");
        roster(&config)
            .args(["show", "--source", &fixture("malformed.json")])
            .assert()
            .code(12)
            .stderr(predicate::str::contains("Malformed Record Feed"));
    }

    #[test]
    fn zero_page_size_is_config_error() {
        let (_dir, config) = config_with("");
        roster(&config)
            .args(["show", "--page-size", "0", "--source", &fixture("members.json")])
            .assert()
            .code(11)
            .stderr(predicate::str::contains("page_size"));
    }

    #[test]
    fn zero_page_size_in_config_is_config_error() {
        let (_dir, config) = config_with("page_size = 0\n");
        roster(&config)
            .args(["show", "--source", &fixture("members.json")])
            .assert()
            .code(11)
            .stderr(predicate::str::contains("page_size"));
    }

    #[test]
    fn unknown_config_key_is_config_error() {
        let (_dir, config) = config_with("colour = \"red\"\n");
        roster(&config)
            .args(["show", "--source", &fixture("members.json")])
            .assert()
            .code(11);
    }

    #[test]
    fn missing_config_file_is_config_error() {
        let dir = TempDir::new().expect("tempdir");
        let missing = dir.path().join("absent.toml");
        roster(&missing)
            .args(["show", "--source", &fixture("members.json")])
            .assert()
            .code(11)
            .stderr(predicate::str::contains("not found"));
    }

    #[test]
    fn unknown_command_fails() {
        let (_dir, config) = config_with("");
        roster(&config)
            .arg("nonexistent-command")
            .assert()
            .failure()
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn invalid_log_level_fails() {
        let (_dir, config) = config_with("");
        roster(&config)
            .args(["--log-level", "loud", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown log level"));
    }
}

// ============================================================================
// Logging
// ============================================================================

mod logging {
    use super::*;

    #[test]
    fn log_file_receives_output() {
        let (dir, config) = config_with("");
        let log = dir.path().join("roster.log");
        roster(&config)
            .args(["--log-level", "info", "--log-file"])
            .arg(&log)
            .args(["show", "--source", &fixture("members.json")])
            .assert()
            .success()
            .stderr(predicate::str::is_empty());

        let contents = std::fs::read_to_string(&log).expect("log file");
        assert!(contents.contains("records fetched"), "log was: {contents}");
    }

    #[test]
    fn jsonl_logs_on_stderr() {
        let (_dir, config) = config_with("");
        roster(&config)
            .args(["--log-level", "info", "--log-format", "jsonl"])
            .args(["show", "--source", &fixture("members.json")])
            .assert()
            .success()
            .stderr(predicate::str::contains("\"target\":\"roster.source\""));
    }

    #[test]
    fn quiet_suppresses_warnings() {
        let (_dir, config) = config_with("");
        roster(&config)
            .args(["-q", "show", "--page", "9", "--source", &fixture("members.json")])
            .assert()
            .success()
            .stderr(predicate::str::is_empty());
    }

    #[test]
    fn quiet_wins_over_rust_log() {
        let (_dir, config) = config_with("");
        roster(&config)
            .env("RUST_LOG", "info")
            .args(["-q", "show", "--page", "9", "--source", &fixture("members.json")])
            .assert()
            .success()
            .stderr(predicate::str::is_empty());
    }

    #[test]
    fn rust_log_applies_without_level_flags() {
        let (_dir, config) = config_with("");
        roster(&config)
            .env("RUST_LOG", "roster=info")
            .args(["show", "--source", &fixture("members.json")])
            .assert()
            .success()
            .stderr(predicate::str::contains("records fetched"));
    }
}
