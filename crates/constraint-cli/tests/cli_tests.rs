//! Integration tests for the `constraints` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the check,
//! conflicts, validate, and free subcommands through the actual binary,
//! including stdin piping, JSON output, exit codes, and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to a fixture under tests/fixtures.
fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Helper: read a fixture as a string.
fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture(name)).expect("fixture must exist")
}

fn constraints() -> Command {
    Command::cargo_bin("constraints").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_reports_first_conflict() {
    constraints()
        .args(["check", "-c", &fixture("candidate_conflict.json")])
        .args(["-e", &fixture("existing.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Conflicts with 'Office' (c1) on monday, 09:00-12:00",
        ))
        .stdout(predicate::str::contains("Swimming").not());
}

#[test]
fn check_reads_existing_from_stdin() {
    constraints()
        .args(["check", "-c", &fixture("candidate_conflict.json")])
        .write_stdin(read_fixture("existing.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Conflicts with 'Office'"));
}

#[test]
fn check_touching_boundary_is_clear() {
    constraints()
        .args(["check", "-c", &fixture("candidate_touching.json")])
        .args(["-e", &fixture("existing.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("No conflict."));
}

#[test]
fn check_json_output() {
    let output = constraints()
        .args(["check", "--json", "-c", &fixture("candidate_conflict.json")])
        .args(["-e", &fixture("existing.json")])
        .output()
        .expect("check should run");
    assert!(output.status.success());

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(v["hasConflict"], true);
    assert_eq!(v["conflictingConstraint"]["id"], "c1");
    assert_eq!(v["overlappingDays"], serde_json::json!(["monday"]));
}

#[test]
fn check_edit_excludes_own_id() {
    // Without exclusion the edited constraint collides with its stored self.
    constraints()
        .args(["check", "-c", &fixture("candidate_edit_c1.json")])
        .args(["-e", &fixture("existing.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("(c1) on tuesday, wednesday"));

    constraints()
        .args(["check", "-c", &fixture("candidate_edit_c1.json")])
        .args(["-e", &fixture("existing.json"), "--exclude-id", "c1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No conflict."));
}

#[test]
fn check_fail_on_conflict_sets_exit_code() {
    constraints()
        .args(["check", "--fail-on-conflict"])
        .args(["-c", &fixture("candidate_conflict.json")])
        .args(["-e", &fixture("existing.json")])
        .assert()
        .code(2);

    constraints()
        .args(["check", "--fail-on-conflict"])
        .args(["-c", &fixture("candidate_touching.json")])
        .args(["-e", &fixture("existing.json")])
        .assert()
        .success();
}

#[test]
fn check_malformed_time_fails() {
    constraints()
        .args(["check", "-c", &fixture("candidate_malformed.json")])
        .args(["-e", &fixture("existing.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse candidate constraint"))
        .stderr(predicate::str::contains("half past nine"));
}

#[test]
fn check_missing_file_fails() {
    constraints()
        .args(["check", "-c", "/nonexistent/candidate.json"])
        .args(["-e", &fixture("existing.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn check_refuses_two_stdin_inputs() {
    constraints()
        .args(["check", "-c", "-"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("can be read from stdin"));
}

// ─────────────────────────────────────────────────────────────────────────────
// conflicts
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn conflicts_lists_every_match() {
    constraints()
        .args(["conflicts", "-c", &fixture("candidate_conflict.json")])
        .args(["-e", &fixture("existing.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("'Office' (c1) on monday, 09:00-12:00 (60 min/day)"))
        .stdout(predicate::str::contains(
            "'Swimming' (c3) on monday, 11:30-13:00 (60 min/day)",
        ));
}

#[test]
fn conflicts_json_output() {
    let output = constraints()
        .args(["conflicts", "--json", "-c", &fixture("candidate_conflict.json")])
        .args(["-e", &fixture("existing.json")])
        .output()
        .expect("conflicts should run");
    assert!(output.status.success());

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let ids: Vec<&str> = v
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|c| c["conflictingConstraint"]["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["c1", "c3"]);
    assert_eq!(v[0]["overlappingDays"], serde_json::json!(["monday"]));
    assert_eq!(v[0]["overlapMinutes"], 60);
}

#[test]
fn conflicts_none() {
    constraints()
        .args(["conflicts", "-c", &fixture("candidate_touching.json")])
        .args(["-e", &fixture("existing.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("No conflicts."));
}

// ─────────────────────────────────────────────────────────────────────────────
// validate
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn validate_accepts_good_draft() {
    constraints()
        .args(["validate", "-c", &fixture("candidate_conflict.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Constraint 'Dentist' is valid."));
}

#[test]
fn validate_rejects_overnight_window() {
    constraints()
        .args(["validate", "-c", &fixture("candidate_invalid.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Constraint 'Night shift' is invalid"))
        .stderr(predicate::str::contains("start 22:00 must be before end 06:00"));
}

#[test]
fn validate_reads_stdin() {
    constraints()
        .args(["validate", "-c", "-"])
        .write_stdin(read_fixture("candidate_touching.json"))
        .assert()
        .success();
}

// ─────────────────────────────────────────────────────────────────────────────
// free
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn free_lists_gaps_between_merged_blocks() {
    // Monday busy: 08:00-08:45, 09:00-12:00 + 11:30-13:00 merged
    constraints()
        .args(["free", "-e", &fixture("existing.json"), "--day", "monday"])
        .args(["--from", "08:00", "--to", "18:00"])
        .assert()
        .success()
        .stdout("08:45-09:00 (15 min)\n13:00-18:00 (300 min)\n");
}

#[test]
fn free_with_minimum_duration() {
    constraints()
        .args(["free", "-e", &fixture("existing.json"), "--day", "monday"])
        .args(["--from", "08:00", "--to", "18:00", "--min", "30"])
        .assert()
        .success()
        .stdout("13:00-18:00 (300 min)\n");
}

#[test]
fn free_json_output() {
    let output = constraints()
        .args(["free", "--json", "-e", &fixture("existing.json"), "--day", "friday"])
        .args(["--from", "08:00", "--to", "10:00"])
        .output()
        .expect("free should run");
    assert!(output.status.success());

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(
        v,
        serde_json::json!([
            { "start": "08:45", "end": "10:00", "durationMinutes": 75 }
        ])
    );
}

#[test]
fn free_rejects_unknown_day() {
    constraints()
        .args(["free", "-e", &fixture("existing.json"), "--day", "Funday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown weekday: Funday"));
}

#[test]
fn free_rejects_inverted_window() {
    constraints()
        .args(["free", "-e", &fixture("existing.json"), "--day", "monday"])
        .args(["--from", "18:00", "--to", "08:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be before"));
}

#[test]
fn free_help_documents_exclusive_end() {
    constraints()
        .args(["free", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("23:59-24:00"));
}

#[test]
fn no_subcommand_shows_usage() {
    constraints()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
