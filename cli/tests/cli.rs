use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn simulate_prints_a_log_and_a_verdict() {
    Command::cargo_bin("cli")
        .unwrap()
        .args(["simulate", "--hero", "wukong", "--encounter", "skeleton_pair", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[TURN]"))
        .stdout(
            predicate::str::contains("VICTORY")
                .or(predicate::str::contains("DEFEAT"))
                .or(predicate::str::contains("TIMEOUT")),
        );
}

#[test]
fn simulate_json_emits_a_parseable_report() {
    let output = Command::cargo_bin("cli")
        .unwrap()
        .args(["simulate", "--seed", "3", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(report.get("victory").is_some());
    assert!(report.get("rounds").is_some());
}

#[test]
fn simulate_many_reports_sample_counts() {
    Command::cargo_bin("cli")
        .unwrap()
        .args(["simulate-many", "--samples", "5", "--seed", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 sample(s)"));
}

#[test]
fn cards_lists_the_builtin_catalog() {
    Command::cargo_bin("cli")
        .unwrap()
        .arg("cards")
        .assert()
        .success()
        .stdout(predicate::str::contains("wk_strike"));
}

#[test]
fn unknown_hero_id_fails_with_a_message() {
    Command::cargo_bin("cli")
        .unwrap()
        .args(["simulate", "--hero", "nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nobody"));
}
