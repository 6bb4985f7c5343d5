//! Runs the demo binary end to end.

#![allow(clippy::panic_in_result_fn)]

use assert_cmd::Command;
use predicates::prelude::*;

fn demo() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("assay-demo"));
    cmd.arg("--color").arg("never");
    cmd
}

#[test]
fn runs_suite_with_summary() {
    demo()
        .assert()
        .success()
        .stdout(predicate::str::starts_with("assay - starting tests\n\n"))
        .stdout(predicate::str::contains("Starting test : 'Testfoo' @ "))
        .stdout(predicate::str::contains("'test3'\t\t\t[PASS]    \n"))
        .stdout(predicate::str::contains("Iteration : 4\n"))
        .stdout(predicate::str::contains("'operator_test'\t\t\t[FAILED]  \n"))
        .stdout(predicate::str::contains("assay - tests completed\n"))
        .stdout(predicate::str::contains("\nSummary\n"));
}

#[test]
fn summary_can_be_disabled() {
    demo()
        .arg("--no-summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary").not())
        .stdout(predicate::str::ends_with("assay - tests completed\n\n"));
}

#[test]
fn never_colors_output() {
    demo()
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn info_severity_reports_passes() {
    demo()
        .args(["--severity", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 != 1  -->  assert passed @["));
}

#[test]
fn strict_mode_fails_on_failed_cases() {
    demo().arg("--strict").assert().failure();
}

#[test]
fn trace_categories_log_to_stderr() {
    demo()
        .args(["--log-enable", "runner"])
        .assert()
        .success()
        .stderr(predicate::str::contains("starting case 'Testfoo'"));
}

#[test]
fn rejects_unknown_severity() {
    demo()
        .args(["--severity", "loud"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("loud"));
}
