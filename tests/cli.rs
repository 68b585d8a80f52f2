use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn fatal_errors_exit_non_zero_with_a_diagnostic() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("sales-report")
        .unwrap()
        .args(["--records", "0", "--output-dir"])
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("dataset is empty"));
}

#[test]
fn missing_input_file_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("sales-report")
        .unwrap()
        .arg("--input")
        .arg(dir.path().join("absent.csv"))
        .args(["--output-dir"])
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
