use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("apply").arg("tests/fixtures/script.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("id,phone,balance"))
        // Account 1 paid 100000 of 1000000
        .stdout(predicate::str::contains("1,+992900000001,900000"))
        // Account 2 could afford the first payment only
        .stdout(predicate::str::contains("2,+992900000002,350"))
        .stderr(predicate::str::contains("not enough balance"));

    Ok(())
}
