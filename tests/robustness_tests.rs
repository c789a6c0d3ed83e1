use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[test]
fn test_malformed_script_handling() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("robustness.csv");
    let mut wtr = csv::Writer::from_path(&script).unwrap();
    wtr.write_record(common::HEADER).unwrap();

    wtr.write_record(["register", "+1", "", "", "", "", ""])
        .unwrap();
    // Invalid type
    wtr.write_record(["withdraw", "", "1", "10", "", "", ""])
        .unwrap();
    // Missing amount for deposit (required)
    wtr.write_record(["deposit", "", "1", "", "", "", ""])
        .unwrap();
    // Text in amount field
    wtr.write_record(["deposit", "", "1", "ten", "", "", ""])
        .unwrap();
    // Valid deposit
    wtr.write_record(["deposit", "", "1", "30", "", "", ""])
        .unwrap();
    wtr.flush().unwrap();
    drop(wtr);

    let mut cmd = Command::new(cargo_bin!("wallet-ledger"));
    cmd.arg("apply").arg(&script);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading command"))
        .stderr(predicate::str::contains("Error processing command"))
        .stdout(predicate::str::contains("1,+1,30"));
}

#[test]
fn test_unknown_references_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("references.csv");
    let mut wtr = csv::Writer::from_path(&script).unwrap();
    wtr.write_record(common::HEADER).unwrap();

    wtr.write_record(["register", "+1", "", "", "", "", ""])
        .unwrap();
    wtr.write_record(["deposit", "", "7", "10", "", "", ""])
        .unwrap();
    wtr.write_record([
        "reject",
        "",
        "",
        "",
        "",
        "6f1c1d8e-8c4b-4c1e-9a55-0d7f1f6f2a11",
        "",
    ])
    .unwrap();
    wtr.flush().unwrap();
    drop(wtr);

    let mut cmd = Command::new(cargo_bin!("wallet-ledger"));
    cmd.arg("apply").arg(&script);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("account not found"))
        .stderr(predicate::str::contains("payment not found"))
        .stdout(predicate::str::contains("1,+1,0"));
}
