#![allow(dead_code)]

use std::fs::File;
use std::io::Error;
use std::path::Path;
use wallet_ledger::application::ledger::Ledger;
use wallet_ledger::domain::account::{AccountId, Money, Phone};
use wallet_ledger::domain::payment::{Category, Payment};
use wallet_ledger::infrastructure::snapshot_file::FileSnapshotStore;

pub const HEADER: [&str; 7] = [
    "type",
    "phone",
    "account",
    "amount",
    "category",
    "reference",
    "name",
];

/// Writes a command script that registers `accounts` accounts, funds each one
/// and makes `payments_per_account` payments of 1..=n from each.
pub fn generate_script(path: &Path, accounts: usize, payments_per_account: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(HEADER)?;

    for account in 1..=accounts {
        let id = account.to_string();
        wtr.write_record([
            "register",
            &format!("+99290000{account:04}"),
            "",
            "",
            "",
            "",
            "",
        ])?;
        wtr.write_record(["deposit", "", &id, "1000000", "", "", ""])?;
        for amount in 1..=payments_per_account {
            wtr.write_record(["pay", "", &id, &amount.to_string(), "auto", "", ""])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Builds a ledger with one account per phone, each funded with `balance`.
pub async fn funded_ledger(ledger: &Ledger, phones: &[&str], balance: i64) -> Vec<AccountId> {
    let mut ids = Vec::new();
    for phone in phones {
        let account = ledger.register_account(Phone::new(*phone)).await.unwrap();
        ledger
            .deposit(account.id, Money::new(balance))
            .await
            .unwrap();
        ids.push(account.id);
    }
    ids
}

/// Makes `count` payments of 1..=count from `account` and returns them.
pub async fn make_payments(ledger: &Ledger, account: AccountId, count: usize) -> Vec<Payment> {
    let mut payments = Vec::with_capacity(count);
    for amount in 1..=count {
        payments.push(
            ledger
                .pay(account, Money::new(amount as i64), Category::new("auto"))
                .await
                .unwrap(),
        );
    }
    payments
}

/// Exports a ledger with one account and `count` payments to `dir`.
pub async fn write_snapshot(dir: &Path, count: usize) -> Vec<Payment> {
    let ledger = Ledger::new();
    let ids = funded_ledger(&ledger, &["+992900000001"], 1_000_000_000).await;
    let payments = make_payments(&ledger, ids[0], count).await;
    ledger.export(&FileSnapshotStore::new(dir)).await.unwrap();
    payments
}
