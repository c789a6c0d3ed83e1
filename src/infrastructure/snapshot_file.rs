use crate::domain::ports::{LedgerSnapshot, SnapshotStore};
use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::{Path, PathBuf};

pub const ACCOUNTS_FILE: &str = "accounts.dump";
pub const PAYMENTS_FILE: &str = "payments.dump";
pub const FAVORITES_FILE: &str = "favorites.dump";

/// Stores snapshots as `;`-separated, newline-terminated records, one file
/// per collection:
///
/// - `accounts.dump`: `id;phone;balance`
/// - `payments.dump`: `id;amount;category;accountID;status`
/// - `favorites.dump`: `id;amount;category;accountID;name`
///
/// Empty collections are not written, and missing files load as empty.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn save(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        let dir = self.dir.clone();
        let snapshot = snapshot.clone();
        tokio::task::spawn_blocking(move || write_snapshot(&dir, &snapshot)).await?
    }

    async fn load(&self) -> Result<LedgerSnapshot> {
        let dir = self.dir.clone();
        tokio::task::spawn_blocking(move || read_snapshot(&dir)).await?
    }
}

fn write_snapshot(dir: &Path, snapshot: &LedgerSnapshot) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    if !snapshot.accounts.is_empty() {
        write_records(&dir.join(ACCOUNTS_FILE), &snapshot.accounts)?;
    }
    if !snapshot.payments.is_empty() {
        write_records(&dir.join(PAYMENTS_FILE), &snapshot.payments)?;
    }
    if !snapshot.favorites.is_empty() {
        write_records(&dir.join(FAVORITES_FILE), &snapshot.favorites)?;
    }
    Ok(())
}

fn read_snapshot(dir: &Path) -> Result<LedgerSnapshot> {
    Ok(LedgerSnapshot {
        accounts: read_records_if_present(&dir.join(ACCOUNTS_FILE))?,
        payments: read_records_if_present(&dir.join(PAYMENTS_FILE))?,
        favorites: read_records_if_present(&dir.join(FAVORITES_FILE))?,
    })
}

/// Writes `records` to `path`, replacing any existing file.
pub(crate) fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(b';')
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(File::create(path)?);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub(crate) fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b';')
        .from_reader(File::open(path)?);
    reader
        .into_deserialize()
        .map(|record| record.map_err(Into::into))
        .collect()
}

fn read_records_if_present<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if path.exists() {
        read_records(path)
    } else {
        Ok(Vec::new())
    }
}
