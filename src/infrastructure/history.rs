use super::snapshot_file::{PAYMENTS_FILE, write_records};
use crate::domain::payment::Payment;
use crate::domain::ports::HistorySink;
use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Writes payment history with file rotation.
///
/// A history that fits in `records_per_file` goes to `payments.dump`; a longer
/// one is split across `payments1.dump`, `payments2.dump`, ... each holding at
/// most `records_per_file` records. A limit of `0` puts one record per file.
#[derive(Debug, Clone)]
pub struct FileHistorySink {
    dir: PathBuf,
    records_per_file: usize,
}

impl FileHistorySink {
    pub fn new(dir: impl Into<PathBuf>, records_per_file: usize) -> Self {
        Self {
            dir: dir.into(),
            records_per_file,
        }
    }
}

#[async_trait]
impl HistorySink for FileHistorySink {
    async fn write_history(&self, payments: &[Payment]) -> Result<usize> {
        let dir = self.dir.clone();
        let records_per_file = self.records_per_file;
        let payments = payments.to_vec();
        tokio::task::spawn_blocking(move || write_rotated(&dir, &payments, records_per_file))
            .await?
    }
}

fn write_rotated(dir: &Path, payments: &[Payment], records_per_file: usize) -> Result<usize> {
    if payments.is_empty() {
        return Ok(0);
    }
    std::fs::create_dir_all(dir)?;

    if records_per_file >= payments.len() {
        write_records(&dir.join(PAYMENTS_FILE), payments)?;
        return Ok(1);
    }

    let mut files = 0;
    for (index, chunk) in payments.chunks(records_per_file.max(1)).enumerate() {
        write_records(&dir.join(format!("payments{}.dump", index + 1)), chunk)?;
        files += 1;
    }
    Ok(files)
}
