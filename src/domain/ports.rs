use super::account::Account;
use super::favorite::Favorite;
use super::payment::Payment;
use crate::error::Result;
use async_trait::async_trait;

/// A point-in-time copy of every ledger collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub accounts: Vec<Account>,
    pub payments: Vec<Payment>,
    pub favorites: Vec<Favorite>,
}

/// Where ledger snapshots are written to and read back from.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn save(&self, snapshot: &LedgerSnapshot) -> Result<()>;
    async fn load(&self) -> Result<LedgerSnapshot>;
}

pub type SnapshotStoreBox = Box<dyn SnapshotStore>;

/// Sink for an account's payment history.
#[async_trait]
pub trait HistorySink: Send + Sync {
    /// Returns the number of files written.
    async fn write_history(&self, payments: &[Payment]) -> Result<usize>;
}
