use super::aggregator::{FanOutAggregator, FilterReducer, SumReducer};
use super::progress::{self, Progress};
use crate::config::LedgerConfig;
use crate::domain::account::{Account, AccountId, Amount, Money, Phone};
use crate::domain::favorite::{Favorite, FavoriteId};
use crate::domain::payment::{Category, Payment, PaymentId};
use crate::domain::ports::{HistorySink, SnapshotStore};
use crate::error::{LedgerError, Result};
use crate::infrastructure::in_memory::InMemoryLedger;
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, info};

/// The wallet ledger: the single owner of accounts, payments and favorites.
///
/// Every command takes the write lock for its whole duration, so a payment's
/// status change and the matching balance change are never observed apart.
/// Read operations copy what they need under the read lock and release it
/// before any worker starts, so a scan never sees a command half applied.
///
/// Cloning is cheap and shares the same ledger.
#[derive(Clone, Default)]
pub struct Ledger {
    state: Arc<RwLock<InMemoryLedger>>,
    config: LedgerConfig,
}

impl Ledger {
    /// Creates an empty ledger with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            state: Arc::default(),
            config,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Registers a new account with a zero balance.
    pub async fn register_account(&self, phone: Phone) -> Result<Account> {
        let mut state = self.state.write().await;
        let account = state.insert_account(phone)?.clone();
        debug!(account = %account.id, phone = %account.phone, "account registered");
        Ok(account)
    }

    pub async fn find_account_by_id(&self, account_id: AccountId) -> Result<Account> {
        let state = self.state.read().await;
        state.account(account_id).cloned()
    }

    pub async fn deposit(&self, account_id: AccountId, amount: Money) -> Result<()> {
        let amount = Amount::new(amount)?;
        let mut state = self.state.write().await;
        state.account_mut(account_id)?.deposit(amount)?;
        debug!(account = %account_id, amount = %amount.money(), "deposit");
        Ok(())
    }

    /// Debits the account and records an in-progress payment.
    pub async fn pay(
        &self,
        account_id: AccountId,
        amount: Money,
        category: Category,
    ) -> Result<Payment> {
        let mut state = self.state.write().await;
        pay_locked(&mut state, account_id, amount, category)
    }

    pub async fn find_payment_by_id(&self, payment_id: PaymentId) -> Result<Payment> {
        let state = self.state.read().await;
        state.payment(payment_id).cloned()
    }

    /// Fails the payment and refunds its amount to the owning account.
    ///
    /// Nothing changes unless both the status change and the refund succeed.
    pub async fn reject(&self, payment_id: PaymentId) -> Result<()> {
        let mut state = self.state.write().await;
        let (payment, account) = state.payment_with_account_mut(payment_id)?;
        let mut rejected = payment.clone();
        let refund = rejected.reject()?;
        account.refund(refund)?;
        *payment = rejected;
        debug!(payment = %payment_id, account = %account.id, refund = %refund, "payment rejected");
        Ok(())
    }

    /// Creates a new payment with the same account, amount and category.
    pub async fn repeat(&self, payment_id: PaymentId) -> Result<Payment> {
        let mut state = self.state.write().await;
        let original = state.payment(payment_id)?;
        let (account_id, amount, category) =
            (original.account_id, original.amount, original.category.clone());
        pay_locked(&mut state, account_id, amount, category)
    }

    pub async fn favorite_payment(
        &self,
        payment_id: PaymentId,
        name: impl Into<String>,
    ) -> Result<Favorite> {
        let mut state = self.state.write().await;
        let favorite = Favorite::from_payment(state.payment(payment_id)?, name);
        debug!(favorite = %favorite.id, payment = %payment_id, "favorite saved");
        Ok(state.insert_favorite(favorite).clone())
    }

    pub async fn find_favorite_by_id(&self, favorite_id: FavoriteId) -> Result<Favorite> {
        let state = self.state.read().await;
        state.favorite(favorite_id).cloned()
    }

    pub async fn pay_from_favorite(&self, favorite_id: FavoriteId) -> Result<Payment> {
        let mut state = self.state.write().await;
        let favorite = state.favorite(favorite_id)?;
        let (account_id, amount, category) =
            (favorite.account_id, favorite.amount, favorite.category.clone());
        pay_locked(&mut state, account_id, amount, category)
    }

    /// Copies of every payment owned by `account_id`, in insertion order.
    pub async fn export_account_history(&self, account_id: AccountId) -> Result<Vec<Payment>> {
        let state = self.state.read().await;
        state.account(account_id)?;
        Ok(state
            .payments()
            .iter()
            .filter(|payment| payment.account_id == account_id)
            .cloned()
            .collect())
    }

    /// Writes the account's history to `sink`, returning the number of files.
    pub async fn write_account_history(
        &self,
        account_id: AccountId,
        sink: &dyn HistorySink,
    ) -> Result<usize> {
        let history = self.export_account_history(account_id).await?;
        let files = sink.write_history(&history).await?;
        info!(account = %account_id, payments = history.len(), files, "history exported");
        Ok(files)
    }

    pub async fn accounts(&self) -> Vec<Account> {
        self.state.read().await.accounts().to_vec()
    }

    pub async fn payments(&self) -> Vec<Payment> {
        self.state.read().await.payments().to_vec()
    }

    pub async fn favorites(&self) -> Vec<Favorite> {
        self.state.read().await.favorites().to_vec()
    }

    /// An immutable copy of the payment collection, shared by aggregation workers.
    pub async fn payments_snapshot(&self) -> Arc<[Payment]> {
        Arc::from(self.state.read().await.payments())
    }

    /// Total amount of every payment. `workers` is the chunk size; `0` or `1`
    /// sums on a single worker.
    pub async fn sum_payments(&self, workers: usize) -> Result<Money> {
        let snapshot = self.payments_snapshot().await;
        FanOutAggregator::new(SumReducer)
            .run(snapshot, workers)
            .await?
            .into_result()
    }

    /// Payments owned by `account_id`.
    ///
    /// Fails with `AccountNotFound` both when the account is unknown and when
    /// it has no payments.
    pub async fn filter_payments(
        &self,
        account_id: AccountId,
        workers: usize,
    ) -> Result<Vec<Payment>> {
        self.find_account_by_id(account_id).await?;

        let snapshot = self.payments_snapshot().await;
        let filtered =
            FanOutAggregator::new(FilterReducer::new(move |p: &Payment| {
                p.account_id == account_id
            }))
            .run(snapshot, workers)
            .await?;

        if filtered.is_empty() {
            return Err(LedgerError::AccountNotFound);
        }
        Ok(filtered)
    }

    /// Payments matching `predicate`. An empty result is not an error.
    pub async fn filter_payments_by_fn<F>(&self, predicate: F, workers: usize) -> Result<Vec<Payment>>
    where
        F: Fn(&Payment) -> bool + Send + Sync + 'static,
    {
        let snapshot = self.payments_snapshot().await;
        FanOutAggregator::new(FilterReducer::new(predicate))
            .run(snapshot, workers)
            .await
    }

    /// Streams one partial sum per worker, chunked by
    /// [`LedgerConfig::progress_chunk_size`].
    pub async fn sum_payments_with_progress(&self) -> mpsc::Receiver<Progress> {
        let snapshot = self.payments_snapshot().await;
        progress::sum_with_progress(snapshot, self.config.progress_chunk_size)
    }

    pub async fn export(&self, store: &dyn SnapshotStore) -> Result<()> {
        let snapshot = self.state.read().await.snapshot();
        store.save(&snapshot).await?;
        info!(
            accounts = snapshot.accounts.len(),
            payments = snapshot.payments.len(),
            favorites = snapshot.favorites.len(),
            "snapshot exported"
        );
        Ok(())
    }

    /// Merges a stored snapshot into the ledger, skipping known identifiers.
    /// Returns the number of records added.
    pub async fn import(&self, store: &dyn SnapshotStore) -> Result<usize> {
        let snapshot = store.load().await?;
        let added = self.state.write().await.merge(snapshot);
        info!(added, "snapshot imported");
        Ok(added)
    }
}

fn pay_locked(
    state: &mut InMemoryLedger,
    account_id: AccountId,
    amount: Money,
    category: Category,
) -> Result<Payment> {
    let amount = Amount::new(amount)?;
    state.account_mut(account_id)?.withdraw(amount)?;

    let payment = state
        .insert_payment(Payment::new(account_id, amount.money(), category))
        .clone();
    debug!(
        payment = %payment.id,
        account = %account_id,
        amount = %payment.amount,
        category = %payment.category,
        "payment created"
    );
    Ok(payment)
}
