use crate::domain::account::Money;
use crate::domain::partition;
use crate::domain::payment::Payment;
use crate::error::{LedgerError, Result};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::debug;

/// Per-chunk work of a fan-out.
///
/// `reduce` runs inside a worker with no lock held. `merge` folds one partial
/// into the shared accumulator and is the only step done under the lock.
pub trait ChunkReducer: Send + Sync + 'static {
    type Partial: Send + 'static;
    type Output: Default + Send + 'static;

    fn reduce(&self, chunk: &[Payment]) -> Self::Partial;
    fn merge(&self, accumulator: &mut Self::Output, partial: Self::Partial);
}

/// Running total of a fan-out sum. Empty once any addition overflowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SumTotal(Option<Money>);

impl Default for SumTotal {
    fn default() -> Self {
        Self(Some(Money::ZERO))
    }
}

impl SumTotal {
    pub fn into_result(self) -> Result<Money> {
        self.0.ok_or(LedgerError::AmountOverflow)
    }
}

/// Adds up payment amounts. A chunk whose sum leaves `i64` yields `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumReducer;

impl ChunkReducer for SumReducer {
    type Partial = Option<Money>;
    type Output = SumTotal;

    fn reduce(&self, chunk: &[Payment]) -> Option<Money> {
        Money::checked_sum(chunk.iter().map(|payment| payment.amount)).ok()
    }

    fn merge(&self, accumulator: &mut SumTotal, partial: Option<Money>) {
        accumulator.0 = accumulator
            .0
            .zip(partial)
            .and_then(|(total, partial)| total.checked_add(partial).ok());
    }
}

/// Keeps the payments matching a predicate.
pub struct FilterReducer<F> {
    predicate: F,
}

impl<F> FilterReducer<F>
where
    F: Fn(&Payment) -> bool + Send + Sync + 'static,
{
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<F> ChunkReducer for FilterReducer<F>
where
    F: Fn(&Payment) -> bool + Send + Sync + 'static,
{
    type Partial = Vec<Payment>;
    type Output = Vec<Payment>;

    fn reduce(&self, chunk: &[Payment]) -> Vec<Payment> {
        chunk
            .iter()
            .filter(|payment| (self.predicate)(payment))
            .cloned()
            .collect()
    }

    fn merge(&self, accumulator: &mut Vec<Payment>, partial: Vec<Payment>) {
        accumulator.extend(partial);
    }
}

/// Runs a [`ChunkReducer`] over a payment snapshot, one worker task per chunk.
///
/// Partials are merged in the order workers finish, so a filtered result is
/// only in snapshot order when there is a single chunk.
pub struct FanOutAggregator<R> {
    reducer: Arc<R>,
}

impl<R: ChunkReducer> FanOutAggregator<R> {
    pub fn new(reducer: R) -> Self {
        Self {
            reducer: Arc::new(reducer),
        }
    }

    /// Partitions `snapshot` with `chunk_size` (see [`partition::plan`]) and
    /// waits for every worker to merge its partial before returning.
    pub async fn run(&self, snapshot: Arc<[Payment]>, chunk_size: usize) -> Result<R::Output> {
        let chunks = partition::plan(snapshot.len(), chunk_size);
        debug!(
            payments = snapshot.len(),
            chunk_size,
            workers = chunks.len(),
            "fanning out aggregation"
        );

        let accumulator = Arc::new(Mutex::new(R::Output::default()));
        let mut workers = JoinSet::new();

        for range in chunks {
            let snapshot = Arc::clone(&snapshot);
            let reducer = Arc::clone(&self.reducer);
            let accumulator = Arc::clone(&accumulator);

            workers.spawn(async move {
                let partial = reducer.reduce(&snapshot[range]);
                let mut merged = accumulator.lock().await;
                reducer.merge(&mut merged, partial);
            });
        }

        while let Some(joined) = workers.join_next().await {
            joined?;
        }

        let mut merged = accumulator.lock().await;
        Ok(std::mem::take(&mut *merged))
    }
}
