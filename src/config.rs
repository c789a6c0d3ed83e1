/// Size of the payment chunks handed to progress-stream workers.
pub const DEFAULT_PROGRESS_CHUNK_SIZE: usize = 100_000;

/// Tunables for the read side of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Chunk size used by `sum_payments_with_progress`. Collections smaller than
    /// this are summed by a single worker.
    pub progress_chunk_size: usize,
    /// Chunk size used by `sum_payments` / `filter_*` when the caller has no
    /// preference. `0` and `1` mean a single worker.
    pub workers: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            progress_chunk_size: DEFAULT_PROGRESS_CHUNK_SIZE,
            workers: 0,
        }
    }
}

impl LedgerConfig {
    pub fn with_progress_chunk_size(mut self, size: usize) -> Self {
        // a zero chunk size would never make progress
        self.progress_chunk_size = size.max(1);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}
