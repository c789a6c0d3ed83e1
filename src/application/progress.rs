use super::aggregator::{ChunkReducer, SumReducer};
use crate::domain::account::Money;
use crate::domain::partition;
use crate::domain::payment::Payment;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Partial sum reported by one progress worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Number of payments in the worker's chunk.
    pub part: usize,
    /// Sum of the chunk's amounts, `None` when it does not fit in `i64`.
    pub result: Option<Money>,
}

/// Sums `snapshot` in chunks of `chunk_size`, pushing one [`Progress`] per
/// worker onto the returned channel.
///
/// A snapshot shorter than `chunk_size` is summed by exactly one worker, even
/// when empty. The channel closes only after every worker has sent its message.
/// It buffers one message: a worker can finish its send while the consumer is
/// not reading, and every later worker waits until that message is received.
///
/// Must be called from within a tokio runtime.
pub fn sum_with_progress(snapshot: Arc<[Payment]>, chunk_size: usize) -> mpsc::Receiver<Progress> {
    let (tx, rx) = mpsc::channel(1);

    let chunks = if snapshot.len() < chunk_size {
        vec![0..snapshot.len()]
    } else {
        partition::plan(snapshot.len(), chunk_size)
    };
    debug!(
        payments = snapshot.len(),
        chunk_size,
        workers = chunks.len(),
        "starting progress stream"
    );

    tokio::spawn(async move {
        let mut workers = JoinSet::new();

        for range in chunks {
            let tx = tx.clone();
            let snapshot = Arc::clone(&snapshot);

            workers.spawn(async move {
                let chunk = &snapshot[range];
                let progress = Progress {
                    part: chunk.len(),
                    result: SumReducer.reduce(chunk),
                };
                // the consumer hung up, nobody is left to report to
                let _ = tx.send(progress).await;
            });
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "progress worker failed");
            }
        }
        drop(tx);
    });

    rx
}
