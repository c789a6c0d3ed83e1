//! Application layer: the ledger service and its concurrent read side.
//!
//! `Ledger` owns all ledger state behind a `tokio` lock. Sums and filters fan
//! out over an immutable payment snapshot, one task per chunk, and merge their
//! partials under a shared accumulator.

pub mod aggregator;
pub mod commands;
pub mod ledger;
pub mod progress;
