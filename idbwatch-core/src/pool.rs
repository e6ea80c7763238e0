//! Bounded-concurrency worker pool for record lookups
//!
//! Fans a fixed number of workers out over the full target list and collects
//! exactly one record per target, in target order. `output[i]` is always the
//! record for `targets[i]`, no matter which worker handled it or in what
//! order workers finished.
//!
//! The pool pre-allocates one output slot per target and scatters completed
//! lookups back into their slots after every worker has exited. Slot
//! pre-allocation is a correctness invariant, not an optimization: two runs
//! over the same target list with different concurrency settings or network
//! latencies must produce identical slot ordering.
//!
//! # Example
//!
//! ```no_run
//! use idbwatch_core::client::InternetDbClient;
//! use idbwatch_core::pool;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(InternetDbClient::new()?);
//! let targets = vec!["1.1.1.1".to_string(), "8.8.8.8".to_string()];
//! let records = pool::run(targets, 5, client).await;
//! assert_eq!(records.len(), 2);
//! # Ok(())
//! # }
//! ```

use crate::client::Fetcher;
use crate::types::HostRecord;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Default number of concurrent lookups
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Resolves every target to a record with at most `concurrency` lookups in
/// flight.
///
/// The returned vector has exactly `targets.len()` elements; slot `i` holds
/// the record for `targets[i]`, which is the sentinel when that lookup
/// failed. Concurrency is clamped to at least 1. The call returns only after
/// every dispatched lookup has completed; no partial results are exposed.
pub async fn run<F>(targets: Vec<String>, concurrency: usize, fetcher: Arc<F>) -> Vec<HostRecord>
where
    F: Fetcher + 'static,
{
    let total = targets.len();
    let workers = concurrency.max(1).min(total.max(1));
    let targets = Arc::new(targets);
    // Shared work queue: each worker claims the next unclaimed index until
    // the cursor passes the end. No index is dispatched twice or skipped.
    let cursor = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::with_capacity(workers);
    for _ in 0..workers {
        let targets = Arc::clone(&targets);
        let cursor = Arc::clone(&cursor);
        let fetcher = Arc::clone(&fetcher);

        handles.push(tokio::spawn(async move {
            let mut completed: Vec<(usize, HostRecord)> = Vec::new();
            loop {
                let index = cursor.fetch_add(1, Ordering::SeqCst);
                if index >= targets.len() {
                    break;
                }
                let record = fetcher.fetch(&targets[index]).await;
                completed.push((index, record));
            }
            completed
        }));
    }

    // Joining every worker is the completion barrier; the slots are not
    // assembled, let alone read, before all workers have drained the queue.
    let mut slots = vec![HostRecord::empty(); total];
    for handle in handles {
        if let Ok(completed) = handle.await {
            for (index, record) in completed {
                slots[index] = record;
            }
        }
    }

    slots
}

/// Filters sentinel records, preserving the relative order of survivors.
pub fn valid_records(records: Vec<HostRecord>) -> Vec<HostRecord> {
    records.into_iter().filter(|r| r.is_present()).collect()
}
