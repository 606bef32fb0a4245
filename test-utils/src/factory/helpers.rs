//! Shared helpers for factory modules.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counter backing unique names, emails and slugs across factories.
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Returns the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}
