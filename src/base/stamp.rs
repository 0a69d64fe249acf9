//! Process-wide modification counter.
//!
//! Stamps are plain integers that only ever grow. They are unrelated to wall
//! time, so two edits in the same millisecond still get distinct stamps.

use std::sync::atomic::{AtomicU64, Ordering};

static CURRENT: AtomicU64 = AtomicU64::new(0);

/// Returns a fresh stamp, strictly greater than every stamp returned before.
pub fn current_time() -> u64 {
    CURRENT.fetch_add(1, Ordering::SeqCst) + 1
}
