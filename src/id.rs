//! Workout id generation.
//!
//! Ids are millisecond timestamps rendered as strings, bumped so that every id handed
//! out by this process is strictly greater than the previous one.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

static LAST_ID: AtomicU64 = AtomicU64::new(0);

pub fn next_id() -> String {
    let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    let prev = LAST_ID
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last.saturating_add(1)))
        })
        .unwrap_or_else(|last| last);
    now.max(prev.saturating_add(1)).to_string()
}

/// Make sure ids issued from now on sort after `id`.
///
/// Ids that are not plain integers are ignored.
pub fn observe(id: &str) {
    if let Ok(n) = id.parse::<u64>() {
        LAST_ID.fetch_max(n, Ordering::SeqCst);
    }
}
