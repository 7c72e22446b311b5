use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::models::document::EntryId;

static LAST_ISSUED: AtomicU64 = AtomicU64::new(0);

/// Mints a time-based entry id (milliseconds since the epoch).
/// Ids are strictly increasing across the process even within one millisecond.
pub fn next_entry_id() -> EntryId {
    let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    let mut previous = LAST_ISSUED.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(previous + 1);
        match LAST_ISSUED.compare_exchange_weak(
            previous,
            candidate,
            Ordering::AcqRel,
            Ordering::Relaxed,
        ) {
            Ok(_) => return EntryId(candidate),
            Err(actual) => previous = actual,
        }
    }
}
