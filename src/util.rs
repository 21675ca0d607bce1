//! Small process-wide helpers that don't belong to any one module.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current unix time in seconds. Kept as a single call site so scanner
/// logic can otherwise take `now` as a plain parameter and stay testable.
#[must_use]
pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_secs() as i64
}
