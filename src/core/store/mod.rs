//! The consolidated order-book store: `expiry -> ordered
//! sequence of StrikeBook`, guarded by one reader-writer lock.

use parking_lot::RwLock;
use std::collections::HashMap;

use tokio::sync::Notify;
use tracing::{debug, trace};

use crate::core::domain::{Order, Side, StrikeBook};

/// `expiry_unix_seconds -> ordered sequence of StrikeBook`, strictly
/// ascending by strike.
pub type Orderbooks = HashMap<i64, Vec<StrikeBook>>;

/// Thread-safe store wrapping [`Orderbooks`]. Adapters call
/// [`OrderbookStore::apply_update`] under a write lock; the scanner reads
/// under a read lock. [`OrderbookStore::notified`] lets the scanner wait
/// for the next applied update instead of polling.
pub struct OrderbookStore {
    inner: RwLock<Orderbooks>,
    notify: Notify,
}

impl OrderbookStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            notify: Notify::new(),
        }
    }

    /// Applies one venue's single-instrument snapshot to the store.
    ///
    /// `bids` and `asks` must share `strike`, `option_type`, and `venue`
    /// This is upheld by callers (the venue adapters), not re-validated
    /// here. An update is discarded only when *both* sides are empty, not
    /// either — a venue legitimately clearing one side of a book (no bids
    /// left, say) must still update the other.
    ///
    /// Returns `true` if the update was applied, `false` if discarded.
    pub fn apply_update(&self, expiry: i64, bids: Vec<Order>, asks: Vec<Order>) -> bool {
        if bids.is_empty() && asks.is_empty() {
            trace!(expiry, "discarding empty orderbook update");
            return false;
        }

        let sample = bids.first().or_else(|| asks.first()).expect("checked non-empty above");
        let strike = sample.strike();
        let option_type = sample.option_type();
        let venue = sample.venue().clone();

        let mut books = self.inner.write();
        let strikes = books.entry(expiry).or_default();

        let idx = strikes.iter().position(|b| b.strike() == strike);
        let book_idx = match idx {
            Some(i) => i,
            None => {
                strikes.push(StrikeBook::new(strike));
                strikes.sort_by(|a, b| a.strike().partial_cmp(&b.strike()).unwrap());
                strikes
                    .iter()
                    .position(|b| b.strike() == strike)
                    .expect("just inserted")
            }
        };

        let book = &mut strikes[book_idx];
        book.replace_ladder(option_type, Side::Bid, venue.clone(), bids);
        book.replace_ladder(option_type, Side::Ask, venue, asks);

        debug!(expiry, strike, ?option_type, "applied orderbook update");
        drop(books);
        self.notify.notify_waiters();
        true
    }

    /// Runs `f` with a read lock over the full store. Used by the scanner
    /// to traverse all expiries/strikes.
    pub fn with_read<R>(&self, f: impl FnOnce(&Orderbooks) -> R) -> R {
        f(&self.inner.read())
    }

    /// Resolves after the next applied (non-discarded) update. The
    /// scanner task awaits this instead of polling on a timer.
    pub async fn notified(&self) {
        self.notify.notified().await;
    }
}

impl Default for OrderbookStore {
    fn default() -> Self {
        Self::new()
    }
}
