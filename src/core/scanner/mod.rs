//! The box scanner: on each order-book mutation, re-evaluate every
//! strike pair within an expiry for a profitable box spread.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::debug;

use crate::core::domain::{BoxKey, BoxSpread, Ladder, SelectedLeg, VenueId};
use crate::core::store::{Orderbooks, OrderbookStore};

/// `Boxes`: `BoxKey -> BoxSpread`, guarded by its own mutex, independent
/// from the `Orderbooks` lock. Lock order is mandatory:
/// a caller holding the `Orderbooks` lock may take this one; never the
/// reverse.
pub struct BoxStore {
    inner: Mutex<HashMap<BoxKey, BoxSpread>>,
}

impl BoxStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// A ranked-by-nothing snapshot of every currently retained box. The
    /// read API is responsible for ranking.
    #[must_use]
    pub fn snapshot(&self) -> Vec<BoxSpread> {
        self.inner.lock().values().cloned().collect()
    }

    fn upsert(&self, b: BoxSpread) {
        self.inner.lock().insert(b.key(), b);
    }

    fn remove(&self, key: BoxKey) {
        self.inner.lock().remove(&key);
    }
}

impl Default for BoxStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Picks the best bid leg across venues: maximum top-of-book price, first
/// venue encountered on ties.
fn best_bid(map: &HashMap<VenueId, Ladder>) -> Option<SelectedLeg> {
    let mut best: Option<(&VenueId, &crate::core::domain::Order)> = None;
    for (venue, ladder) in map {
        let Some(top) = ladder.first() else { continue };
        best = match best {
            None => Some((venue, top)),
            Some((_, cur)) if top.price() > cur.price() => Some((venue, top)),
            Some(existing) => Some(existing),
        };
    }
    best.map(|(v, o)| SelectedLeg::new(v.clone(), o.price(), o.amount()))
}

/// Picks the best ask leg across venues: minimum top-of-book price, first
/// venue encountered on ties.
fn best_ask(map: &HashMap<VenueId, Ladder>) -> Option<SelectedLeg> {
    let mut best: Option<(&VenueId, &crate::core::domain::Order)> = None;
    for (venue, ladder) in map {
        let Some(top) = ladder.first() else { continue };
        best = match best {
            None => Some((venue, top)),
            Some((_, cur)) if top.price() < cur.price() => Some((venue, top)),
            Some(existing) => Some(existing),
        };
    }
    best.map(|(v, o)| SelectedLeg::new(v.clone(), o.price(), o.amount()))
}

/// Days remaining to expiry, ceiling-rounded:
/// `ceil((expiry - now + 1) / 86400)`.
fn days_to_expiry(expiry: i64, now: i64) -> i64 {
    let numerator = expiry - now + 1;
    numerator.div_euclid(86400) + i64::from(numerator.rem_euclid(86400) != 0)
}

/// One evaluated candidate: either a retained box or a reason it was
/// rejected. Exposed mainly for tests that want to assert *why* a pair
/// didn't produce a box.
#[derive(Debug, PartialEq)]
pub enum Candidate {
    Box(BoxKey),
    MissingLeg,
    Unprofitable,
    Expired,
}

fn evaluate_pair(k1_book: &crate::core::domain::StrikeBook, k2_book: &crate::core::domain::StrikeBook, expiry: i64, now: i64) -> Result<BoxSpread, Candidate> {
    let short_call_bid = best_bid(k2_book.call_bids()).ok_or(Candidate::MissingLeg)?;
    let long_call_ask = best_ask(k1_book.call_asks()).ok_or(Candidate::MissingLeg)?;
    let short_put_bid = best_bid(k1_book.put_bids()).ok_or(Candidate::MissingLeg)?;
    let long_put_ask = best_ask(k2_book.put_asks()).ok_or(Candidate::MissingLeg)?;

    let k1 = k1_book.strike();
    let k2 = k2_book.strike();
    let payoff = k2 - k1;
    let cost = long_call_ask.price() - short_call_bid.price() + long_put_ask.price()
        - short_put_bid.price();
    let profit = payoff - cost;

    if profit <= 0.0 {
        return Err(Candidate::Unprofitable);
    }

    let days = days_to_expiry(expiry, now);
    if days <= 0 {
        return Err(Candidate::Expired);
    }

    let amount = [
        short_call_bid.amount(),
        long_call_ask.amount(),
        short_put_bid.amount(),
        long_put_ask.amount(),
    ]
    .into_iter()
    .fold(f64::INFINITY, f64::min);

    let rel_profit = profit / cost;
    let apy = (1.0 + rel_profit).powf(365.0 / days as f64);

    Ok(BoxSpread::new(
        BoxKey::new(expiry, k1, k2),
        short_call_bid,
        long_call_ask,
        short_put_bid,
        long_put_ask,
        payoff,
        cost,
        amount,
        profit,
        rel_profit,
        apy,
    ))
}

/// Re-evaluates every strike pair for one expiry and upserts/removes the
/// corresponding `Boxes` entries. Stale entries are removed rather than
/// left to go unprofitable silently — see DESIGN.md.
pub fn recompute_expiry(books: &Orderbooks, boxes: &BoxStore, expiry: i64, now: i64) {
    let Some(strikes) = books.get(&expiry) else {
        return;
    };
    if strikes.len() < 2 {
        return;
    }

    for i in 0..strikes.len() {
        for j in (i + 1)..strikes.len() {
            let key = BoxKey::new(expiry, strikes[i].strike(), strikes[j].strike());
            match evaluate_pair(&strikes[i], &strikes[j], expiry, now) {
                Ok(b) => {
                    debug!(expiry, k1 = key.k1(), k2 = key.k2(), profit = b.profit(), "box retained");
                    boxes.upsert(b);
                }
                Err(_) => {
                    boxes.remove(key);
                }
            }
        }
    }
}

/// Re-evaluates every expiry, rather than scoping to the single mutated
/// one — simpler, and cheap enough at this scale.
pub fn recompute_all(store: &OrderbookStore, boxes: &BoxStore, now: i64) {
    store.with_read(|books| {
        for &expiry in books.keys() {
            recompute_expiry(books, boxes, expiry, now);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{OptionType, Order};
    use crate::core::store::OrderbookStore;

    const NOW: i64 = 1_700_000_000;
    const EXPIRY: i64 = NOW + 7 * 86_400;

    fn order(price: f64, amount: f64, strike: f64, ot: OptionType) -> Order {
        Order::new(price, amount, 0.5, strike, ot, VenueId::from("aevo"))
    }

    fn seed_scenario_1(store: &OrderbookStore) {
        store.apply_update(
            EXPIRY,
            vec![order(50.0, 1.0, 3000.0, OptionType::Call)],
            vec![order(60.0, 1.0, 3000.0, OptionType::Call)],
        );
        store.apply_update(
            EXPIRY,
            vec![order(40.0, 1.0, 3000.0, OptionType::Put)],
            vec![order(45.0, 1.0, 3000.0, OptionType::Put)],
        );
        store.apply_update(
            EXPIRY,
            vec![order(10.0, 1.0, 3200.0, OptionType::Call)],
            vec![order(15.0, 1.0, 3200.0, OptionType::Call)],
        );
        store.apply_update(
            EXPIRY,
            vec![order(180.0, 1.0, 3200.0, OptionType::Put)],
            vec![order(185.0, 1.0, 3200.0, OptionType::Put)],
        );
    }

    #[test]
    fn scenario_1_minimal_profitable_box() {
        let store = OrderbookStore::new();
        seed_scenario_1(&store);
        let boxes = BoxStore::new();
        recompute_all(&store, &boxes, NOW);

        let snap = boxes.snapshot();
        assert_eq!(snap.len(), 1);
        let b = &snap[0];
        assert_eq!(b.key().k1(), 3000.0);
        assert_eq!(b.key().k2(), 3200.0);
        assert_eq!(b.cost(), 195.0);
        assert_eq!(b.payoff(), 200.0);
        assert_eq!(b.profit(), 5.0);
        assert!((b.rel_profit() - 5.0 / 195.0).abs() < 1e-12);
        assert_eq!(b.amount(), 1.0);
    }

    #[test]
    fn scenario_2_unprofitable_box_rejected() {
        let store = OrderbookStore::new();
        store.apply_update(
            EXPIRY,
            vec![order(50.0, 1.0, 3000.0, OptionType::Call)],
            vec![order(70.0, 1.0, 3000.0, OptionType::Call)],
        );
        store.apply_update(
            EXPIRY,
            vec![order(40.0, 1.0, 3000.0, OptionType::Put)],
            vec![order(45.0, 1.0, 3000.0, OptionType::Put)],
        );
        store.apply_update(
            EXPIRY,
            vec![order(10.0, 1.0, 3200.0, OptionType::Call)],
            vec![order(15.0, 1.0, 3200.0, OptionType::Call)],
        );
        store.apply_update(
            EXPIRY,
            vec![order(180.0, 1.0, 3200.0, OptionType::Put)],
            vec![order(200.0, 1.0, 3200.0, OptionType::Put)],
        );

        let boxes = BoxStore::new();
        recompute_all(&store, &boxes, NOW);
        assert!(boxes.snapshot().is_empty());
    }

    #[test]
    fn scenario_3_cross_venue_best_selection() {
        let store = OrderbookStore::new();
        seed_scenario_1(&store);
        // lyra quotes a cheaper call ask at 3000
        store.apply_update(
            EXPIRY,
            vec![],
            vec![Order::new(20.0, 1.0, 0.5, 3000.0, OptionType::Call, VenueId::from("lyra"))],
        );

        let boxes = BoxStore::new();
        recompute_all(&store, &boxes, NOW);

        let snap = boxes.snapshot();
        assert_eq!(snap.len(), 1);
        let b = &snap[0];
        assert_eq!(b.long_call_ask().venue().as_str(), "lyra");
        assert_eq!(b.cost(), 170.0);
        assert_eq!(b.profit(), 30.0);
    }

    #[test]
    fn single_strike_yields_no_boxes() {
        let store = OrderbookStore::new();
        store.apply_update(
            EXPIRY,
            vec![order(50.0, 1.0, 3000.0, OptionType::Call)],
            vec![order(60.0, 1.0, 3000.0, OptionType::Call)],
        );
        let boxes = BoxStore::new();
        recompute_all(&store, &boxes, NOW);
        assert!(boxes.snapshot().is_empty());
    }

    #[test]
    fn missing_leg_yields_no_box() {
        let store = OrderbookStore::new();
        store.apply_update(
            EXPIRY,
            vec![order(50.0, 1.0, 3000.0, OptionType::Call)],
            vec![order(60.0, 1.0, 3000.0, OptionType::Call)],
        );
        store.apply_update(
            EXPIRY,
            vec![order(10.0, 1.0, 3200.0, OptionType::Call)],
            vec![order(15.0, 1.0, 3200.0, OptionType::Call)],
        );
        // no put legs at all: box requires put legs too.
        let boxes = BoxStore::new();
        recompute_all(&store, &boxes, NOW);
        assert!(boxes.snapshot().is_empty());
    }

    #[test]
    fn profit_exactly_zero_is_not_inserted() {
        let store = OrderbookStore::new();
        store.apply_update(
            EXPIRY,
            vec![order(50.0, 1.0, 3000.0, OptionType::Call)],
            vec![order(60.0, 1.0, 3000.0, OptionType::Call)],
        );
        store.apply_update(
            EXPIRY,
            vec![order(40.0, 1.0, 3000.0, OptionType::Put)],
            vec![order(45.0, 1.0, 3000.0, OptionType::Put)],
        );
        store.apply_update(
            EXPIRY,
            vec![order(10.0, 1.0, 3200.0, OptionType::Call)],
            vec![order(15.0, 1.0, 3200.0, OptionType::Call)],
        );
        // payoff 200, cost must equal 200 exactly for profit == 0
        store.apply_update(
            EXPIRY,
            vec![order(180.0, 1.0, 3200.0, OptionType::Put)],
            vec![order(195.0, 1.0, 3200.0, OptionType::Put)],
        );

        let boxes = BoxStore::new();
        recompute_all(&store, &boxes, NOW);
        assert!(boxes.snapshot().is_empty());
    }

    #[test]
    fn expired_expiry_is_skipped() {
        let store = OrderbookStore::new();
        let expired = NOW - 86_400;
        store.apply_update(
            expired,
            vec![order(50.0, 1.0, 3000.0, OptionType::Call)],
            vec![order(60.0, 1.0, 3000.0, OptionType::Call)],
        );
        store.apply_update(
            expired,
            vec![order(40.0, 1.0, 3000.0, OptionType::Put)],
            vec![order(45.0, 1.0, 3000.0, OptionType::Put)],
        );
        store.apply_update(
            expired,
            vec![order(10.0, 1.0, 3200.0, OptionType::Call)],
            vec![order(15.0, 1.0, 3200.0, OptionType::Call)],
        );
        store.apply_update(
            expired,
            vec![order(180.0, 1.0, 3200.0, OptionType::Put)],
            vec![order(185.0, 1.0, 3200.0, OptionType::Put)],
        );

        let boxes = BoxStore::new();
        recompute_all(&store, &boxes, NOW);
        assert!(boxes.snapshot().is_empty());
    }

    #[test]
    fn stale_box_is_invalidated_once_unprofitable() {
        let store = OrderbookStore::new();
        seed_scenario_1(&store);
        let boxes = BoxStore::new();
        recompute_all(&store, &boxes, NOW);
        assert_eq!(boxes.snapshot().len(), 1);

        // widen the call spread at K1 so the box is no longer profitable
        store.apply_update(
            EXPIRY,
            vec![order(50.0, 1.0, 3000.0, OptionType::Call)],
            vec![order(70.0, 1.0, 3000.0, OptionType::Call)],
        );
        recompute_all(&store, &boxes, NOW);
        assert!(boxes.snapshot().is_empty());
    }
}
