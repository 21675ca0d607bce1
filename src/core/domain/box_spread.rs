//! [`BoxKey`] / [`BoxSpread`]: the best currently-observable box at a given
//! `(expiry, K1, K2)`. Named `BoxSpread` rather than `Box` to
//! avoid shadowing `std::boxed::Box`.

use std::hash::{Hash, Hasher};

use super::id::VenueId;

/// Key into the `Boxes` map. `k1 < k2` is an invariant enforced by
/// [`BoxKey::new`], not re-checked on every access.
#[derive(Debug, Clone, Copy)]
pub struct BoxKey {
    expiry: i64,
    k1: f64,
    k2: f64,
}

impl BoxKey {
    /// Builds a key, ordering the two strikes so `k1 < k2` always holds.
    #[must_use]
    pub fn new(expiry: i64, strike_a: f64, strike_b: f64) -> Self {
        let (k1, k2) = if strike_a < strike_b {
            (strike_a, strike_b)
        } else {
            (strike_b, strike_a)
        };
        Self { expiry, k1, k2 }
    }

    #[must_use]
    pub const fn expiry(&self) -> i64 {
        self.expiry
    }

    #[must_use]
    pub const fn k1(&self) -> f64 {
        self.k1
    }

    #[must_use]
    pub const fn k2(&self) -> f64 {
        self.k2
    }
}

impl PartialEq for BoxKey {
    fn eq(&self, other: &Self) -> bool {
        self.expiry == other.expiry && self.k1.to_bits() == other.k1.to_bits()
            && self.k2.to_bits() == other.k2.to_bits()
    }
}

impl Eq for BoxKey {}

impl Hash for BoxKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.expiry.hash(state);
        self.k1.to_bits().hash(state);
        self.k2.to_bits().hash(state);
    }
}

/// The venue/price/size chosen for one of the box's four legs.
#[derive(Debug, Clone)]
pub struct SelectedLeg {
    venue: VenueId,
    price: f64,
    amount: f64,
}

impl SelectedLeg {
    #[must_use]
    pub fn new(venue: VenueId, price: f64, amount: f64) -> Self {
        Self { venue, price, amount }
    }

    #[must_use]
    pub fn venue(&self) -> &VenueId {
        &self.venue
    }

    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.amount
    }
}

/// The best currently-observable box at a [`BoxKey`].
#[derive(Debug, Clone)]
pub struct BoxSpread {
    key: BoxKey,
    short_call_bid: SelectedLeg,
    long_call_ask: SelectedLeg,
    short_put_bid: SelectedLeg,
    long_put_ask: SelectedLeg,
    payoff: f64,
    cost: f64,
    amount: f64,
    profit: f64,
    rel_profit: f64,
    apy: f64,
}

impl BoxSpread {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        key: BoxKey,
        short_call_bid: SelectedLeg,
        long_call_ask: SelectedLeg,
        short_put_bid: SelectedLeg,
        long_put_ask: SelectedLeg,
        payoff: f64,
        cost: f64,
        amount: f64,
        profit: f64,
        rel_profit: f64,
        apy: f64,
    ) -> Self {
        Self {
            key,
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
        }
    }

    #[must_use]
    pub const fn key(&self) -> BoxKey {
        self.key
    }

    #[must_use]
    pub fn short_call_bid(&self) -> &SelectedLeg {
        &self.short_call_bid
    }

    #[must_use]
    pub fn long_call_ask(&self) -> &SelectedLeg {
        &self.long_call_ask
    }

    #[must_use]
    pub fn short_put_bid(&self) -> &SelectedLeg {
        &self.short_put_bid
    }

    #[must_use]
    pub fn long_put_ask(&self) -> &SelectedLeg {
        &self.long_put_ask
    }

    #[must_use]
    pub const fn payoff(&self) -> f64 {
        self.payoff
    }

    #[must_use]
    pub const fn cost(&self) -> f64 {
        self.cost
    }

    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.amount
    }

    #[must_use]
    pub const fn profit(&self) -> f64 {
        self.profit
    }

    #[must_use]
    pub const fn rel_profit(&self) -> f64 {
        self.rel_profit
    }

    #[must_use]
    pub const fn apy(&self) -> f64 {
        self.apy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_key_orders_strikes() {
        let key = BoxKey::new(1, 3200.0, 3000.0);
        assert_eq!(key.k1(), 3000.0);
        assert_eq!(key.k2(), 3200.0);
    }

    #[test]
    fn box_key_equality_ignores_construction_order() {
        let a = BoxKey::new(1, 3000.0, 3200.0);
        let b = BoxKey::new(1, 3200.0, 3000.0);
        assert_eq!(a, b);
    }

    #[test]
    fn box_key_usable_as_hashmap_key() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(BoxKey::new(1, 3000.0, 3200.0), "box");
        assert_eq!(map.get(&BoxKey::new(1, 3000.0, 3200.0)), Some(&"box"));
    }
}
