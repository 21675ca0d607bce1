//! [`StrikeBook`]: the per-strike, per-venue, per-leg ladder set that makes
//! up one entry of an expiry's `Orderbooks` sequence.

use std::collections::HashMap;

use super::id::{OptionType, VenueId};
use super::order::{sort_asks, sort_bids, Ladder, Side};

/// All ladders observed at one strike, across every venue that quotes it.
#[derive(Debug, Clone)]
pub struct StrikeBook {
    strike: f64,
    call_bids: HashMap<VenueId, Ladder>,
    call_asks: HashMap<VenueId, Ladder>,
    put_bids: HashMap<VenueId, Ladder>,
    put_asks: HashMap<VenueId, Ladder>,
}

impl StrikeBook {
    #[must_use]
    pub fn new(strike: f64) -> Self {
        Self {
            strike,
            call_bids: HashMap::new(),
            call_asks: HashMap::new(),
            put_bids: HashMap::new(),
            put_asks: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn strike(&self) -> f64 {
        self.strike
    }

    #[must_use]
    pub fn call_bids(&self) -> &HashMap<VenueId, Ladder> {
        &self.call_bids
    }

    #[must_use]
    pub fn call_asks(&self) -> &HashMap<VenueId, Ladder> {
        &self.call_asks
    }

    #[must_use]
    pub fn put_bids(&self) -> &HashMap<VenueId, Ladder> {
        &self.put_bids
    }

    #[must_use]
    pub fn put_asks(&self) -> &HashMap<VenueId, Ladder> {
        &self.put_asks
    }

    /// Replaces the `(venue, side)` ladder for `option_type`, then
    /// re-sorts it so bids stay descending and asks ascending. This is a
    /// full-snapshot replace, not an incremental merge: a venue resends the
    /// whole ladder on every update.
    pub fn replace_ladder(
        &mut self,
        option_type: OptionType,
        side: Side,
        venue: VenueId,
        mut ladder: Ladder,
    ) {
        match side {
            Side::Bid => sort_bids(&mut ladder),
            Side::Ask => sort_asks(&mut ladder),
        }

        let map = match (option_type, side) {
            (OptionType::Call, Side::Bid) => &mut self.call_bids,
            (OptionType::Call, Side::Ask) => &mut self.call_asks,
            (OptionType::Put, Side::Bid) => &mut self.put_bids,
            (OptionType::Put, Side::Ask) => &mut self.put_asks,
        };
        map.insert(venue, ladder);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::order::Order;

    fn order(price: f64, venue: &str) -> Order {
        Order::new(price, 1.0, 0.5, 3000.0, OptionType::Call, VenueId::from(venue))
    }

    #[test]
    fn replace_ladder_sorts_bids_descending() {
        let mut book = StrikeBook::new(3000.0);
        book.replace_ladder(
            OptionType::Call,
            Side::Bid,
            VenueId::from("aevo"),
            vec![order(10.0, "aevo"), order(30.0, "aevo")],
        );
        let ladder = &book.call_bids()[&VenueId::from("aevo")];
        assert_eq!(ladder[0].price(), 30.0);
        assert_eq!(ladder[1].price(), 10.0);
    }

    #[test]
    fn replace_ladder_replaces_not_appends() {
        let mut book = StrikeBook::new(3000.0);
        let venue = VenueId::from("aevo");
        book.replace_ladder(
            OptionType::Call,
            Side::Bid,
            venue.clone(),
            vec![order(50.0, "aevo")],
        );
        book.replace_ladder(
            OptionType::Call,
            Side::Bid,
            venue.clone(),
            vec![order(55.0, "aevo")],
        );
        let ladder = &book.call_bids()[&venue];
        assert_eq!(ladder.len(), 1);
        assert_eq!(ladder[0].price(), 55.0);
    }

    #[test]
    fn legs_are_independent_per_venue() {
        let mut book = StrikeBook::new(3000.0);
        book.replace_ladder(
            OptionType::Call,
            Side::Ask,
            VenueId::from("aevo"),
            vec![order(60.0, "aevo")],
        );
        book.replace_ladder(
            OptionType::Call,
            Side::Ask,
            VenueId::from("lyra"),
            vec![order(58.0, "lyra")],
        );
        assert_eq!(book.call_asks().len(), 2);
    }
}
