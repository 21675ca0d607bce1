//! The canonical [`Order`] type: one ladder level, normalized from a
//! venue-specific wire record.

use std::cmp::Ordering;

use super::id::{OptionType, VenueId};

/// One level of a bid or ask ladder. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    price: f64,
    amount: f64,
    /// Implied volatility as reported by the venue, or `-1.0` when the
    /// venue does not supply one.
    iv: f64,
    strike: f64,
    option_type: OptionType,
    venue: VenueId,
}

impl Order {
    #[must_use]
    pub fn new(
        price: f64,
        amount: f64,
        iv: f64,
        strike: f64,
        option_type: OptionType,
        venue: VenueId,
    ) -> Self {
        Self {
            price,
            amount,
            iv,
            strike,
            option_type,
            venue,
        }
    }

    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.amount
    }

    #[must_use]
    pub const fn iv(&self) -> f64 {
        self.iv
    }

    #[must_use]
    pub const fn strike(&self) -> f64 {
        self.strike
    }

    #[must_use]
    pub const fn option_type(&self) -> OptionType {
        self.option_type
    }

    #[must_use]
    pub fn venue(&self) -> &VenueId {
        &self.venue
    }
}

/// An ordered sequence of [`Order`] levels on one side of one venue's ladder.
pub type Ladder = Vec<Order>;

/// Which side of a ladder an [`Order`] sequence represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Bid,
    Ask,
}

/// Sorts a bid ladder in place: descending by price (best bid first).
pub fn sort_bids(ladder: &mut Ladder) {
    ladder.sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(Ordering::Equal));
}

/// Sorts an ask ladder in place: ascending by price (best ask first).
pub fn sort_asks(ladder: &mut Ladder) {
    ladder.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal));
}
