//! Core domain types for the box-spread scanner.
//!
//! - [`Order`] / [`Ladder`] / [`Side`] — one ladder level and ladder
//!   direction.
//! - [`StrikeBook`] — per-strike, per-venue ladders for both legs.
//! - [`BoxKey`] / [`BoxSpread`] / [`SelectedLeg`] — a detected box spread.
//! - [`OptionType`] / [`VenueId`] — identifiers.
//! - `parser` — normalizes wire rows into [`Order`]s.

pub mod box_spread;
pub mod id;
pub mod order;
pub mod parser;
pub mod strike_book;

pub use box_spread::{BoxKey, BoxSpread, SelectedLeg};
pub use id::{OptionType, VenueId};
pub use order::{sort_asks, sort_bids, Ladder, Order, Side};
pub use strike_book::StrikeBook;
