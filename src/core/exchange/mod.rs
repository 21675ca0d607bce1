//! Exchange abstraction layer.
//!
//! ## Adding a new venue
//!
//! 1. Create a module under `exchange/<name>.rs`.
//! 2. Implement [`VenueAdapter`]: `discover()` lists tradable instruments
//!    for an asset, `stream()` drives a websocket subscription and feeds
//!    [`OrderbookStore::apply_update`] for each decoded message.
//! 3. Wire it into `app::orchestrator`'s venue list.

pub mod aevo;
pub mod backoff;
pub mod instrument;
pub mod lyra;

use async_trait::async_trait;

use crate::core::store::OrderbookStore;
use crate::error::Result;

/// One discovered, tradable instrument, as returned by a venue's HTTP
/// discovery endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredInstrument {
    pub name: String,
    pub expiry: i64,
    pub strike: f64,
    pub option_type: crate::core::domain::OptionType,
}

/// A venue integration: HTTP instrument discovery followed by a streaming
/// websocket subscription that keeps an [`OrderbookStore`] up to date.
///
/// Implementors are expected to run forever once `stream()` is called,
/// returning only on an unrecoverable error; the caller (the
/// orchestrator) is responsible for retrying with backoff.
#[async_trait]
pub trait VenueAdapter: Send + Sync {
    /// Short venue identifier used in logs and as the `VenueId` tag on
    /// every order this adapter produces.
    fn name(&self) -> &'static str;

    /// Lists active, tradable option instruments for `asset` (e.g. `"ETH"`).
    async fn discover(&self, asset: &str) -> Result<Vec<DiscoveredInstrument>>;

    /// Subscribes to `instruments` and streams orderbook updates into
    /// `store` until the connection ends or an error occurs.
    ///
    /// Implementations periodically re-run `discover(asset)` and
    /// re-subscribe over the same connection, so strikes and expiries
    /// listed after the initial subscription are picked up without
    /// waiting for a disconnect.
    async fn stream(
        &self,
        asset: &str,
        instruments: &[DiscoveredInstrument],
        store: &OrderbookStore,
    ) -> Result<()>;
}
