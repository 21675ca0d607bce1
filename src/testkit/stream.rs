//! [`ScriptedVenue`]: a [`VenueAdapter`] that plays back a fixed sequence
//! of decoded orderbook updates instead of opening a real websocket.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::domain::Order;
use crate::core::exchange::{DiscoveredInstrument, VenueAdapter};
use crate::core::store::OrderbookStore;
use crate::error::Result;

/// One scripted `apply_update` call.
pub struct ScriptedUpdate {
    pub expiry: i64,
    pub bids: Vec<Order>,
    pub asks: Vec<Order>,
}

/// Replays `discover_result` then `updates`, in order, into whatever
/// store the orchestrator hands it. `stream()` returns once the script is
/// exhausted, exactly like a real venue's connection dropping.
pub struct ScriptedVenue {
    name: &'static str,
    discover_result: Vec<DiscoveredInstrument>,
    updates: Mutex<Vec<ScriptedUpdate>>,
}

impl ScriptedVenue {
    #[must_use]
    pub fn new(
        name: &'static str,
        discover_result: Vec<DiscoveredInstrument>,
        updates: Vec<ScriptedUpdate>,
    ) -> Self {
        Self {
            name,
            discover_result,
            updates: Mutex::new(updates),
        }
    }
}

#[async_trait]
impl VenueAdapter for ScriptedVenue {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn discover(&self, _asset: &str) -> Result<Vec<DiscoveredInstrument>> {
        Ok(self.discover_result.clone())
    }

    async fn stream(&self, _asset: &str, _instruments: &[DiscoveredInstrument], store: &OrderbookStore) -> Result<()> {
        let script = std::mem::take(&mut *self.updates.lock().unwrap());
        for update in script {
            store.apply_update(update.expiry, update.bids, update.asks);
        }
        Ok(())
    }
}
