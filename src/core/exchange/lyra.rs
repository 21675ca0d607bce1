//! lyra venue adapter: `https://api.lyra.finance` for discovery,
//! `wss://api.lyra.finance/ws` for streaming orderbook updates.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::Mutex as AsyncMutex;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use crate::core::domain::parser::{parse_rows, WireShape};
use crate::core::exchange::instrument::parse_lyra;
use crate::core::exchange::{DiscoveredInstrument, VenueAdapter};
use crate::core::store::OrderbookStore;
use crate::error::{Error, Result};

const HTTP_BASE: &str = "https://api.lyra.finance";
const WSS_BASE: &str = "wss://api.lyra.finance/ws";
const SUBSCRIBE_BATCH: usize = 20;
const SUBSCRIBE_SPACING_MS: u64 = 100;
const ORDERBOOK_DEPTH: &str = "10.10";
const REFRESH_INTERVAL: Duration = Duration::from_secs(600);

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

pub struct LyraAdapter {
    http: reqwest::Client,
    http_base: String,
    ws_url: String,
}

impl LyraAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::with_endpoints(HTTP_BASE.to_string(), WSS_BASE.to_string())
    }

    #[must_use]
    pub fn with_endpoints(http_base: String, ws_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            http_base,
            ws_url,
        }
    }
}

impl Default for LyraAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct SubscribeParams<'a> {
    channels: &'a [String],
}

#[derive(Serialize)]
struct SubscribeMessage<'a> {
    id: &'static str,
    method: &'static str,
    params: SubscribeParams<'a>,
}

#[async_trait]
impl VenueAdapter for LyraAdapter {
    fn name(&self) -> &'static str {
        "lyra"
    }

    async fn discover(&self, asset: &str) -> Result<Vec<DiscoveredInstrument>> {
        let body = serde_json::json!({
            "expired": false,
            "instrument_type": "option",
            "currency": asset,
        });
        let url = format!("{}/public/get_instruments", self.http_base);
        let res: Value = self.http.post(url).json(&body).send().await?.json().await?;

        let Some(result) = res.get("result").and_then(Value::as_array) else {
            warn!("lyra discovery response missing 'result' array");
            return Ok(Vec::new());
        };

        let mut out = Vec::new();
        for market in result {
            let Some(name) = market.get("instrument_name").and_then(Value::as_str) else {
                continue;
            };
            match parse_lyra(name) {
                Ok(parsed) => out.push(DiscoveredInstrument {
                    name: name.to_string(),
                    expiry: parsed.expiry,
                    strike: parsed.strike,
                    option_type: parsed.option_type,
                }),
                Err(e) => warn!(instrument = name, error = %e, "skipping unparseable instrument"),
            }
        }
        info!(asset, count = out.len(), "discovered active instruments");
        Ok(out)
    }

    async fn stream(&self, asset: &str, instruments: &[DiscoveredInstrument], store: &OrderbookStore) -> Result<()> {
        let (ws, _response) = connect_async(&self.ws_url).await?;
        info!(venue = "lyra", "websocket connected");

        let (sink, mut read) = ws.split();
        let sink = AsyncMutex::new(sink);

        subscribe_batches(&sink, instruments).await?;

        let mut refresh = tokio::time::interval(REFRESH_INTERVAL);
        refresh.tick().await; // first tick fires immediately, already subscribed above

        loop {
            tokio::select! {
                frame = read.next() => {
                    match frame {
                        Some(Ok(Message::Text(text))) => {
                            if let Err(e) = handle_frame(&text, store) {
                                warn!(venue = "lyra", error = %e, raw = %text, "failed to handle frame");
                            }
                        }
                        Some(Ok(Message::Ping(payload))) => {
                            sink.lock().await.send(Message::Pong(payload)).await?;
                        }
                        Some(Ok(Message::Close(frame))) => {
                            info!(venue = "lyra", ?frame, "websocket closed by server");
                            break;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => return Err(Error::WebSocket(e)),
                        None => break,
                    }
                }
                _ = refresh.tick() => {
                    match self.discover(asset).await {
                        Ok(fresh) => {
                            info!(venue = "lyra", count = fresh.len(), "refreshing instrument subscription");
                            if let Err(e) = subscribe_batches(&sink, &fresh).await {
                                warn!(venue = "lyra", error = %e, "periodic resubscribe failed");
                            }
                        }
                        Err(e) => warn!(venue = "lyra", error = %e, "periodic re-discover failed"),
                    }
                }
            }
        }
        Ok(())
    }
}

async fn subscribe_batches(sink: &AsyncMutex<WsSink>, instruments: &[DiscoveredInstrument]) -> Result<()> {
    for batch in instruments.chunks(SUBSCRIBE_BATCH) {
        let channels: Vec<String> = batch
            .iter()
            .map(|i| format!("orderbook.{}.{ORDERBOOK_DEPTH}", i.name))
            .collect();
        let msg = SubscribeMessage {
            id: "2",
            method: "subscribe",
            params: SubscribeParams { channels: &channels },
        };
        sink.lock().await.send(Message::Text(serde_json::to_string(&msg)?)).await?;
        tokio::time::sleep(Duration::from_millis(SUBSCRIBE_SPACING_MS)).await;
    }
    Ok(())
}

fn handle_frame(text: &str, store: &OrderbookStore) -> Result<()> {
    let res: Value = serde_json::from_str(text)?;

    let Some(params) = res.get("params") else {
        return Ok(());
    };
    let Some(channel) = params.get("channel").and_then(Value::as_str) else {
        return Ok(());
    };
    if !channel.starts_with("orderbook.") {
        return Ok(());
    }

    let data = params
        .get("data")
        .ok_or_else(|| Error::Connection { venue: "lyra", reason: "message missing 'data'".to_string() })?;

    let Some(name) = data.get("instrument_name").and_then(Value::as_str) else {
        return Ok(());
    };

    let parsed = parse_lyra(name)?;

    let empty = Vec::new();
    let bids_raw = data.get("bids").and_then(Value::as_array).unwrap_or(&empty);
    let asks_raw = data.get("asks").and_then(Value::as_array).unwrap_or(&empty);

    if bids_raw.is_empty() && asks_raw.is_empty() {
        debug!(instrument = name, "no bids and asks, discarding");
        return Ok(());
    }

    let venue = crate::core::domain::VenueId::from("lyra");
    let bids = parse_rows(WireShape::Lyra, &venue, parsed.strike, parsed.option_type, bids_raw)?;
    let asks = parse_rows(WireShape::Lyra, &venue, parsed.strike, parsed.option_type, asks_raw)?;

    store.apply_update(parsed.expiry, bids, asks);
    Ok(())
}
