//! aevo venue adapter: `https://api.aevo.xyz` for discovery,
//! `wss://ws.aevo.xyz` for streaming orderbook updates.

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
use crate::core::exchange::instrument::parse_aevo;
use crate::core::exchange::{DiscoveredInstrument, VenueAdapter};
use crate::core::store::OrderbookStore;
use crate::error::{Error, Result};

const HTTP_BASE: &str = "https://api.aevo.xyz";
const WSS_BASE: &str = "wss://ws.aevo.xyz";
const SUBSCRIBE_BATCH: usize = 20;
const SUBSCRIBE_SPACING_MS: u64 = 100;
const REFRESH_INTERVAL: Duration = Duration::from_secs(600);

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

pub struct AevoAdapter {
    http: reqwest::Client,
    http_base: String,
    ws_url: String,
}

impl AevoAdapter {
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

impl Default for AevoAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct SubscribeMessage<'a> {
    op: &'static str,
    data: &'a [String],
}

#[async_trait]
impl VenueAdapter for AevoAdapter {
    fn name(&self) -> &'static str {
        "aevo"
    }

    async fn discover(&self, asset: &str) -> Result<Vec<DiscoveredInstrument>> {
        let url = format!("{}/markets?asset={asset}&instrument_type=OPTION", self.http_base);
        let markets: Vec<Value> = self.http.get(url).send().await?.json().await?;

        let mut out = Vec::new();
        for market in markets {
            let is_active = market.get("is_active").and_then(Value::as_bool).unwrap_or(false);
            if !is_active {
                continue;
            }
            let Some(name) = market.get("instrument_name").and_then(Value::as_str) else {
                continue;
            };
            match parse_aevo(name) {
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
        info!(venue = "aevo", "websocket connected");

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
                                warn!(venue = "aevo", error = %e, raw = %text, "failed to handle frame");
                            }
                        }
                        Some(Ok(Message::Ping(payload))) => {
                            sink.lock().await.send(Message::Pong(payload)).await?;
                        }
                        Some(Ok(Message::Close(frame))) => {
                            info!(venue = "aevo", ?frame, "websocket closed by server");
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
                            info!(venue = "aevo", count = fresh.len(), "refreshing instrument subscription");
                            if let Err(e) = subscribe_batches(&sink, &fresh).await {
                                warn!(venue = "aevo", error = %e, "periodic resubscribe failed");
                            }
                        }
                        Err(e) => warn!(venue = "aevo", error = %e, "periodic re-discover failed"),
                    }
                }
            }
        }
        Ok(())
    }
}

async fn subscribe_batches(sink: &AsyncMutex<WsSink>, instruments: &[DiscoveredInstrument]) -> Result<()> {
    for batch in instruments.chunks(SUBSCRIBE_BATCH) {
        let channels: Vec<String> = batch.iter().map(|i| format!("orderbook:{}", i.name)).collect();
        let msg = SubscribeMessage {
            op: "subscribe",
            data: &channels,
        };
        sink.lock().await.send(Message::Text(serde_json::to_string(&msg)?)).await?;
        tokio::time::sleep(Duration::from_millis(SUBSCRIBE_SPACING_MS)).await;
    }
    Ok(())
}

fn handle_frame(text: &str, store: &OrderbookStore) -> Result<()> {
    let res: Value = serde_json::from_str(text)?;

    let Some(channel) = res.get("channel").and_then(Value::as_str) else {
        return Ok(());
    };
    if !channel.contains("orderbook") {
        return Ok(());
    }

    let data = res
        .get("data")
        .ok_or_else(|| Error::Connection { venue: "aevo", reason: "message missing 'data'".to_string() })?;

    let Some(name) = data.get("instrument_name").and_then(Value::as_str) else {
        return Ok(());
    };

    let parsed = parse_aevo(name)?;

    let empty = Vec::new();
    let bids_raw = data.get("bids").and_then(Value::as_array).unwrap_or(&empty);
    let asks_raw = data.get("asks").and_then(Value::as_array).unwrap_or(&empty);

    if bids_raw.is_empty() && asks_raw.is_empty() {
        debug!(instrument = name, "no bids and asks, discarding");
        return Ok(());
    }

    let venue = crate::core::domain::VenueId::from("aevo");
    let bids = parse_rows(WireShape::Aevo, &venue, parsed.strike, parsed.option_type, bids_raw)?;
    let asks = parse_rows(WireShape::Aevo, &venue, parsed.strike, parsed.option_type, asks_raw)?;

    store.apply_update(parsed.expiry, bids, asks);
    Ok(())
}
