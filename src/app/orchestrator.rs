//! Top-level application orchestration: wires venue adapters, the
//! scanner, and the HTTP read surface together, and drives graceful
//! shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::app::config::Config;
use crate::core::exchange::aevo::AevoAdapter;
use crate::core::exchange::backoff::Backoff;
use crate::core::exchange::lyra::LyraAdapter;
use crate::core::exchange::VenueAdapter;
use crate::core::scanner::{self, BoxStore};
use crate::core::store::OrderbookStore;
use crate::error::Result;

const BACKOFF_BASE: Duration = Duration::from_millis(500);
const BACKOFF_FACTOR: f64 = 2.0;
const BACKOFF_CAP: Duration = Duration::from_secs(30);

/// The running application: owns the shared stores and supervises every
/// background task until shutdown is signalled.
pub struct App;

impl App {
    /// Runs until `shutdown_rx` observes `true`.
    pub async fn run_with_shutdown(config: Config, mut shutdown_rx: watch::Receiver<bool>) -> Result<()> {
        let store = Arc::new(OrderbookStore::new());
        let boxes = Arc::new(BoxStore::new());

        let mut tasks = Vec::new();

        if config.exchanges.aevo {
            let adapter = AevoAdapter::with_endpoints(
                config.network.aevo.http_base.clone(),
                config.network.aevo.ws_url.clone(),
            );
            tasks.push(spawn_venue_task(
                Arc::new(adapter),
                config.asset.underlying.clone(),
                store.clone(),
                shutdown_rx.clone(),
            ));
        }
        if config.exchanges.lyra {
            let adapter = LyraAdapter::with_endpoints(
                config.network.lyra.http_base.clone(),
                config.network.lyra.ws_url.clone(),
            );
            tasks.push(spawn_venue_task(
                Arc::new(adapter),
                config.asset.underlying.clone(),
                store.clone(),
                shutdown_rx.clone(),
            ));
        }

        tasks.push(spawn_scanner_task(store.clone(), boxes.clone(), shutdown_rx.clone()));

        let bind_addr = config.server.bind_addr.clone();
        let http_boxes = boxes.clone();
        let http_task = tokio::spawn(async move { crate::http::serve(&bind_addr, http_boxes).await });

        shutdown_rx.changed().await.ok();
        info!("shutdown signal observed, waiting for tasks to wind down");

        for task in tasks {
            task.abort();
        }
        http_task.abort();

        Ok(())
    }
}

fn spawn_venue_task(
    adapter: Arc<dyn VenueAdapter>,
    asset: String,
    store: Arc<OrderbookStore>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let venue = adapter.name();
        let mut backoff = Backoff::new(BACKOFF_BASE, BACKOFF_FACTOR, BACKOFF_CAP);

        loop {
            if *shutdown_rx.borrow() {
                return;
            }

            let instruments = match adapter.discover(&asset).await {
                Ok(instruments) => instruments,
                Err(e) => {
                    error!(venue, error = %e, "instrument discovery failed");
                    tokio::select! {
                        () = tokio::time::sleep(backoff.next_delay()) => {}
                        _ = shutdown_rx.changed() => return,
                    }
                    continue;
                }
            };

            if instruments.is_empty() {
                warn!(venue, asset, "no active instruments discovered");
            }

            tokio::select! {
                result = adapter.stream(&asset, &instruments, &store) => {
                    let delay = match result {
                        Ok(()) => {
                            info!(venue, "stream ended cleanly, reconnecting");
                            backoff.reset();
                            backoff.next_delay()
                        }
                        Err(e) => {
                            error!(venue, error = %e, "stream ended with error, reconnecting");
                            backoff.next_delay()
                        }
                    };
                    tokio::select! {
                        () = tokio::time::sleep(delay) => {}
                        _ = shutdown_rx.changed() => return,
                    }
                }
                _ = shutdown_rx.changed() => return,
            }
        }
    })
}

fn spawn_scanner_task(
    store: Arc<OrderbookStore>,
    boxes: Arc<BoxStore>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                () = store.notified() => {
                    let now = crate::util::now_unix();
                    scanner::recompute_all(&store, &boxes, now);
                }
                _ = shutdown_rx.changed() => return,
            }
        }
    })
}
