//! Handler for the scanner's single entry point.

use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

use crate::app::{App, Config};
use crate::cli::Cli;
use crate::error::{Error, Result};

fn map_app_result(result: std::result::Result<Result<()>, tokio::task::JoinError>) -> Result<()> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            error!(error = %e, "application exited with error");
            Err(e)
        }
        Err(e) => {
            error!(error = %e, "application task join failed");
            Err(Error::Connection { venue: "app", reason: e.to_string() })
        }
    }
}

/// Loads configuration, applies CLI overrides, and runs the scanner until
/// `Ctrl+C`.
pub async fn execute(cli: &Cli) -> Result<()> {
    let mut config = Config::load(&cli.config)?;

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.json_logs {
        config.logging.format = "json".to_string();
    }

    config.logging.init();

    info!(
        underlying = %config.asset.underlying,
        bind_addr = %config.server.bind_addr,
        "box-scanner starting"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut app_handle = tokio::spawn(App::run_with_shutdown(config, shutdown_rx));

    tokio::select! {
        result = &mut app_handle => {
            map_app_result(result)?;
            info!("box-scanner stopped");
            return Ok(());
        }
        _ = signal::ctrl_c() => {
            info!("shutdown signal received (Ctrl+C)");
            let _ = shutdown_tx.send(true);
        }
    }

    map_app_result(app_handle.await)?;
    info!("box-scanner stopped");
    Ok(())
}
