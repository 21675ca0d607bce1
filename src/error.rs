use thiserror::Error;

use crate::core::domain::parser::ParseError;
use crate::core::exchange::instrument::InstrumentError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("order row parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("instrument id error: {0}")]
    Instrument(#[from] InstrumentError),

    #[error("{venue} connection failed: {reason}")]
    Connection { venue: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
