//! Application configuration loading and validation.
//!
//! Configuration is a single TOML file, loaded once at startup and
//! merged with CLI overrides before anything else runs.

use std::path::Path;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    pub underlying: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangesConfig {
    #[serde(default = "default_true")]
    pub aevo: bool,
    #[serde(default = "default_true")]
    pub lyra: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct VenueNetworkConfig {
    pub http_base: String,
    pub ws_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    pub aevo: VenueNetworkConfig,
    pub lyra: VenueNetworkConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initializes the global `tracing` subscriber from this config.
    /// Pretty output for interactive use, JSON for production/service use.
    pub fn init(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub asset: AssetConfig,
    #[serde(default)]
    pub exchanges: ExchangesConfig,
    pub network: NetworkConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ExchangesConfig {
    fn default() -> Self {
        Self { aevo: true, lyra: true }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        let config: Self = toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.asset.underlying.trim().is_empty() {
            return Err(Error::Config("asset.underlying cannot be empty".into()));
        }
        if !self.exchanges.aevo && !self.exchanges.lyra {
            return Err(Error::Config("at least one of exchanges.aevo/lyra must be enabled".into()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            asset: AssetConfig { underlying: "ETH".into() },
            exchanges: ExchangesConfig::default(),
            network: NetworkConfig {
                aevo: VenueNetworkConfig {
                    http_base: "https://api.aevo.xyz".into(),
                    ws_url: "wss://ws.aevo.xyz".into(),
                },
                lyra: VenueNetworkConfig {
                    http_base: "https://api.lyra.finance".into(),
                    ws_url: "wss://api.lyra.finance/ws".into(),
                },
            },
            server: ServerConfig { bind_addr: "0.0.0.0:8081".into() },
            logging: LoggingConfig::default(),
        }
    }
}
