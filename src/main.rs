use clap::Parser;

use boxspread_scanner::cli::{self, Cli};
use boxspread_scanner::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // reqwest and tokio-tungstenite each pull in rustls without pinning a
    // crypto provider; install one before either opens a connection.
    let _ = rustls::crypto::ring::default_provider().install_default();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    cli::run::execute(&cli).await
}
