//! CHI catalog server binary
//!
//! Serves the CHI 2023 papers catalog over HTTP with API key authentication.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Start server
    server::start_server(config).await?;

    Ok(())
}
