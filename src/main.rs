use anyhow::Result;
use clap::Parser;

use weather_mcp::config::{Config, TransportKind};
use weather_mcp::{logging, transport, Dispatcher};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let config = Config::parse();

    let dispatcher = Dispatcher::new(config.build_backend()?);
    tracing::info!(
        "Starting Weather MCP server (backend: {}, transport: {:?})",
        dispatcher.backend_name(),
        config.transport
    );

    match config.transport {
        TransportKind::Http => transport::http::serve(dispatcher, config.bind_addr()).await?,
        TransportKind::Stdio => transport::stdio::serve(dispatcher).await?,
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}
