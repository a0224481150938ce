//! Deal relay (v1)
//!
//! A read-only CORS relay in front of the CRM API, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌────────────────────────────────────────────────────┐
//!                       │                    DEAL RELAY                      │
//!                       │                                                    │
//!   Browser form        │  ┌─────────┐   ┌──────────┐   ┌──────────────┐    │
//!   ────────────────────┼─▶│  http   │──▶│ routing  │──▶│   handlers   │    │
//!                       │  │ server  │   │ dispatch │   │              │    │
//!                       │  └─────────┘   └──────────┘   └──────┬───────┘    │
//!                       │                                      │            │
//!                       │                                      ▼            │
//!   JSON projection     │  ┌─────────┐   ┌──────────┐   ┌──────────────┐    │
//!   ◀───────────────────┼──│  cors   │◀──│projection│◀──│  crm client  │◀───┼──── CRM API
//!                       │  └─────────┘   └──────────┘   └──────────────┘    │
//!                       │                                                    │
//!                       │  config · observability · lifecycle                │
//!                       └────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;

use tokio::net::TcpListener;

use deal_relay::config::{load_api_token, load_from_env};
use deal_relay::lifecycle::signals::shutdown_on_signal;
use deal_relay::observability::{logging, metrics};
use deal_relay::{HttpServer, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_from_env()?;

    logging::init_logging(&config.observability);

    tracing::info!("deal-relay v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        filter_id = config.crm.demo_sale_filter_id,
        "Configuration loaded"
    );

    let token = load_api_token(&config.upstream.token_env)?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, token)?;
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        result = &mut server_task => {
            result??;
            return Ok(());
        }
        _ = shutdown_on_signal(&shutdown) => {}
    }
    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
