//! Sigvana signal-engine server
//!
//! HTTP API over the analysis engine. The service is stateless apart from
//! the in-memory candle store and can be horizontally scaled.

use dotenvy::dotenv;
use sigvana::config::{get_environment, Config};
use sigvana::core::http::start_server;
use sigvana::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env();
    let env = get_environment();
    info!("Starting Sigvana signal engine");
    info!(environment = %env, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("Server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down signal engine...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
