use anyhow::Result;
use axum_prom_bundle::{create_router_from, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up a local .env file if there is one; real environment wins.
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber to log to stdout
    tracing_subscriber::fmt::init();
    tracing::info!("Starting axum server...");

    // Load all configuration from environment
    let config = AppConfig::from_env()?;
    let app = create_router_from(&config)?;

    let endpoint = &config.server.bind_addr;

    info!("Starting at endpoint:{}", endpoint);
    info!("Starting Axum Prometheus bundle demo v{}...", env!("CARGO_PKG_VERSION"));

    let listener = tokio::net::TcpListener::bind(endpoint).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
