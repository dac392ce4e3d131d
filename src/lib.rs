// src/lib.rs
use anyhow::Result;
use app_state::AppState;
use axum::{routing::get, Router};

use handlers::{
    add_widget, delete_widget, get_widget, health_check, list_widgets, root_handler,
};

// Public exports (visible outside this module)
pub mod bundle;
pub mod domain;
pub mod error;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod handlers;
mod infrastructure;

// Hoist up only the public symbol(s)
pub use bundle::{instrument, instrument_router, BundleConfig, PromBundle, METRICS_PATH};
pub use error::{BundleError, Result as BundleResult};

pub use config::*;

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_noop_metrics, // ---
    create_process_memory_sampler,
    create_prom_metrics,
    ProcessMemorySampler,
};
pub use infrastructure::metrics::{noop::NoopRegistry, prometheus::PrometheusRegistry};

/// Build the instrumented demo router from environment configuration.
///
/// Fails if the metrics configuration is invalid, including a whitelist and
/// blacklist both being set.
pub fn create_router() -> Result<Router> {
    // ---
    // Load all configuration from environment
    let config = AppConfig::from_env()?;
    create_router_from(&config)
}

/// Build the instrumented demo router from an already loaded configuration.
pub fn create_router_from(config: &AppConfig) -> Result<Router> {
    // ---
    tracing_subscriber::fmt::try_init().ok(); // Ignores if already initialized

    let registry = match config.metrics.backend {
        MetricsBackend::Prometheus => create_prom_metrics()?,
        MetricsBackend::Noop => create_noop_metrics()?,
    };

    let bundle = PromBundle::new(registry, config.metrics.bundle.clone())?;

    Ok(build_router(bundle))
}

/// Build the demo router around an already configured bundle.
///
/// The bundle layer wraps every route and the fallback, so `/metrics` is
/// answered by the middleware without a route of its own.
pub fn build_router(bundle: PromBundle) -> Router {
    // ---
    let router = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .nest(
            "/api",
            Router::new()
                .route("/widgets", get(list_widgets).post(add_widget))
                .route("/widgets/{id}", get(get_widget).delete(delete_widget)),
        )
        .with_state(AppState::new());

    instrument_router(router, bundle)
}
