mod instruments;
mod prometheus_metrics;
mod recorder;

pub use prometheus_metrics::PrometheusRegistry;
use std::sync::Arc;

/// Creates a new Prometheus metrics registry.
///
/// The registry is owned by the caller and renders in Prometheus text format
/// for scraping. Nothing is installed globally.
pub fn create() -> anyhow::Result<crate::domain::MetricsRegistryPtr> {
    tracing::info!("Initializing Prometheus metrics");
    Ok(Arc::new(PrometheusRegistry::new()))
}
