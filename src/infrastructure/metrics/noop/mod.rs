// src/infrastructure/metrics/noop/mod.rs
mod noop_metrics;

pub use noop_metrics::NoopRegistry;
use std::sync::Arc;

/// Creates a new no-op metrics registry.
///
/// This implementation does nothing - all metrics calls are ignored and the
/// rendered exposition is empty. Useful for development, testing, or when
/// metrics are disabled.
pub fn create() -> anyhow::Result<crate::domain::MetricsRegistryPtr> {
    Ok(Arc::new(NoopRegistry::new()))
}
