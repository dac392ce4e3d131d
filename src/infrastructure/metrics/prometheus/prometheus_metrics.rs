//! Prometheus registry implementation.
//!
//! This module provides a concrete implementation of the `MetricsRegistry`
//! trait on top of the `prometheus` crate. Each `PrometheusRegistry` owns a
//! private `prometheus::Registry`; nothing is registered in the crate's
//! process-wide default registry, so independent instances (one per test, for
//! example) never see each other's metrics.
//!
//! Instrument wrappers live in `instruments.rs`, encoding and error mapping in
//! `recorder.rs`.

use super::instruments::{PromGauge, PromHistogram};
use super::recorder::{registration_error, render_metrics};
use crate::domain::{GaugePtr, HistogramPtr, MetricsRegistry};
use crate::error::{BundleError, Result};
use prometheus::{HistogramOpts, HistogramVec, Registry};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

/// Prometheus-based metrics registry.
pub struct PrometheusRegistry {
    registry: RwLock<Registry>,
}

impl PrometheusRegistry {
    // ---
    pub fn new() -> Self {
        tracing::info!("Creating Prometheus registry");
        PrometheusRegistry {
            registry: RwLock::new(Registry::new()),
        }
    }

    fn current(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PrometheusRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRegistry for PrometheusRegistry {
    // ---
    fn new_gauge(&self, name: &str, help: &str) -> Result<GaugePtr> {
        // ---
        let gauge = prometheus::Gauge::new(name, help).map_err(|err| registration_error(name, err))?;

        self.current()
            .register(Box::new(gauge.clone()))
            .map_err(|err| registration_error(name, err))?;

        tracing::debug!("Registered gauge {}", name);
        Ok(Arc::new(PromGauge::new(gauge)))
    }

    fn new_histogram(
        &self,
        name: &str,
        help: &str,
        buckets: &[f64],
        label_names: &[&'static str],
    ) -> Result<HistogramPtr> {
        // ---
        if label_names.is_empty() {
            return Err(BundleError::Registry(format!(
                "histogram {name} needs at least one label name"
            )));
        }

        let opts = HistogramOpts::new(name, help).buckets(buckets.to_vec());
        let histogram =
            HistogramVec::new(opts, label_names).map_err(|err| registration_error(name, err))?;

        self.current()
            .register(Box::new(histogram.clone()))
            .map_err(|err| registration_error(name, err))?;

        tracing::debug!("Registered histogram {} {:?}", name, label_names);
        Ok(Arc::new(PromHistogram::new(name, label_names, histogram)))
    }

    fn render(&self) -> Result<String> {
        render_metrics(&self.current())
    }

    fn reset(&self) {
        // ---
        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        *registry = Registry::new();
        tracing::debug!("Prometheus registry reset");
    }
}
