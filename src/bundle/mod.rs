//! Request metrics bundle.
//!
//! [`PromBundle`] is built once at startup from a [`BundleConfig`]. Setup
//! filters the catalog, registers the surviving metrics, and marks the
//! process as up. The bundle is then cloned into the Axum middleware, which
//! calls [`PromBundle::begin_request`] and [`PromBundle::complete_request`]
//! around every request and answers `/metrics` itself.

mod body;
pub mod catalog;
mod lifecycle;
mod middleware;

pub use catalog::{ActiveMetrics, MetricDefinition, MetricHandle, MetricKind, METRIC_CATALOG};
pub use lifecycle::{Completion, PendingRequest};
pub use middleware::{instrument, instrument_router};

use crate::domain::{select_metric_names, FilterConfig, MemorySamplerPtr, MetricsRegistryPtr};
use crate::error::Result;
use crate::infrastructure::create_process_memory_sampler;
use catalog::{HEAP_TOTAL_BYTES, HEAP_USED_BYTES, UP};
use std::collections::HashSet;
use std::sync::Arc;

/// Path answered by the middleware with the rendered registry.
pub const METRICS_PATH: &str = "/metrics";

/// Options consumed at setup.
#[derive(Debug, Clone, Default)]
pub struct BundleConfig {
    pub filter: FilterConfig,

    /// Route templates whose requests are also recorded in
    /// `http_request_long_duration`.
    pub routes_to_detail: Option<Vec<String>>,
}

/// Configured metrics middleware state. Cheap to clone.
#[derive(Clone)]
pub struct PromBundle {
    inner: Arc<Inner>,
}

struct Inner {
    registry: MetricsRegistryPtr,
    metrics: ActiveMetrics,
    routes_to_detail: Option<HashSet<String>>,
    memory: MemorySamplerPtr,
}

impl PromBundle {
    // ---

    /// Build the bundle, sampling heap usage from the running process.
    ///
    /// # Errors
    /// Fails with a configuration error if both a whitelist and a blacklist
    /// are set (before any metric is registered), or with a name collision if
    /// `registry` already holds one of the selected metrics.
    pub fn new(registry: MetricsRegistryPtr, config: BundleConfig) -> Result<Self> {
        Self::with_memory_sampler(registry, config, create_process_memory_sampler())
    }

    /// Build the bundle with an explicit heap sampler.
    pub fn with_memory_sampler(
        registry: MetricsRegistryPtr,
        config: BundleConfig,
        memory: MemorySamplerPtr,
    ) -> Result<Self> {
        // ---
        let names = select_metric_names(&catalog::catalog_names(), &config.filter)?;
        let metrics = ActiveMetrics::instantiate(&names, registry.as_ref())?;

        if let Some(up) = metrics.gauge(UP) {
            up.set(1.0);
        }

        tracing::info!("Prometheus bundle active metrics: {:?}", names);

        let routes_to_detail = config
            .routes_to_detail
            .map(|routes| routes.into_iter().collect::<HashSet<_>>());

        Ok(PromBundle {
            inner: Arc::new(Inner {
                registry,
                metrics,
                routes_to_detail,
                memory,
            }),
        })
    }

    /// Active metric name to instance.
    pub fn metrics(&self) -> &ActiveMetrics {
        &self.inner.metrics
    }

    /// The full catalog, active or not.
    pub fn metric_templates(&self) -> &'static [MetricDefinition] {
        METRIC_CATALOG
    }

    pub fn registry(&self) -> &MetricsRegistryPtr {
        &self.inner.registry
    }

    pub fn routes_to_detail(&self) -> Option<&HashSet<String>> {
        self.inner.routes_to_detail.as_ref()
    }

    pub fn is_metrics_path(path: &str) -> bool {
        path == METRICS_PATH
    }

    /// Start timing a request.
    pub fn begin_request(&self, method: &str, raw_path: &str) -> PendingRequest {
        PendingRequest::start(&self.inner.metrics, method, raw_path)
    }

    /// Finish timing a request. `status` is `None` when the response never got one.
    pub fn complete_request(
        &self,
        pending: PendingRequest,
        status: Option<u16>,
        matched_route: Option<&str>,
    ) -> Completion {
        // ---
        let completion = pending.complete(status, matched_route, self.routes_to_detail());
        tracing::debug!(
            "Request completed: status={:?} route={:?} observed={}",
            status,
            matched_route,
            completion.observed
        );
        completion
    }

    /// Refresh the heap gauges and render the registry.
    pub fn scrape(&self) -> Result<String> {
        // ---
        let heap_total = self.inner.metrics.gauge(HEAP_TOTAL_BYTES);
        let heap_used = self.inner.metrics.gauge(HEAP_USED_BYTES);

        if heap_total.is_some() || heap_used.is_some() {
            let usage = self.inner.memory.sample();
            if let Some(gauge) = heap_total {
                gauge.set(usage.heap_total as f64);
            }
            if let Some(gauge) = heap_used {
                gauge.set(usage.heap_used as f64);
            }
        }

        self.inner.registry.render()
    }
}
