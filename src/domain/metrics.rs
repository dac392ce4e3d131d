use crate::error::Result;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Label name to current value, in label-name order.
pub type LabelSet = BTreeMap<&'static str, String>;

/// Abstraction over the metrics registry (Prometheus or no-op).
///
/// A registry owns every instrument created through it and renders them
/// together. Registration is scoped to the registry instance, not the process.
pub trait MetricsRegistry: Send + Sync + 'static {
    // ---
    /// Register a gauge under `name`.
    fn new_gauge(&self, name: &str, help: &str) -> Result<GaugePtr>;

    /// Register a labeled histogram under `name` with the given bucket boundaries.
    fn new_histogram(
        &self,
        name: &str,
        help: &str,
        buckets: &[f64],
        label_names: &[&'static str],
    ) -> Result<HistogramPtr>;

    /// Render every registered metric in the text exposition format.
    fn render(&self) -> Result<String>;

    /// Forget every registered metric so the same names can be registered again.
    fn reset(&self);
}

/// A single settable value.
pub trait Gauge: Send + Sync + 'static {
    fn set(&self, value: f64);
    fn get(&self) -> f64;
}

/// A bucketed distribution partitioned by a fixed set of label names.
pub trait Histogram: Send + Sync + 'static {
    // ---
    fn name(&self) -> &str;

    fn label_names(&self) -> &[&'static str];

    /// Record one observation for the series identified by `labels`.
    ///
    /// `labels` must carry exactly the names returned by [`Histogram::label_names`].
    fn observe(&self, labels: &LabelSet, seconds: f64) -> Result<()>;
}

/// Type alias for any backend that implements MetricsRegistry.
pub type MetricsRegistryPtr = Arc<dyn MetricsRegistry>;

pub type GaugePtr = Arc<dyn Gauge>;

pub type HistogramPtr = Arc<dyn Histogram>;
