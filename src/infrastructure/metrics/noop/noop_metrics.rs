use crate::domain::{Gauge, GaugePtr, Histogram, HistogramPtr, LabelSet, MetricsRegistry};
use crate::error::Result;
use std::sync::Arc;

/// No-op metrics registry for testing and for running with metrics disabled.
pub struct NoopRegistry;

impl NoopRegistry {
    pub fn new() -> Self {
        NoopRegistry
    }
}

impl Default for NoopRegistry {
    fn default() -> Self {
        Self::new()
    }
}

struct NoopGauge;

struct NoopHistogram {
    name: String,
    label_names: Vec<&'static str>,
}

impl MetricsRegistry for NoopRegistry {
    // ---
    fn new_gauge(&self, _: &str, _: &str) -> Result<GaugePtr> {
        Ok(Arc::new(NoopGauge))
    }
    fn new_histogram(
        &self,
        name: &str,
        _: &str,
        _: &[f64],
        label_names: &[&'static str],
    ) -> Result<HistogramPtr> {
        Ok(Arc::new(NoopHistogram {
            name: name.to_string(),
            label_names: label_names.to_vec(),
        }))
    }
    fn render(&self) -> Result<String> {
        Ok(String::new())
    }
    fn reset(&self) {}
}

impl Gauge for NoopGauge {
    fn set(&self, _: f64) {}
    fn get(&self) -> f64 {
        0.0
    }
}

impl Histogram for NoopHistogram {
    fn name(&self) -> &str {
        &self.name
    }
    fn label_names(&self) -> &[&'static str] {
        &self.label_names
    }
    fn observe(&self, _: &LabelSet, _: f64) -> Result<()> {
        Ok(())
    }
}
