use crate::domain::{Gauge, Histogram, LabelSet};
use crate::error::{BundleError, Result};
use std::collections::HashMap;

/// Gauge backed by a registered `prometheus::Gauge`.
pub struct PromGauge {
    inner: prometheus::Gauge,
}

impl PromGauge {
    pub fn new(inner: prometheus::Gauge) -> Self {
        PromGauge { inner }
    }
}

impl Gauge for PromGauge {
    // ---
    fn set(&self, value: f64) {
        self.inner.set(value);
    }

    fn get(&self) -> f64 {
        self.inner.get()
    }
}

/// Histogram backed by a registered `prometheus::HistogramVec`.
///
/// Child series are created on first observation only.
pub struct PromHistogram {
    name: String,
    label_names: Vec<&'static str>,
    inner: prometheus::HistogramVec,
}

impl PromHistogram {
    // ---
    pub fn new(name: &str, label_names: &[&'static str], inner: prometheus::HistogramVec) -> Self {
        PromHistogram {
            name: name.to_string(),
            label_names: label_names.to_vec(),
            inner,
        }
    }
}

impl Histogram for PromHistogram {
    // ---
    fn name(&self) -> &str {
        &self.name
    }

    fn label_names(&self) -> &[&'static str] {
        &self.label_names
    }

    fn observe(&self, labels: &LabelSet, seconds: f64) -> Result<()> {
        // ---
        let values: HashMap<&str, &str> = labels.iter().map(|(k, v)| (*k, v.as_str())).collect();

        let series = self.inner.get_metric_with(&values).map_err(|err| {
            BundleError::Registry(format!("cannot observe {}: {err}", self.name))
        })?;
        series.observe(seconds);

        Ok(())
    }
}
