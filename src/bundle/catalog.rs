//! The table of metrics the bundle knows how to create.
//!
//! Definitions are plain data. A definition only touches the registry when
//! [`MetricDefinition::instantiate`] is called, which the bundle does once per
//! name that survives the whitelist/blacklist filter.

use crate::domain::{GaugePtr, HistogramPtr, MetricsRegistry};
use crate::error::Result;
use std::collections::BTreeMap;

pub const UP: &str = "up";
pub const HEAP_TOTAL_BYTES: &str = "nodejs_memory_heap_total_bytes";
pub const HEAP_USED_BYTES: &str = "nodejs_memory_heap_used_bytes";
pub const HTTP_REQUEST_SECONDS: &str = "http_request_seconds";
pub const HTTP_REQUEST_DETAIL_DURATION: &str = "http_request_detail_duration";
pub const HTTP_REQUEST_LONG_DURATION: &str = "http_request_long_duration";

pub const LABEL_STATUS_CODE: &str = "status_code";
pub const LABEL_METHOD: &str = "method";
pub const LABEL_ROUTE: &str = "route";
pub const LABEL_URL: &str = "url";

const REQUEST_BUCKETS: &[f64] = &[0.003, 0.03, 0.1, 0.3, 1.5, 10.0];
const LONG_REQUEST_BUCKETS: &[f64] = &[0.3, 1.5, 3.0, 5.0, 10.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Gauge,
    Histogram,
}

/// Static description of one metric. Buckets and labels are empty for gauges.
#[derive(Debug, Clone, Copy)]
pub struct MetricDefinition {
    pub name: &'static str,
    pub kind: MetricKind,
    pub help: &'static str,
    pub buckets: &'static [f64],
    pub label_names: &'static [&'static str],
}

/// Every metric the bundle can expose, in registration order.
pub const METRIC_CATALOG: &[MetricDefinition] = &[
    MetricDefinition {
        name: UP,
        kind: MetricKind::Gauge,
        help: "1 = up, 0 = not up",
        buckets: &[],
        label_names: &[],
    },
    MetricDefinition {
        name: HEAP_TOTAL_BYTES,
        kind: MetricKind::Gauge,
        help: "Process heap size in bytes, as reserved from the OS",
        buckets: &[],
        label_names: &[],
    },
    MetricDefinition {
        name: HEAP_USED_BYTES,
        kind: MetricKind::Gauge,
        help: "Process heap size in bytes, as resident in memory",
        buckets: &[],
        label_names: &[],
    },
    MetricDefinition {
        name: HTTP_REQUEST_SECONDS,
        kind: MetricKind::Histogram,
        help: "number of http responses labeled with status code",
        buckets: REQUEST_BUCKETS,
        label_names: &[LABEL_STATUS_CODE],
    },
    MetricDefinition {
        name: HTTP_REQUEST_DETAIL_DURATION,
        kind: MetricKind::Histogram,
        help: "Duration of HTTP requests(Detailed)",
        buckets: REQUEST_BUCKETS,
        label_names: &[LABEL_METHOD, LABEL_ROUTE, LABEL_STATUS_CODE],
    },
    MetricDefinition {
        name: HTTP_REQUEST_LONG_DURATION,
        kind: MetricKind::Histogram,
        help: "Long Duration of HTTP requests(Detailed)",
        buckets: LONG_REQUEST_BUCKETS,
        label_names: &[LABEL_METHOD, LABEL_URL, LABEL_STATUS_CODE],
    },
];

/// A registered metric instance.
#[derive(Clone)]
pub enum MetricHandle {
    Gauge(GaugePtr),
    Histogram(HistogramPtr),
}

impl MetricDefinition {
    // ---

    /// Register this metric with `registry` and return the live handle.
    pub fn instantiate(&self, registry: &dyn MetricsRegistry) -> Result<MetricHandle> {
        // ---
        match self.kind {
            MetricKind::Gauge => registry.new_gauge(self.name, self.help).map(MetricHandle::Gauge),
            MetricKind::Histogram => registry
                .new_histogram(self.name, self.help, self.buckets, self.label_names)
                .map(MetricHandle::Histogram),
        }
    }
}

/// Names of every catalog entry, in catalog order.
pub fn catalog_names() -> Vec<&'static str> {
    METRIC_CATALOG.iter().map(|def| def.name).collect()
}

pub fn find_definition(name: &str) -> Option<&'static MetricDefinition> {
    METRIC_CATALOG.iter().find(|def| def.name == name)
}

/// Metric name to live instance, for the names that survived the filter.
#[derive(Clone, Default)]
pub struct ActiveMetrics {
    by_name: BTreeMap<&'static str, MetricHandle>,
}

impl ActiveMetrics {
    // ---

    /// Instantiate the catalog entries named in `names`, in the given order.
    ///
    /// Names missing from the catalog are ignored.
    pub fn instantiate(names: &[&'static str], registry: &dyn MetricsRegistry) -> Result<Self> {
        // ---
        let mut by_name = BTreeMap::new();
        for name in names {
            if let Some(def) = find_definition(name) {
                by_name.insert(def.name, def.instantiate(registry)?);
            }
        }
        Ok(ActiveMetrics { by_name })
    }

    pub fn get(&self, name: &str) -> Option<&MetricHandle> {
        self.by_name.get(name)
    }

    pub fn gauge(&self, name: &str) -> Option<&GaugePtr> {
        match self.by_name.get(name) {
            Some(MetricHandle::Gauge(gauge)) => Some(gauge),
            _ => None,
        }
    }

    pub fn histogram(&self, name: &str) -> Option<&HistogramPtr> {
        match self.by_name.get(name) {
            Some(MetricHandle::Histogram(histogram)) => Some(histogram),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.by_name.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
