mod filter;
mod memory;
mod metrics;
mod timer;

// Publicly expose the Metrics registry abstraction
pub use metrics::{
    Gauge, GaugePtr, Histogram, HistogramPtr, LabelSet, MetricsRegistry, MetricsRegistryPtr,
};

// Metric selection and request timing
pub use filter::{select_metric_names, FilterConfig, NamePattern};
pub use memory::{HeapUsage, MemorySampler, MemorySamplerPtr};
pub use timer::RequestTimer;
