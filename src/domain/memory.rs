use std::sync::Arc;

/// One reading of the process heap, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapUsage {
    pub heap_total: u64,
    pub heap_used: u64,
}

/// Source of heap readings for the `nodejs_memory_heap_*` gauges.
pub trait MemorySampler: Send + Sync + 'static {
    fn sample(&self) -> HeapUsage;
}

pub type MemorySamplerPtr = Arc<dyn MemorySampler>;
