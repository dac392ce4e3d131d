//! Process heap readings from procfs.
//!
//! `VmData` (data segment plus heap mappings) is reported as the heap total
//! and `VmRSS` as the portion actually resident. Both are in kB in
//! `/proc/self/status`. Platforms without procfs report zeros.

use crate::domain::{HeapUsage, MemorySampler, MemorySamplerPtr};
use std::sync::Arc;

const STATUS_PATH: &str = "/proc/self/status";

/// Samples the current process through `/proc/self/status`.
#[derive(Debug, Default)]
pub struct ProcessMemorySampler;

impl MemorySampler for ProcessMemorySampler {
    // ---
    fn sample(&self) -> HeapUsage {
        match std::fs::read_to_string(STATUS_PATH) {
            Ok(status) => parse_status(&status),
            Err(err) => {
                tracing::debug!("Cannot read {}: {}", STATUS_PATH, err);
                HeapUsage::default()
            }
        }
    }
}

fn parse_status(status: &str) -> HeapUsage {
    // ---
    let mut usage = HeapUsage::default();
    for line in status.lines() {
        if let Some(value) = line.strip_prefix("VmData:") {
            usage.heap_total = parse_kb(value);
        } else if let Some(value) = line.strip_prefix("VmRSS:") {
            usage.heap_used = parse_kb(value);
        }
    }
    usage
}

/// `"   1234 kB"` -> bytes
fn parse_kb(value: &str) -> u64 {
    value
        .split_whitespace()
        .next()
        .and_then(|kb| kb.parse::<u64>().ok())
        .map_or(0, |kb| kb * 1024)
}

/// Creates the default sampler for the running process.
pub fn create_process_memory_sampler() -> MemorySamplerPtr {
    Arc::new(ProcessMemorySampler)
}
