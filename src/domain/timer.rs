use super::metrics::{HistogramPtr, LabelSet};
use crate::error::Result;
use std::time::Instant;

/// A started, not yet recorded histogram observation.
///
/// Nothing touches the histogram until [`RequestTimer::finalize`], which
/// consumes the timer. Dropping an unfinalized timer records nothing and
/// creates no series.
pub struct RequestTimer {
    histogram: HistogramPtr,
    labels: LabelSet,
    started: Instant,
}

impl RequestTimer {
    // ---

    pub fn start(histogram: HistogramPtr, labels: LabelSet) -> Self {
        RequestTimer {
            histogram,
            labels,
            started: Instant::now(),
        }
    }

    /// Overwrite (or add) one label value. Takes effect at finalize time.
    pub fn set_label(&mut self, name: &'static str, value: impl Into<String>) {
        self.labels.insert(name, value.into());
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn histogram_name(&self) -> &str {
        self.histogram.name()
    }

    /// Record the elapsed time with the current label values.
    ///
    /// Returns the recorded duration in seconds.
    pub fn finalize(self) -> Result<f64> {
        // ---
        let seconds = self.started.elapsed().as_secs_f64();
        self.histogram.observe(&self.labels, seconds)?;
        Ok(seconds)
    }
}
