//! Per-request timer lifecycle.
//!
//! A request moves through
//!
//! ```text
//! START --(path == /metrics)--> SCRAPE            (timers dropped)
//!   |
//!   +--> PASSTHROUGH --(response body done)--> COMPLETED
//!                    --(no response)---------> ABANDONED (timers dropped)
//! ```
//!
//! [`PendingRequest`] owns the timers between START and the terminal state.
//! Completing it consumes it, so completion runs at most once per request.

use super::catalog::{
    ActiveMetrics, HTTP_REQUEST_DETAIL_DURATION, HTTP_REQUEST_LONG_DURATION, HTTP_REQUEST_SECONDS,
    LABEL_METHOD, LABEL_ROUTE, LABEL_STATUS_CODE, LABEL_URL,
};
use crate::domain::{LabelSet, RequestTimer};
use std::collections::HashSet;

/// Status label value until the real status is known.
const STATUS_PENDING: &str = "0";

/// Timers started for one in-flight request.
#[must_use = "a pending request records nothing unless it is completed"]
pub struct PendingRequest {
    seconds: Option<RequestTimer>,
    detail: Option<RequestTimer>,
    long: Option<RequestTimer>,
}

/// What happened to a completed request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Completion {
    /// Number of histogram observations recorded.
    pub observed: usize,
    /// Whether the long-duration histogram was among them.
    pub long_duration: bool,
}

impl PendingRequest {
    // ---

    /// Start one timer per active request histogram.
    ///
    /// `raw_path` stands in for the route until the router has resolved it.
    pub fn start(metrics: &ActiveMetrics, method: &str, raw_path: &str) -> Self {
        // ---
        let seconds = metrics.histogram(HTTP_REQUEST_SECONDS).map(|histogram| {
            let labels = LabelSet::from([(LABEL_STATUS_CODE, STATUS_PENDING.to_string())]);
            RequestTimer::start(histogram.clone(), labels)
        });

        let detail = metrics.histogram(HTTP_REQUEST_DETAIL_DURATION).map(|histogram| {
            let labels = LabelSet::from([
                (LABEL_METHOD, method.to_string()),
                (LABEL_ROUTE, raw_path.to_string()),
                (LABEL_STATUS_CODE, STATUS_PENDING.to_string()),
            ]);
            RequestTimer::start(histogram.clone(), labels)
        });

        let long = metrics.histogram(HTTP_REQUEST_LONG_DURATION).map(|histogram| {
            let labels = LabelSet::from([
                (LABEL_METHOD, method.to_string()),
                (LABEL_URL, raw_path.to_string()),
                (LABEL_STATUS_CODE, STATUS_PENDING.to_string()),
            ]);
            RequestTimer::start(histogram.clone(), labels)
        });

        PendingRequest {
            seconds,
            detail,
            long,
        }
    }

    /// Number of timers running for this request.
    pub fn running_timers(&self) -> usize {
        [&self.seconds, &self.detail, &self.long]
            .iter()
            .filter(|timer| timer.is_some())
            .count()
    }

    /// Finish the request.
    ///
    /// Without a status code nothing is recorded. Otherwise the status label
    /// is set on every timer, the detail timer takes the matched route when
    /// there is one, and the long-duration timer is recorded only for routes
    /// listed in `routes_to_detail`.
    pub fn complete(
        self,
        status: Option<u16>,
        matched_route: Option<&str>,
        routes_to_detail: Option<&HashSet<String>>,
    ) -> Completion {
        // ---
        let mut completion = Completion::default();
        let Some(status) = status else {
            return completion;
        };
        let status = status.to_string();

        if let Some(mut timer) = self.seconds {
            timer.set_label(LABEL_STATUS_CODE, status.as_str());
            completion.observed += record(timer);
        }

        if let Some(mut timer) = self.detail {
            if let Some(route) = matched_route {
                timer.set_label(LABEL_ROUTE, route);
            }
            timer.set_label(LABEL_STATUS_CODE, status.as_str());
            completion.observed += record(timer);
        }

        if let Some(mut timer) = self.long {
            let promoted = matches!(
                (routes_to_detail, matched_route),
                (Some(routes), Some(route)) if routes.contains(route)
            );
            if promoted {
                timer.set_label(LABEL_STATUS_CODE, status.as_str());
                let recorded = record(timer);
                completion.observed += recorded;
                completion.long_duration = recorded == 1;
            }
        }

        completion
    }
}

fn record(timer: RequestTimer) -> usize {
    // ---
    let name = timer.histogram_name().to_string();
    match timer.finalize() {
        Ok(seconds) => {
            tracing::trace!("Observed {} = {:.6}s", name, seconds);
            1
        }
        Err(err) => {
            tracing::warn!("Dropping {} observation: {}", name, err);
            0
        }
    }
}
