use crate::bundle::PromBundle;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Response for the `/metrics` endpoint.
///
/// Refreshes the heap gauges and returns the registry in Prometheus text
/// format. A render failure becomes a 500 rather than a partial body.
pub fn metrics_response(bundle: &PromBundle) -> Response {
    // ---
    match bundle.scrape() {
        Ok(metrics_text) => {
            tracing::debug!("Serving metrics scrape ({} bytes)", metrics_text.len());
            (
                StatusCode::OK,
                [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
                metrics_text,
            )
                .into_response()
        }
        Err(err) => {
            tracing::error!("Failed to render metrics: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render metrics").into_response()
        }
    }
}
