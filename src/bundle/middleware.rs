//! Axum adapter for the bundle.
//!
//! Install with [`instrument_router`], or directly with
//! `axum::middleware::from_fn_with_state(bundle, instrument)`. The layer must
//! wrap the routes (`Router::layer`) so the router's [`MatchedPath`] is
//! visible to it.

use super::body::CompletionBody;
use super::PromBundle;
use crate::handlers::metrics_response;
use axum::{
    body::Body,
    extract::{MatchedPath, Request, State},
    middleware::{self, Next},
    response::Response,
    Router,
};

/// Time the request, or answer it directly when it targets `/metrics`.
///
/// The request completes when its response body has been fully sent or
/// dropped. If this future is dropped before the inner service responds, the
/// pending timers go with it and nothing is recorded.
pub async fn instrument(State(bundle): State<PromBundle>, request: Request, next: Next) -> Response {
    // ---
    let pending = bundle.begin_request(request.method().as_str(), request.uri().path());

    if PromBundle::is_metrics_path(request.uri().path()) {
        // Scrapes are not timed.
        drop(pending);
        return metrics_response(&bundle);
    }

    let matched_route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_owned());

    let response = next.run(request).await;

    // Completion waits for the body, not just the response head.
    let status = response.status().as_u16();
    response.map(|body| Body::new(CompletionBody::new(body, bundle, pending, status, matched_route)))
}

/// Wrap every route of `router`, including its fallback, with [`instrument`].
pub fn instrument_router<S>(router: Router<S>, bundle: PromBundle) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(bundle, instrument))
}
