//! Application state management.
//!
//! This module defines the shared state passed to the demo handlers via the
//! `State` extractor. Metrics do not live here: the bundle carries its own
//! state into the middleware layer, so handlers never touch metrics.
//!
//! The state is cheaply cloneable (`Arc` inside) so Axum can hand a copy to
//! each request handler.

use crate::handlers::Widget;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory widget store keyed by widget ID.
pub(crate) type WidgetStore = Arc<RwLock<HashMap<String, Widget>>>;

/// Shared application state passed to all Axum handlers.
///
/// # Lifecycle
///
/// 1. Created once in `build_router()` during application startup
/// 2. Attached to the Axum router via `.with_state(app_state)`
/// 3. Cloned automatically by Axum for each incoming HTTP request
/// 4. Handlers extract via `State(state): State<AppState>`
#[derive(Clone, Default)]
pub(crate) struct AppState {
    /// Demo resources served under `/api/widgets`.
    widgets: WidgetStore,
}

impl AppState {
    // ---

    pub fn new() -> Self {
        AppState::default()
    }

    /// Get a reference to the widget store.
    pub(crate) fn widgets(&self) -> &WidgetStore {
        // ---
        &self.widgets
    }
}
