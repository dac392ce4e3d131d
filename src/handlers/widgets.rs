use crate::app_state::AppState;
use crate::handlers::shared_types::ApiResponse;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct Widget {
    pub id: String,
    pub name: String,
    pub weight_grams: u32,
}

/// Handler for listing widgets (GET /api/widgets).
///
/// Responds with `200 OK` and every stored widget, ordered by ID. When the
/// store is empty it responds with `404 Not Found` instead, so the demo
/// produces both success and error latencies.
#[tracing::instrument(skip(state))]
pub async fn list_widgets(
    State(state): State<AppState>,
) -> Result<(StatusCode, ApiResponse<Vec<Widget>>), StatusCode> {
    // ---
    let widgets = state.widgets().read().await;
    if widgets.is_empty() {
        return Err(StatusCode::NOT_FOUND);
    }

    let mut list: Vec<Widget> = widgets.values().cloned().collect();
    list.sort_by(|a, b| a.id.cmp(&b.id));

    Ok((StatusCode::OK, ApiResponse { data: list }))
}

/// Handler for fetching a widget by ID (GET /api/widgets/{id}).
///
/// - `200 OK` with the widget as JSON if it exists.
/// - `404 Not Found` with an empty body otherwise.
#[tracing::instrument(skip(state, id))]
pub async fn get_widget(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, ApiResponse<Widget>), StatusCode> {
    // ---
    let widgets = state.widgets().read().await;
    let widget = widgets.get(&id).cloned().ok_or(StatusCode::NOT_FOUND)?;

    Ok((StatusCode::OK, ApiResponse { data: widget }))
}

/// Handler for creating a widget (POST /api/widgets).
///
/// - `409 Conflict` if the ID is already taken.
/// - `201 Created` on success.
#[tracing::instrument(skip(state, widget))]
pub async fn add_widget(
    State(state): State<AppState>,
    Json(widget): Json<Widget>,
) -> Result<StatusCode, StatusCode> {
    // ---
    let mut widgets = state.widgets().write().await;
    if widgets.contains_key(&widget.id) {
        return Err(StatusCode::CONFLICT);
    }

    tracing::info!("{}/{}", &widget.id, &widget.name);
    widgets.insert(widget.id.clone(), widget);

    Ok(StatusCode::CREATED)
}

/// Delete a widget by its ID (DELETE /api/widgets/{id}).
///
/// Returns `204 No Content` if it was removed, `404 Not Found` if no widget
/// had that ID.
pub async fn delete_widget(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    // ---
    let mut widgets = state.widgets().write().await;

    match widgets.remove(&id) {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(StatusCode::NOT_FOUND),
    }
}
