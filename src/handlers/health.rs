use axum::{http::StatusCode, Json};

#[derive(serde::Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// Responds with the health status of the server.
///
/// This is a light check confirming the web server is running; the demo has
/// no backing store to ping.
///
/// # Responses
/// - `200 OK` with `{ "status": "ok" }`.
pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}
