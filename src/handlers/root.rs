use axum::response::IntoResponse;

pub async fn root_handler() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    format!(
        r#"Welcome to the Widget API 👋
Version: {version}

Available endpoints:
  - GET    /api/widgets        - List widgets (404 while empty)
  - POST   /api/widgets        - Add a widget
  - GET    /api/widgets/{{id}}   - Fetch a widget by id
  - DELETE /api/widgets/{{id}}   - Delete a widget by id
  - GET    /health             - Light health check
  - GET    /metrics            - Prometheus metrics

Every request is timed by the Prometheus bundle middleware.
"#
    )
}
