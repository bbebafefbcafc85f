use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service banner"))
)]
#[axum::debug_handler]
pub async fn root() -> impl IntoResponse {
    let body = json!({
        "message": "Sistema de Cadastramento de Metas - API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
    });
    (StatusCode::OK, Json(body))
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy"))
)]
#[axum::debug_handler]
pub async fn health() -> impl IntoResponse {
    let body = json!({
        "status": "healthy",
    });
    (StatusCode::OK, Json(body))
}
