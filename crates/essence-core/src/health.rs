use axum::http::StatusCode;

/// Handler for `GET /healthz`. Liveness only; readiness is per service.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
