use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use super::{AppState, Envelope};
use crate::utils::health::HealthStatus;

pub(super) fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// 200 when every critical component is healthy, 503 otherwise.
async fn health(State(ctx): State<AppState>) -> (StatusCode, Json<Envelope<HealthStatus>>) {
    let status = ctx.health_check().await;
    let code = if status.is_healthy { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };

    let mut body = Envelope::data(status);
    body.success = body.data.is_healthy;
    (code, Json(body))
}
