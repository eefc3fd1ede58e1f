//! HTTP routes
//!
//! Every success body is `{ "success": true, "data": ..., "count"?: n }`.

mod availability;
mod bookings;
mod calendar_events;
mod health;

use std::sync::Arc;

use axum::{middleware, Router};
use serde::Serialize;

use crate::context::AppContext;
use crate::utils::logging::request_logging;

/// Shared handler state.
pub type AppState = Arc<AppContext>;

/// Build the full application router.
pub fn router(context: Arc<AppContext>) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(bookings::routes())
        .merge(availability::routes())
        .merge(calendar_events::routes())
        .layer(middleware::from_fn(request_logging))
        .with_state(context)
}

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self { success: true, count: None, message: None, data }
    }
}

impl<T> Envelope<Vec<T>> {
    pub fn list(data: Vec<T>) -> Self {
        Self { success: true, count: Some(data.len()), message: None, data }
    }
}
