use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use staybook_domain::constants::DEFAULT_EVENT_LIST_LIMIT;
use staybook_domain::utils::dates::parse_timestamp;
use staybook_domain::{CalendarEvent, CalendarEventInput, EventWindow};

use super::{AppState, Envelope};
use crate::error::ApiError;
use crate::extractors::CurrentActor;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/calendar/events", get(list_events).post(create_event))
        .route("/api/calendar/events/{event_id}", delete(delete_event))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventsQuery {
    start_date: Option<String>,
    end_date: Option<String>,
    max_results: Option<u32>,
}

/// Events from `startDate` (default: now) up to `endDate`.
async fn list_events(
    State(ctx): State<AppState>,
    CurrentActor(_actor): CurrentActor,
    query: Result<Query<EventsQuery>, QueryRejection>,
) -> Result<Json<Envelope<Vec<CalendarEvent>>>, ApiError> {
    let Query(query) = query?;

    let time_min = match query.start_date.as_deref() {
        Some(raw) => parse_timestamp(raw)?,
        None => Utc::now(),
    };
    let time_max = query.end_date.as_deref().map(parse_timestamp).transpose()?;

    let window = EventWindow {
        time_min: Some(time_min),
        time_max,
        max_results: query.max_results.unwrap_or(DEFAULT_EVENT_LIST_LIMIT),
    };
    let events = ctx.calendar.list_events(window).await?;
    Ok(Json(Envelope::list(events)))
}

async fn create_event(
    State(ctx): State<AppState>,
    CurrentActor(actor): CurrentActor,
    payload: Result<Json<CalendarEventInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<CalendarEvent>>), ApiError> {
    let Json(input) = payload?;
    let event = ctx.calendar.create_event(input).await?;

    tracing::info!(actor_id = %actor.id, event_id = %event.id, "calendar event created");
    Ok((StatusCode::CREATED, Json(Envelope::data(event))))
}

async fn delete_event(
    State(ctx): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(event_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    ctx.calendar.delete_event(&event_id).await?;

    tracing::info!(actor_id = %actor.id, event_id = %event_id, "calendar event deleted");
    Ok(StatusCode::NO_CONTENT)
}
