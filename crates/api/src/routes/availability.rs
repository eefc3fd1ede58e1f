use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use staybook_domain::utils::dates::parse_day;
use staybook_domain::{AvailabilityDay, AvailabilityPatch, AvailabilityRecord, AvailabilityUpdate};

use super::{AppState, Envelope};
use crate::error::ApiError;
use crate::extractors::CurrentActor;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/calendar/availability/{property_id}",
            get(property_availability).post(update_availability),
        )
        .route("/api/calendar/availability/{property_id}/bulk", post(bulk_update_availability))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RangeQuery {
    start_date: Option<String>,
    end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityRequest {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(flatten)]
    patch: AvailabilityPatch,
}

/// Result of either a single-day or a range write.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum AvailabilityWrite {
    Day(AvailabilityRecord),
    Range { days: usize },
}

fn required_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(NaiveDate, NaiveDate), ApiError> {
    match (start, end) {
        (Some(start), Some(end)) => Ok((parse_day(start)?, parse_day(end)?)),
        _ => Err(ApiError::bad_request("Please provide start and end dates")),
    }
}

/// Per-day availability of `[startDate, endDate]`. Public.
async fn property_availability(
    State(ctx): State<AppState>,
    Path(property_id): Path<String>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<Json<Envelope<Vec<AvailabilityDay>>>, ApiError> {
    let Query(range) = query?;
    let (start, end) = required_range(range.start_date.as_deref(), range.end_date.as_deref())?;

    let days = ctx.availability.daily_availability(&property_id, start, end).await?;
    Ok(Json(Envelope::data(days)))
}

/// Single day when `date` is present, otherwise the inclusive range.
async fn update_availability(
    State(ctx): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(property_id): Path<String>,
    payload: Result<Json<AvailabilityRequest>, JsonRejection>,
) -> Result<Json<Envelope<AvailabilityWrite>>, ApiError> {
    let Json(request) = payload?;

    if let Some(date) = request.date.as_deref() {
        let update = AvailabilityUpdate { date: parse_day(date)?, patch: request.patch };
        let record = ctx.availability.set_day(&property_id, update).await?;
        tracing::info!(actor_id = %actor.id, property_id = %property_id, date = %record.date, "availability day updated");
        return Ok(Json(Envelope::data(AvailabilityWrite::Day(record))));
    }

    if request.start_date.is_none() || request.end_date.is_none() {
        return Err(ApiError::bad_request("Please provide a date or a date range"));
    }
    let (start, end) =
        required_range(request.start_date.as_deref(), request.end_date.as_deref())?;
    let days = ctx.availability.set_range(&property_id, start, end, request.patch).await?;

    tracing::info!(actor_id = %actor.id, property_id = %property_id, days, "availability range updated");
    let mut body = Envelope::data(AvailabilityWrite::Range { days });
    body.message = Some(format!("Updated availability for {days} days"));
    Ok(Json(body))
}

async fn bulk_update_availability(
    State(ctx): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(property_id): Path<String>,
    payload: Result<Json<AvailabilityRequest>, JsonRejection>,
) -> Result<Json<Envelope<AvailabilityWrite>>, ApiError> {
    let Json(request) = payload?;
    let (start, end) =
        required_range(request.start_date.as_deref(), request.end_date.as_deref())?;

    let days = ctx.availability.set_range(&property_id, start, end, request.patch).await?;

    tracing::info!(actor_id = %actor.id, property_id = %property_id, days, "availability bulk update");
    let mut body = Envelope::data(AvailabilityWrite::Range { days });
    body.message = Some(format!("Updated availability for {days} days"));
    Ok(Json(body))
}
