use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use staybook_domain::{Booking, BookingUpdate, NewBooking};

use super::{AppState, Envelope};
use crate::error::ApiError;
use crate::extractors::CurrentActor;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", get(list_bookings).post(create_booking))
        .route("/api/bookings/my-bookings", get(my_bookings))
        .route("/api/bookings/{id}", get(get_booking).put(update_booking))
        .route("/api/bookings/{id}/cancel", put(cancel_booking))
}

type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

async fn list_bookings(
    State(ctx): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> ApiResult<Vec<Booking>> {
    let bookings = ctx.bookings.list_bookings(&actor).await?;
    Ok(Json(Envelope::list(bookings)))
}

async fn my_bookings(
    State(ctx): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> ApiResult<Vec<Booking>> {
    let bookings = ctx.bookings.list_user_bookings(&actor).await?;
    Ok(Json(Envelope::list(bookings)))
}

async fn get_booking(
    State(ctx): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> ApiResult<Booking> {
    let booking = ctx.bookings.get_booking(&actor, &id).await?;
    Ok(Json(Envelope::data(booking)))
}

async fn create_booking(
    State(ctx): State<AppState>,
    CurrentActor(actor): CurrentActor,
    payload: Result<Json<NewBooking>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Booking>>), ApiError> {
    let Json(request) = payload?;
    let booking = ctx.bookings.create_booking(&actor, request).await?;
    Ok((StatusCode::CREATED, Json(Envelope::data(booking))))
}

async fn update_booking(
    State(ctx): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    payload: Result<Json<BookingUpdate>, JsonRejection>,
) -> ApiResult<Booking> {
    let Json(update) = payload?;
    let booking = ctx.bookings.update_booking(&actor, &id, update).await?;
    Ok(Json(Envelope::data(booking)))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CancelRequest {
    #[serde(default, alias = "reason")]
    cancellation_reason: Option<String>,
}

/// The body is optional; an empty body cancels with the default reason.
async fn cancel_booking(
    State(ctx): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Booking> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        CancelRequest::default()
    } else {
        serde_json::from_slice::<CancelRequest>(&body)
            .map_err(|e| ApiError::bad_request(format!("Invalid cancellation body: {e}")))?
    };

    let booking = ctx.bookings.cancel_booking(&actor, &id, request.cancellation_reason).await?;
    Ok(Json(Envelope::data(booking)))
}
