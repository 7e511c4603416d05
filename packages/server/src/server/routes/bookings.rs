//! Booking listing and self-service cancellation.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::common::{ApiError, ApiResult};
use crate::domains::bookings::{Booking, BookingData, CancelOutcome};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct BookingsQuery {
    pub user_email: Option<String>,
}

/// List a user's bookings, newest start first
pub async fn list_bookings_handler(
    State(state): State<AppState>,
    Query(query): Query<BookingsQuery>,
) -> ApiResult<Json<Vec<BookingData>>> {
    let user_email = query
        .user_email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("user_email is required".to_string()))?;

    let bookings = Booking::find_by_user_email(&user_email, &state.deps.db_pool)
        .await
        .map_err(ApiError::store)?;

    Ok(Json(bookings.into_iter().map(BookingData::from).collect()))
}

/// Cancel a booking by its payment id
///
/// Only allowed while the booking starts more than 24 hours from now. The
/// payment itself is not refunded here; refunds are an operational process.
pub async fn cancel_booking_handler(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let outcome = Booking::cancel(&payment_id, Utc::now(), &state.deps.db_pool)
        .await
        .map_err(ApiError::store)?;

    match outcome {
        CancelOutcome::Cancelled => {
            tracing::info!(payment_id = %payment_id, "booking cancelled");
            Ok(Json(json!({ "ok": true })))
        }
        CancelOutcome::TooLate => Err(ApiError::Conflict(
            "bookings can only be cancelled at least 24 hours before they start".to_string(),
        )),
        CancelOutcome::NotFound => Err(ApiError::NotFound("booking")),
    }
}
