//! Booking route handlers.

use axum::{extract::State, routing::post, Json, Router};

use crate::error::Result;
use crate::AppState;

use super::requests::RecordBookingRequest;
use super::responses::BookingResponse;
use super::services;

/// Booking API router, nested under the app root.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/bookings", post(record_booking))
}

/// Record a paid training booking with its commission split.
///
/// Returns 409 when the slot was taken by a concurrent checkout; the
/// storefront prompts the customer to pick another time.
async fn record_booking(
    State(state): State<AppState>,
    Json(req): Json<RecordBookingRequest>,
) -> Result<Json<BookingResponse>> {
    let recorded = services::record_paid_booking(&state.db, &state.cache, req.into()).await?;

    Ok(Json(BookingResponse::from_booking(
        &recorded.booking,
        recorded.is_first_session,
    )))
}
