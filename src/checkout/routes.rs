//! Checkout route handlers.

use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::AppState;

use super::models::SelectionUpdate;
use super::requests::{QuoteRequest, UpdateSelectionsRequest};
use super::responses::{BreakdownResponse, CompleteResponse};
use super::services;

/// Checkout API router, nested under the app root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/checkout/:session_id/selections", post(update_selections))
        .route("/api/checkout/:session_id/quote", post(quote))
        .route("/api/checkout/:session_id/complete", post(complete))
}

/// Apply one selection update, then return the recalculated breakdown.
///
/// Unknown or malformed updates are absorbed as no-ops: the shopper still
/// gets a fresh quote, never an error.
async fn update_selections(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<UpdateSelectionsRequest>,
) -> Result<Json<BreakdownResponse>> {
    let update = match serde_json::from_value::<SelectionUpdate>(req.update.clone()) {
        Ok(update) => Some(update),
        Err(err) => {
            debug!(%session_id, %err, "ignoring unrecognized selection update");
            None
        }
    };

    let outcome =
        services::apply_and_quote(&state.db, &state.sessions, session_id, &req.cart, update)
            .await?;

    Ok(Json(BreakdownResponse::from_breakdown(
        outcome.cart.base_subtotal,
        outcome.camp_checkout,
        &outcome.breakdown,
        outcome.selections,
        outcome.referral,
    )))
}

/// Recalculate the quote from current session state without changing it.
async fn quote(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<BreakdownResponse>> {
    let outcome =
        services::apply_and_quote(&state.db, &state.sessions, session_id, &req.cart, None).await?;

    Ok(Json(BreakdownResponse::from_breakdown(
        outcome.cart.base_subtotal,
        outcome.camp_checkout,
        &outcome.breakdown,
        outcome.selections,
        outcome.referral,
    )))
}

/// Finish checkout: redeem the referral code and clear the session.
async fn complete(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CompleteResponse>> {
    let outcome = services::complete_checkout(&state.db, &state.sessions, session_id).await?;

    Ok(Json(CompleteResponse {
        session_cleared: outcome.session_cleared,
        referral_redeemed: outcome.referral_redeemed,
    }))
}
