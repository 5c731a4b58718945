//! Request DTOs for booking API endpoints.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::models::NewBooking;

/// Request to record a paid training booking. Sent by the storefront after
/// the payment processor confirms the charge.
#[derive(Debug, Deserialize)]
pub struct RecordBookingRequest {
    pub trainer_id: Uuid,
    pub parent_id: Uuid,
    pub player_id: Uuid,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default = "default_group_size")]
    pub group_size: i32,
    #[serde(default = "default_sessions")]
    pub sessions: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount_charged: Decimal,
}

fn default_group_size() -> i32 {
    1
}

fn default_sessions() -> i32 {
    1
}

impl From<RecordBookingRequest> for NewBooking {
    fn from(req: RecordBookingRequest) -> Self {
        NewBooking {
            trainer_id: req.trainer_id,
            parent_id: req.parent_id,
            player_id: req.player_id,
            session_date: req.session_date,
            start_time: req.start_time,
            end_time: req.end_time,
            group_size: req.group_size,
            sessions: req.sessions,
            amount_charged: req.amount_charged,
        }
    }
}
