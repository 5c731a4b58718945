//! Response DTOs for booking API endpoints.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::models::Booking;

/// Response for a recorded paid booking, including the commission split.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub booking_id: Uuid,
    pub trainer_id: Uuid,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    #[serde(with = "rust_decimal::serde::str")]
    pub hourly_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub trainer_payout: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub platform_fee: Decimal,
    pub is_first_session: bool,
    pub status: String,
    pub payment_status: String,
}

impl BookingResponse {
    pub fn from_booking(booking: &Booking, is_first_session: bool) -> Self {
        Self {
            booking_id: booking.id,
            trainer_id: booking.trainer_id,
            session_date: booking.session_date,
            start_time: booking.start_time,
            hourly_rate: booking.hourly_rate,
            total_amount: booking.total_amount,
            trainer_payout: booking.trainer_payout,
            platform_fee: booking.platform_fee,
            is_first_session,
            status: booking.status.clone(),
            payment_status: booking.payment_status.clone(),
        }
    }
}
