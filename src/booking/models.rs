//! Database models for training bookings.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Booking lifecycle state: pending -> confirmed -> completed, or cancelled /
/// no_show off the main path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::NoShow => "no_show",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

/// Booking row from training_bookings.
#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub parent_id: Uuid,
    pub player_id: Uuid,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub hourly_rate: Decimal,
    pub total_amount: Decimal,
    pub trainer_payout: Decimal,
    pub platform_fee: Decimal,
    pub payment_status: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Whether this row blocks its (trainer, date, start_time) slot.
    /// Cancelled and refunded bookings free the slot for rebooking.
    pub fn blocks_slot(&self) -> bool {
        self.status != BookingStatus::Cancelled.as_str()
            && self.payment_status != PaymentStatus::Refunded.as_str()
    }
}

/// Fields for a new paid booking, pre-commission.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub trainer_id: Uuid,
    pub parent_id: Uuid,
    pub player_id: Uuid,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub group_size: i32,
    pub sessions: i32,
    pub amount_charged: Decimal,
}

/// Trainer rate row from trainer_rates.
#[derive(Debug, Clone, FromRow)]
pub struct TrainerRate {
    pub trainer_id: Uuid,
    pub hourly_rate: Decimal,
    pub active: bool,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn booking(status: BookingStatus, payment: PaymentStatus) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            trainer_id: Uuid::new_v4(),
            parent_id: Uuid::new_v4(),
            player_id: Uuid::new_v4(),
            session_date: NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
            start_time: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            hourly_rate: dec!(80.00),
            total_amount: dec!(80.00),
            trainer_payout: dec!(40.00),
            platform_fee: dec!(40.00),
            payment_status: payment.as_str().to_string(),
            status: status.as_str().to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_active_bookings_block_their_slot() {
        assert!(booking(BookingStatus::Pending, PaymentStatus::Paid).blocks_slot());
        assert!(booking(BookingStatus::Confirmed, PaymentStatus::Paid).blocks_slot());
        assert!(booking(BookingStatus::Completed, PaymentStatus::Paid).blocks_slot());
    }

    #[test]
    fn test_cancelled_and_refunded_free_the_slot() {
        assert!(!booking(BookingStatus::Cancelled, PaymentStatus::Paid).blocks_slot());
        assert!(!booking(BookingStatus::Confirmed, PaymentStatus::Refunded).blocks_slot());
        assert!(!booking(BookingStatus::Cancelled, PaymentStatus::Refunded).blocks_slot());
    }
}
