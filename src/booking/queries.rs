//! Database queries for booking recording.
//!
//! The conflict check, prior-session count, and insert all run on the same
//! transaction so a concurrent checkout for the same slot cannot interleave
//! between check and insert.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::booking::calculators::CommissionSplit;
use crate::error::Result;

use super::models::{Booking, NewBooking, TrainerRate};

/// Find a booking already holding this (trainer, date, start_time) slot,
/// excluding cancelled/refunded rows. Locks the row for the rest of the
/// transaction so the loser of a race waits, then sees the winner's insert.
pub async fn find_blocking_booking(
    conn: &mut PgConnection,
    trainer_id: Uuid,
    session_date: NaiveDate,
    start_time: NaiveTime,
) -> Result<Option<Booking>> {
    let booking = sqlx::query_as::<_, Booking>(
        r#"
        SELECT
            id, trainer_id, parent_id, player_id,
            session_date, start_time, end_time,
            hourly_rate, total_amount, trainer_payout, platform_fee,
            payment_status, status, created_at
        FROM training_bookings
        WHERE trainer_id = $1
          AND session_date = $2
          AND start_time = $3
          AND status <> 'cancelled'
          AND payment_status <> 'refunded'
        LIMIT 1
        FOR UPDATE
        "#,
    )
    .bind(trainer_id)
    .bind(session_date)
    .bind(start_time)
    .fetch_optional(conn)
    .await?;

    Ok(booking)
}

/// Count this parent's prior paid sessions with the trainer. Drives the
/// first-session vs repeat commission share.
pub async fn count_prior_paid_sessions(
    conn: &mut PgConnection,
    trainer_id: Uuid,
    parent_id: Uuid,
) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM training_bookings
        WHERE trainer_id = $1
          AND parent_id = $2
          AND payment_status = 'paid'
        "#,
    )
    .bind(trainer_id)
    .bind(parent_id)
    .fetch_one(conn)
    .await?;

    Ok(count)
}

/// Insert the paid booking with its commission fields in one statement.
///
/// A partial unique index on (trainer_id, session_date, start_time) over
/// non-cancelled, non-refunded rows backstops the check-then-insert; the
/// caller maps its violation to the same slot-conflict error.
pub async fn insert_booking(
    conn: &mut PgConnection,
    new: &NewBooking,
    hourly_rate: Decimal,
    split: &CommissionSplit,
) -> Result<Booking> {
    let booking = sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO training_bookings (
            id, trainer_id, parent_id, player_id,
            session_date, start_time, end_time,
            hourly_rate, total_amount, trainer_payout, platform_fee,
            payment_status, status, created_at
        )
        VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
            'paid', 'confirmed', NOW()
        )
        RETURNING
            id, trainer_id, parent_id, player_id,
            session_date, start_time, end_time,
            hourly_rate, total_amount, trainer_payout, platform_fee,
            payment_status, status, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.trainer_id)
    .bind(new.parent_id)
    .bind(new.player_id)
    .bind(new.session_date)
    .bind(new.start_time)
    .bind(new.end_time)
    .bind(hourly_rate)
    .bind(new.amount_charged)
    .bind(split.trainer_payout)
    .bind(split.platform_fee)
    .fetch_one(conn)
    .await?;

    Ok(booking)
}

/// Get a trainer's current rate row.
pub async fn get_trainer_rate(pool: &PgPool, trainer_id: Uuid) -> Result<Option<TrainerRate>> {
    let rate = sqlx::query_as::<_, TrainerRate>(
        r#"
        SELECT trainer_id, hourly_rate, active, updated_at
        FROM trainer_rates
        WHERE trainer_id = $1
          AND active = true
        "#,
    )
    .bind(trainer_id)
    .fetch_optional(pool)
    .await?;

    Ok(rate)
}

/// Get all active trainer rates (for cache warming).
pub async fn get_active_trainer_rates(pool: &PgPool) -> Result<Vec<TrainerRate>> {
    let rates = sqlx::query_as::<_, TrainerRate>(
        r#"
        SELECT trainer_id, hourly_rate, active, updated_at
        FROM trainer_rates
        WHERE active = true
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rates)
}
