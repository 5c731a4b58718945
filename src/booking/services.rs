//! Booking recording service.
//!
//! Invoked once per paid training booking, after the payment processor has
//! captured the charge. Wraps the slot-conflict check, the prior-session
//! lookup, the commission split, and the insert in a single transaction.

use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::cache::AppCache;
use crate::error::{AppError, Result};

use super::calculators::split_commission;
use super::models::{Booking, NewBooking, TrainerRate};
use super::queries;

/// Result of recording a paid booking.
#[derive(Debug)]
pub struct BookingRecorded {
    pub booking: Booking,
    pub is_first_session: bool,
}

/// Record a paid booking with its commission split.
///
/// The conflict check and the insert share one transaction, so of two
/// concurrent checkouts for the same (trainer, date, start_time) slot
/// exactly one commits; the other rolls back cleanly with
/// `SlotUnavailable`. Because the customer has already paid at this point,
/// a conflict here is also a paid-but-unbooked event: it is logged at error
/// level for support reconciliation, never auto-retried.
pub async fn record_paid_booking(
    pool: &PgPool,
    cache: &AppCache,
    new: NewBooking,
) -> Result<BookingRecorded> {
    if new.sessions < 1 {
        return Err(AppError::Validation(
            "sessions must be at least 1".to_string(),
        ));
    }
    if new.amount_charged < Decimal::ZERO {
        return Err(AppError::Validation(
            "amount_charged cannot be negative".to_string(),
        ));
    }

    let rate = lookup_trainer_rate(pool, cache, &new).await?;

    let mut tx = pool.begin().await?;

    if let Some(existing) =
        queries::find_blocking_booking(&mut *tx, new.trainer_id, new.session_date, new.start_time)
            .await?
    {
        // Payment already captured: flag for manual reconciliation, distinct
        // from a payment failure.
        error!(
            trainer_id = %new.trainer_id,
            session_date = %new.session_date,
            start_time = %new.start_time,
            existing_booking = %existing.id,
            "paid booking lost its slot; manual reconciliation required"
        );
        return Err(AppError::SlotUnavailable);
    }

    let prior_paid =
        queries::count_prior_paid_sessions(&mut *tx, new.trainer_id, new.parent_id).await?;

    let split = split_commission(
        rate.hourly_rate,
        new.group_size,
        new.sessions,
        prior_paid,
        new.amount_charged,
    );

    if split.platform_fee < Decimal::ZERO {
        // Platform subsidizes heavily discounted sessions; persisted as-is
        // and flagged for business review.
        warn!(
            trainer_id = %new.trainer_id,
            platform_fee = %split.platform_fee,
            amount_charged = %new.amount_charged,
            "negative platform fee on paid booking"
        );
    }

    let booking = match queries::insert_booking(&mut *tx, &new, rate.hourly_rate, &split).await {
        Ok(booking) => booking,
        // The partial unique index caught a race the FOR UPDATE check
        // missed; same outcome as a failed pre-check.
        Err(AppError::Database(err)) if is_unique_violation(&err) => {
            error!(
                trainer_id = %new.trainer_id,
                session_date = %new.session_date,
                start_time = %new.start_time,
                "paid booking lost slot race at insert; manual reconciliation required"
            );
            return Err(AppError::SlotUnavailable);
        }
        Err(err) => return Err(err),
    };

    tx.commit().await?;

    info!(
        booking_id = %booking.id,
        trainer_payout = %booking.trainer_payout,
        platform_fee = %booking.platform_fee,
        first_session = split.is_first_session,
        "paid booking recorded"
    );

    Ok(BookingRecorded {
        booking,
        is_first_session: split.is_first_session,
    })
}

/// Trainer rate lookup, cache first. Rates are read-mostly; the cache TTL
/// bounds staleness.
async fn lookup_trainer_rate(
    pool: &PgPool,
    cache: &AppCache,
    new: &NewBooking,
) -> Result<Arc<TrainerRate>> {
    if let Some(rate) = cache.trainer_rates.get(&new.trainer_id).await {
        return Ok(rate);
    }

    let rate = queries::get_trainer_rate(pool, new.trainer_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let rate = Arc::new(rate);
    cache
        .trainer_rates
        .insert(new.trainer_id, rate.clone())
        .await;

    Ok(rate)
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "23505")
        .unwrap_or(false)
}
