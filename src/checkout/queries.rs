//! Database queries for referral codes.

use sqlx::PgPool;

use crate::error::Result;

use super::models::{Referral, REFERRAL_USE_CAP};

/// Look up a referral code by its exact code string.
pub async fn find_referral(pool: &PgPool, code: &str) -> Result<Option<Referral>> {
    let referral = sqlx::query_as::<_, Referral>(
        r#"
        SELECT code, uses, created_at
        FROM referral_codes
        WHERE code = $1
        "#,
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;

    Ok(referral)
}

/// Redeem one use of a referral code, atomically enforcing the use cap.
///
/// The conditional UPDATE means two concurrent redemptions of a code with
/// one use left can never both succeed. Returns the new use count, or None
/// if the code was missing or already at the cap.
pub async fn redeem_referral(pool: &PgPool, code: &str) -> Result<Option<i32>> {
    let uses = sqlx::query_scalar::<_, i32>(
        r#"
        UPDATE referral_codes
        SET uses = uses + 1
        WHERE code = $1
          AND uses < $2
        RETURNING uses
        "#,
    )
    .bind(code)
    .bind(REFERRAL_USE_CAP)
    .fetch_optional(pool)
    .await?;

    Ok(uses)
}
