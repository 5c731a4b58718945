//! Checkout quote service with database and session access.
//!
//! Bridges the stateful edges (session store, referral table, cart
//! classification) to the pure composer in `calculators`.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::session::SessionStore;

use super::calculators::{compose_breakdown, ALL_ACCESS_PRICE};
use super::models::{
    CartState, ChargeBreakdown, CustomerSelections, SelectionUpdate, UpgradePack,
};
use super::queries;
use super::requests::{CartItemRequest, CartRequest};

/// Product keywords that classify a cart as a camp checkout. Carts with no
/// matching item skip the fee composer entirely.
const CAMP_KEYWORDS: &[&str] = &["camp", "clinic"];

/// Outcome of a referral-code entry attempt within one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferralOutcome {
    NotAttempted,
    Accepted,
    Rejected,
}

/// Result of one quote pass.
#[derive(Debug)]
pub struct QuoteOutcome {
    pub cart: CartState,
    pub camp_checkout: bool,
    pub breakdown: ChargeBreakdown,
    pub selections: CustomerSelections,
    pub referral: ReferralOutcome,
}

/// Result of checkout completion.
#[derive(Debug)]
pub struct CompleteOutcome {
    pub session_cleared: bool,
    pub referral_redeemed: bool,
}

/// Classify a cart by product category or name match.
pub fn is_camp_checkout(items: &[CartItemRequest]) -> bool {
    items.iter().any(|item| {
        let name = item.name.to_lowercase();
        let category = item.category.to_lowercase();
        CAMP_KEYWORDS
            .iter()
            .any(|kw| name.contains(kw) || category.contains(kw))
    })
}

/// Apply an optional selection update for this shopper, then recompute the
/// charge breakdown from scratch.
///
/// Referral codes get user-visible validation only at entry time: an invalid
/// code is rejected here and never stored. Codes already in the session that
/// have since gone stale (cap reached) are silently cleared before the
/// composer runs - the recompute itself never errors on a bad code.
pub async fn apply_and_quote(
    pool: &PgPool,
    sessions: &SessionStore,
    session_id: Uuid,
    cart_req: &CartRequest,
    update: Option<SelectionUpdate>,
) -> Result<QuoteOutcome> {
    let cart = CartState {
        base_subtotal: cart_req.base_subtotal,
        item_count: cart_req.items.len() as i32,
    };
    let camp_checkout = is_camp_checkout(&cart_req.items);

    let mut selections = sessions.get_or_default(session_id).await;
    let mut referral = ReferralOutcome::NotAttempted;

    if let Some(update) = update {
        match update {
            SelectionUpdate::ApplyReferralCode { code } => {
                if referral_is_valid(pool, &code).await? {
                    selections.apply(SelectionUpdate::ApplyReferralCode { code });
                    referral = ReferralOutcome::Accepted;
                } else {
                    debug!(%code, "referral code rejected at entry");
                    referral = ReferralOutcome::Rejected;
                }
            }
            other => selections.apply(other),
        }
    }

    // Stale codes contribute no discount; clear them without surfacing an
    // error on recompute.
    if let Some(code) = selections.referral_code.clone() {
        if !referral_is_valid(pool, &code).await? {
            debug!(%code, "stale referral code cleared from session");
            selections.referral_code = None;
        }
    }

    sessions.insert(session_id, selections.clone()).await;

    let breakdown = if camp_checkout {
        if selections.upgrade_pack == UpgradePack::AllAccess
            && ALL_ACCESS_PRICE - cart.base_subtotal <= Decimal::ZERO
        {
            debug!(
                base_subtotal = %cart.base_subtotal,
                "all-access increment non-positive, charged as-is"
            );
        }
        compose_breakdown(&cart, &selections)
    } else {
        ChargeBreakdown {
            line_items: Vec::new(),
            final_total: cart.base_subtotal,
        }
    };

    Ok(QuoteOutcome {
        cart,
        camp_checkout,
        breakdown,
        selections,
        referral,
    })
}

/// Finish a checkout: redeem the session's referral code (if any) and drop
/// the session state.
pub async fn complete_checkout(
    pool: &PgPool,
    sessions: &SessionStore,
    session_id: Uuid,
) -> Result<CompleteOutcome> {
    let selections = sessions.get(session_id).await;

    let mut referral_redeemed = false;
    if let Some(code) = selections.as_ref().and_then(|s| s.referral_code.clone()) {
        match queries::redeem_referral(pool, &code).await? {
            Some(uses) => {
                info!(%code, uses, "referral code redeemed");
                referral_redeemed = true;
            }
            // A concurrent checkout took the last use between quote and
            // completion; the order keeps its quoted discount.
            None => warn!(%code, "referral code hit its cap before redemption"),
        }
    }

    sessions.remove(session_id).await;

    Ok(CompleteOutcome {
        session_cleared: selections.is_some(),
        referral_redeemed,
    })
}

async fn referral_is_valid(pool: &PgPool, code: &str) -> Result<bool> {
    Ok(queries::find_referral(pool, code)
        .await?
        .map(|r| r.is_redeemable())
        .unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, category: &str) -> CartItemRequest {
        CartItemRequest {
            name: name.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_camp_checkout_by_category() {
        let items = vec![item("Summer Session Week 3", "Basketball Camps")];
        assert!(is_camp_checkout(&items));
    }

    #[test]
    fn test_camp_checkout_by_name() {
        let items = vec![item("Elite Shooting Clinic", "Events")];
        assert!(is_camp_checkout(&items));
    }

    #[test]
    fn test_non_camp_cart_skips_classification() {
        let items = vec![item("Water Bottle", "Merchandise")];
        assert!(!is_camp_checkout(&items));
        assert!(!is_camp_checkout(&[]));
    }

    #[test]
    fn test_camp_checkout_mixed_cart() {
        // One qualifying item is enough
        let items = vec![
            item("Water Bottle", "Merchandise"),
            item("Spring Break Camp", "Camps"),
        ];
        assert!(is_camp_checkout(&items));
    }
}
