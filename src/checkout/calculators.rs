//! Core fee calculation functions.
//!
//! Pure functions for checkout pricing math - no database access. Discounts
//! and add-on charges are expressed as rules over (cart, selections, running
//! subtotal); the composer folds them in a fixed order so that each step's
//! rounding lands exactly where the storefront displays it.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::models::{CartState, ChargeBreakdown, CustomerSelections, FeeLineItem, UpgradePack};

/// Round a money amount to 2 decimal places, half away from zero.
///
/// Every discount and fee step rounds independently before joining the
/// running subtotal - displayed totals depend on this, so no deferred or
/// batch rounding anywhere in the composer.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use courtside_web::checkout::round_money;
///
/// assert_eq!(round_money(dec!(8.695)), dec!(8.70));
/// assert_eq!(round_money(dec!(1.234)), dec!(1.23));
/// assert_eq!(round_money(dec!(-2.505)), dec!(-2.51));
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Flat charge for the combined before/after-care bundle. Replaces the two
/// separate 45.00 care fees, so the bundle price bakes in a 15.00 discount.
pub const CARE_BUNDLE_FEE: Decimal = dec!(60.00);

/// Flat jersey charge, down from the 75.00 nominal price.
pub const JERSEY_FEE: Decimal = dec!(50.00);

/// Flat referral discount, independent of subtotal size.
pub const REFERRAL_DISCOUNT: Decimal = dec!(25.00);

/// All-access package price; the cart's camp price is credited against it.
pub const ALL_ACCESS_PRICE: Decimal = dec!(4000.00);

/// Sibling discount rate applied per additional camper.
const SIBLING_RATE: Decimal = dec!(0.10);

/// Card processing surcharge: rate on the adjusted subtotal plus a flat part.
const PROCESSING_RATE: Decimal = dec!(0.03);
const PROCESSING_FLAT: Decimal = dec!(0.30);

/// Team discount tiers as (minimum team size, percent off), ascending.
const TEAM_TIERS: &[(i32, i64)] = &[(5, 10), (10, 15), (15, 20)];

/// A fee rule: reads the cart snapshot, the selections, and the running
/// subtotal accumulated by earlier rules, and yields a line item or nothing.
pub type FeeRule = fn(&CartState, &CustomerSelections, Decimal) -> Option<FeeLineItem>;

/// Percent off for a declared team size: largest tier threshold <= size wins.
pub fn team_discount_pct(team_size: i32) -> i64 {
    let mut pct = 0;
    for &(threshold, tier_pct) in TEAM_TIERS {
        if team_size >= threshold {
            pct = tier_pct;
        }
    }
    pct
}

fn care_bundle_rule(
    _cart: &CartState,
    selections: &CustomerSelections,
    _running: Decimal,
) -> Option<FeeLineItem> {
    if !selections.care_bundle {
        return None;
    }
    Some(FeeLineItem {
        label: "Before & After Care Bundle".to_string(),
        amount: CARE_BUNDLE_FEE,
    })
}

fn jersey_rule(
    _cart: &CartState,
    selections: &CustomerSelections,
    _running: Decimal,
) -> Option<FeeLineItem> {
    if !selections.jersey {
        return None;
    }
    Some(FeeLineItem {
        label: "Team Jersey".to_string(),
        amount: JERSEY_FEE,
    })
}

/// Sibling discount: 10% of the per-camper price for each camper beyond the
/// first. The per-camper denominator is the cart's base subtotal, not the
/// post-add-on running subtotal (add-on fees never feed the item subtotal).
/// Mutually exclusive with the team discount.
fn sibling_discount_rule(
    cart: &CartState,
    selections: &CustomerSelections,
    _running: Decimal,
) -> Option<FeeLineItem> {
    if selections.is_team || selections.sibling_count <= 1 {
        return None;
    }
    let per_camper = cart.base_subtotal / Decimal::from(selections.sibling_count);
    let extra_campers = Decimal::from(selections.sibling_count - 1);
    let discount = round_money(per_camper * extra_campers * SIBLING_RATE);
    Some(FeeLineItem {
        label: format!("Sibling Discount ({} campers)", selections.sibling_count),
        amount: -discount,
    })
}

fn team_discount_rule(
    cart: &CartState,
    selections: &CustomerSelections,
    _running: Decimal,
) -> Option<FeeLineItem> {
    if !selections.is_team {
        return None;
    }
    let pct = team_discount_pct(selections.team_size);
    if pct == 0 {
        return None;
    }
    let discount = round_money(cart.base_subtotal * Decimal::from(pct) / Decimal::from(100));
    Some(FeeLineItem {
        label: format!("Team Discount ({}% off)", pct),
        amount: -discount,
    })
}

/// Flat referral discount. The composer only ever sees a validated code:
/// the quote service clears stale or invalid codes before composing, so a
/// present code always discounts.
fn referral_discount_rule(
    _cart: &CartState,
    selections: &CustomerSelections,
    _running: Decimal,
) -> Option<FeeLineItem> {
    selections.referral_code.as_ref()?;
    Some(FeeLineItem {
        label: "Referral Discount".to_string(),
        amount: -REFERRAL_DISCOUNT,
    })
}

/// Multi-camp upgrade charge. AllAccess credits the camp already in the
/// cart against the package price and is deliberately unguarded: a base
/// subtotal near the package price yields a near-zero or negative increment.
fn upgrade_pack_rule(
    cart: &CartState,
    selections: &CustomerSelections,
    _running: Decimal,
) -> Option<FeeLineItem> {
    let (label, amount) = match selections.upgrade_pack {
        UpgradePack::None => return None,
        UpgradePack::TwoPack => (
            "2-Camp Pack (2nd camp 10% off)",
            round_money(cart.base_subtotal * dec!(0.90)),
        ),
        UpgradePack::ThreePack => (
            "3-Camp Pack (added camps 20% off)",
            round_money(cart.base_subtotal * Decimal::from(2) * dec!(0.80)),
        ),
        UpgradePack::AllAccess => (
            "All-Access Summer Pass",
            round_money(ALL_ACCESS_PRICE - cart.base_subtotal),
        ),
    };
    Some(FeeLineItem {
        label: label.to_string(),
        amount,
    })
}

/// Card processing surcharge on the fully adjusted subtotal. Always applied,
/// never waived.
fn processing_fee(running: Decimal) -> FeeLineItem {
    FeeLineItem {
        label: "Card Processing Fee".to_string(),
        amount: round_money(running * PROCESSING_RATE + PROCESSING_FLAT),
    }
}

/// Discount and add-on rules in display order. The order is load-bearing:
/// each rule sees the running subtotal left by the ones before it, and the
/// processing fee closes every pass.
const FEE_RULES: &[FeeRule] = &[
    care_bundle_rule,
    jersey_rule,
    sibling_discount_rule,
    team_discount_rule,
    referral_discount_rule,
    upgrade_pack_rule,
];

/// Compose the full charge breakdown for a camp checkout.
///
/// Folds the rule list over the running subtotal, then applies the
/// processing surcharge last. Pure and idempotent: the same cart and
/// selections always produce the same breakdown.
pub fn compose_breakdown(cart: &CartState, selections: &CustomerSelections) -> ChargeBreakdown {
    let mut line_items = Vec::with_capacity(FEE_RULES.len() + 1);
    let mut running = cart.base_subtotal;

    for rule in FEE_RULES {
        if let Some(item) = rule(cart, selections, running) {
            running += item.amount;
            line_items.push(item);
        }
    }

    let fee = processing_fee(running);
    running += fee.amount;
    line_items.push(fee);

    ChargeBreakdown {
        line_items,
        final_total: running,
    }
}
