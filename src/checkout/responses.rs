//! Response DTOs for checkout API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::models::{ChargeBreakdown, CustomerSelections};
use super::services::ReferralOutcome;

/// One labeled line in the rendered order summary. Negative = discount.
#[derive(Debug, Clone, Serialize)]
pub struct LineItemResponse {
    pub label: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// Referral entry feedback. Only meaningful on the request that applied the
/// code; recomputes never re-surface a rejection.
#[derive(Debug, Serialize)]
pub struct ReferralResponse {
    pub accepted: bool,
    pub message: Option<String>,
}

/// Full quote response: ordered line items, final total, and the amount to
/// hand the payment processor in integer minor units.
#[derive(Debug, Serialize)]
pub struct BreakdownResponse {
    pub camp_checkout: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_subtotal: Decimal,
    pub line_items: Vec<LineItemResponse>,
    #[serde(with = "rust_decimal::serde::str")]
    pub final_total: Decimal,
    pub amount_minor_units: i64,
    pub selections: CustomerSelections,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral: Option<ReferralResponse>,
}

impl BreakdownResponse {
    pub fn from_breakdown(
        base_subtotal: Decimal,
        camp_checkout: bool,
        breakdown: &ChargeBreakdown,
        selections: CustomerSelections,
        referral: ReferralOutcome,
    ) -> Self {
        let referral = match referral {
            ReferralOutcome::NotAttempted => None,
            ReferralOutcome::Accepted => Some(ReferralResponse {
                accepted: true,
                message: None,
            }),
            ReferralOutcome::Rejected => Some(ReferralResponse {
                accepted: false,
                message: Some(
                    "That referral code is invalid or has reached its redemption limit."
                        .to_string(),
                ),
            }),
        };

        Self {
            camp_checkout,
            base_subtotal,
            line_items: breakdown
                .line_items
                .iter()
                .map(|li| LineItemResponse {
                    label: li.label.clone(),
                    amount: li.amount,
                })
                .collect(),
            final_total: breakdown.final_total,
            amount_minor_units: breakdown.amount_minor_units(),
            selections,
            referral,
        }
    }
}

/// Response for checkout completion.
#[derive(Debug, Serialize)]
pub struct CompleteResponse {
    pub session_cleared: bool,
    pub referral_redeemed: bool,
}
