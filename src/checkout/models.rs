//! Core types for the checkout pricing engine.
//!
//! CartState is an immutable snapshot taken at quote time; CustomerSelections
//! is the per-shopper session state mutated between quotes. Both are inputs
//! to the pure fee composer in `calculators`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Snapshot of the cart at fee-calculation time.
///
/// `base_subtotal` is the pre-discount camp/registration subtotal; add-on
/// fees and discounts never feed back into it within a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartState {
    pub base_subtotal: Decimal,
    pub item_count: i32,
}

/// Multi-camp upgrade selection. Radio semantics: picking one clears the
/// previous pick; `None` means single-camp registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradePack {
    #[default]
    None,
    TwoPack,
    ThreePack,
    AllAccess,
}

/// Per-shopper selection state, held in the session store between AJAX
/// round-trips and read-only during a calculation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSelections {
    pub care_bundle: bool,
    pub jersey: bool,
    pub sibling_count: i32,
    pub is_team: bool,
    pub team_size: i32,
    pub referral_code: Option<String>,
    pub upgrade_pack: UpgradePack,
}

impl Default for CustomerSelections {
    fn default() -> Self {
        Self {
            care_bundle: false,
            jersey: false,
            sibling_count: 1,
            is_team: false,
            team_size: 0,
            referral_code: None,
            upgrade_pack: UpgradePack::None,
        }
    }
}

/// Permitted selection updates. A closed enum so malformed or unknown
/// updates are rejected at the deserialization boundary and no-op, never
/// reaching session state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SelectionUpdate {
    SetCareBundle { selected: bool },
    SetJersey { selected: bool },
    SetSiblingCount { count: i32 },
    SetTeam { is_team: bool, team_size: i32 },
    ApplyReferralCode { code: String },
    ClearReferralCode,
    SetUpgradePack { pack: UpgradePack },
}

impl CustomerSelections {
    /// Merge one update into the selection state.
    ///
    /// Clamps `sibling_count` to >= 1 and `team_size` to >= 0. Setting an
    /// upgrade pack replaces whatever pack was active before.
    pub fn apply(&mut self, update: SelectionUpdate) {
        match update {
            SelectionUpdate::SetCareBundle { selected } => self.care_bundle = selected,
            SelectionUpdate::SetJersey { selected } => self.jersey = selected,
            SelectionUpdate::SetSiblingCount { count } => {
                self.sibling_count = count.max(1);
            }
            SelectionUpdate::SetTeam { is_team, team_size } => {
                self.is_team = is_team;
                self.team_size = if is_team { team_size.max(0) } else { 0 };
            }
            SelectionUpdate::ApplyReferralCode { code } => {
                self.referral_code = Some(code);
            }
            SelectionUpdate::ClearReferralCode => self.referral_code = None,
            SelectionUpdate::SetUpgradePack { pack } => self.upgrade_pack = pack,
        }
    }
}

/// One labeled line in the charge breakdown. Negative amounts are discounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeLineItem {
    pub label: String,
    pub amount: Decimal,
}

/// Full charge breakdown for one calculation pass. Recomputed from scratch
/// on every quote; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeBreakdown {
    pub line_items: Vec<FeeLineItem>,
    pub final_total: Decimal,
}

impl ChargeBreakdown {
    /// Amount to send to the payment processor: final total in integer
    /// minor-currency units (cents).
    pub fn amount_minor_units(&self) -> i64 {
        use rust_decimal::prelude::ToPrimitive;
        (self.final_total * Decimal::from(100))
            .round()
            .to_i64()
            .unwrap_or(0)
    }
}

/// Referral code row from referral_codes.
#[derive(Debug, Clone, FromRow)]
pub struct Referral {
    pub code: String,
    pub uses: i32,
    pub created_at: DateTime<Utc>,
}

/// Maximum redemptions per referral code.
pub const REFERRAL_USE_CAP: i32 = 10;

impl Referral {
    /// A code is redeemable while it has remaining uses.
    pub fn is_redeemable(&self) -> bool {
        self.uses < REFERRAL_USE_CAP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_clamps_sibling_count() {
        let mut sel = CustomerSelections::default();
        sel.apply(SelectionUpdate::SetSiblingCount { count: 0 });
        assert_eq!(sel.sibling_count, 1);
        sel.apply(SelectionUpdate::SetSiblingCount { count: -3 });
        assert_eq!(sel.sibling_count, 1);
        sel.apply(SelectionUpdate::SetSiblingCount { count: 4 });
        assert_eq!(sel.sibling_count, 4);
    }

    #[test]
    fn test_apply_upgrade_pack_radio_semantics() {
        let mut sel = CustomerSelections::default();
        sel.apply(SelectionUpdate::SetUpgradePack {
            pack: UpgradePack::TwoPack,
        });
        assert_eq!(sel.upgrade_pack, UpgradePack::TwoPack);

        // Picking another pack replaces the first, never stacks
        sel.apply(SelectionUpdate::SetUpgradePack {
            pack: UpgradePack::ThreePack,
        });
        assert_eq!(sel.upgrade_pack, UpgradePack::ThreePack);

        sel.apply(SelectionUpdate::SetUpgradePack {
            pack: UpgradePack::None,
        });
        assert_eq!(sel.upgrade_pack, UpgradePack::None);
    }

    #[test]
    fn test_apply_team_clears_size_when_disabled() {
        let mut sel = CustomerSelections::default();
        sel.apply(SelectionUpdate::SetTeam {
            is_team: true,
            team_size: 12,
        });
        assert!(sel.is_team);
        assert_eq!(sel.team_size, 12);

        sel.apply(SelectionUpdate::SetTeam {
            is_team: false,
            team_size: 12,
        });
        assert!(!sel.is_team);
        assert_eq!(sel.team_size, 0);
    }

    #[test]
    fn test_unknown_update_rejected_at_boundary() {
        // Unknown ops fail to deserialize; the handler treats that as a no-op
        let bad = serde_json::json!({ "op": "set_vip_lounge", "selected": true });
        assert!(serde_json::from_value::<SelectionUpdate>(bad).is_err());

        let good = serde_json::json!({ "op": "set_jersey", "selected": true });
        let update: SelectionUpdate = serde_json::from_value(good).unwrap();
        assert_eq!(update, SelectionUpdate::SetJersey { selected: true });
    }

    #[test]
    fn test_referral_redeemable_below_cap() {
        let referral = Referral {
            code: "SPRING25".to_string(),
            uses: 9,
            created_at: Utc::now(),
        };
        assert!(referral.is_redeemable());

        let exhausted = Referral {
            uses: 10,
            ..referral
        };
        assert!(!exhausted.is_redeemable());
    }
}
