//! Commission split calculation.
//!
//! Pure functions - no database access. Given a trainer's base rate and the
//! booking shape, splits the amount the customer actually paid between the
//! trainer payout and the platform's residual fee.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::checkout::round_money;

/// Trainer share of a customer's first paid session with them. Lower because
/// the platform absorbs the acquisition cost.
const FIRST_SESSION_SHARE: Decimal = dec!(0.50);

/// Trainer share of repeat sessions.
const REPEAT_SESSION_SHARE: Decimal = dec!(0.75);

/// Rate multiplier for small-group sessions. Out-of-range group sizes fall
/// back to the solo multiplier.
pub fn group_multiplier(group_size: i32) -> Decimal {
    match group_size {
        2 => dec!(1.6),
        3 => dec!(2),
        4 => dec!(2.4),
        _ => Decimal::ONE,
    }
}

/// Computed commission split for one paid booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommissionSplit {
    pub effective_rate: Decimal,
    pub is_first_session: bool,
    pub trainer_payout: Decimal,
    pub platform_fee: Decimal,
}

/// Split a paid booking's charged amount between trainer and platform.
///
/// The platform fee is a residual, never computed independently, so
/// `trainer_payout + platform_fee == amount_charged` holds to the cent. It
/// can go negative when the charged amount carries heavy promotional
/// discounts; that is accepted business behavior and left uncorrected.
pub fn split_commission(
    trainer_base_rate: Decimal,
    group_size: i32,
    sessions: i32,
    previous_paid_sessions: i64,
    amount_charged: Decimal,
) -> CommissionSplit {
    let effective_rate = trainer_base_rate * group_multiplier(group_size);
    let is_first_session = previous_paid_sessions == 0;
    let share = if is_first_session {
        FIRST_SESSION_SHARE
    } else {
        REPEAT_SESSION_SHARE
    };

    let trainer_payout = round_money(effective_rate * Decimal::from(sessions) * share);
    let platform_fee = round_money(amount_charged - trainer_payout);

    CommissionSplit {
        effective_rate,
        is_first_session,
        trainer_payout,
        platform_fee,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_multiplier_table() {
        assert_eq!(group_multiplier(1), dec!(1));
        assert_eq!(group_multiplier(2), dec!(1.6));
        assert_eq!(group_multiplier(3), dec!(2));
        assert_eq!(group_multiplier(4), dec!(2.4));
    }

    #[test]
    fn test_group_multiplier_out_of_range_defaults_to_solo() {
        assert_eq!(group_multiplier(0), dec!(1));
        assert_eq!(group_multiplier(-1), dec!(1));
        assert_eq!(group_multiplier(5), dec!(1));
    }

    #[test]
    fn test_first_session_pays_half_share() {
        // 80/hr solo, 2 sessions, first booking: payout = 80 * 2 * 0.50
        let split = split_commission(dec!(80.00), 1, 2, 0, dec!(160.00));
        assert!(split.is_first_session);
        assert_eq!(split.trainer_payout, dec!(80.00));
        assert_eq!(split.platform_fee, dec!(80.00));
    }

    #[test]
    fn test_repeat_session_pays_three_quarter_share() {
        let split = split_commission(dec!(80.00), 1, 2, 3, dec!(160.00));
        assert!(!split.is_first_session);
        assert_eq!(split.trainer_payout, dec!(120.00));
        assert_eq!(split.platform_fee, dec!(40.00));
    }

    #[test]
    fn test_group_rate_scales_payout() {
        // 60/hr, group of 3 -> effective 120/hr; 1 session repeat -> 90.00
        let split = split_commission(dec!(60.00), 3, 1, 1, dec!(120.00));
        assert_eq!(split.effective_rate, dec!(120.00));
        assert_eq!(split.trainer_payout, dec!(90.00));
        assert_eq!(split.platform_fee, dec!(30.00));
    }

    #[test]
    fn test_split_sums_to_amount_charged() {
        let cases = [
            (dec!(75.00), 1, 1, 0, dec!(75.00)),
            (dec!(75.00), 2, 3, 5, dec!(310.00)),
            (dec!(99.99), 4, 2, 0, dec!(401.13)),
            (dec!(55.55), 3, 5, 12, dec!(500.01)),
        ];
        for (rate, group, sessions, prior, charged) in cases {
            let split = split_commission(rate, group, sessions, prior, charged);
            assert_eq!(
                split.trainer_payout + split.platform_fee,
                charged,
                "split must sum to the charged amount exactly"
            );
        }
    }

    #[test]
    fn test_heavy_discount_yields_negative_platform_fee() {
        // Customer paid 50 after promos, but the repeat payout is 60:
        // the platform subsidizes the session. Accepted, not corrected.
        let split = split_commission(dec!(80.00), 1, 1, 4, dec!(50.00));
        assert_eq!(split.trainer_payout, dec!(60.00));
        assert_eq!(split.platform_fee, dec!(-10.00));
        assert_eq!(split.trainer_payout + split.platform_fee, dec!(50.00));
    }

    #[test]
    fn test_payout_rounds_at_split_time() {
        // 33.33/hr * 1.6 = 53.328; * 1 session * 0.75 = 39.996 -> 40.00
        let split = split_commission(dec!(33.33), 2, 1, 2, dec!(53.33));
        assert_eq!(split.trainer_payout, dec!(40.00));
        assert_eq!(split.platform_fee, dec!(13.33));
    }
}
