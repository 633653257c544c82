//! Property-based tests for group-currency conversion.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::conversion::{FX_RATE_DECIMALS, convert_amount, to_group_currency};

/// Strategy for whole-number amounts as the generator draws them.
fn ledger_amount() -> impl Strategy<Value = Decimal> {
    (-3_000i64..5_000i64).prop_map(Decimal::from)
}

/// Strategy for FX rates in [0.5, 1.5) at 4 decimals.
fn fx_rate() -> impl Strategy<Value = Decimal> {
    (5_000i64..15_000i64).prop_map(|v| Decimal::new(v, FX_RATE_DECIMALS))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Group amounts never carry more than 2 decimal places.
    #[test]
    fn prop_group_amount_has_two_decimals(amount in ledger_amount(), rate in fx_rate()) {
        let result = to_group_currency(amount, rate);
        prop_assert!(result.scale() <= 2);
        prop_assert_eq!(result, result.round_dp(2));
    }

    /// Rounding moves the exact product by at most half a cent.
    #[test]
    fn prop_rounding_error_bounded(amount in ledger_amount(), rate in fx_rate()) {
        let exact = amount * rate;
        let diff = (to_group_currency(amount, rate) - exact).abs();
        prop_assert!(diff <= Decimal::new(5, 3));
    }

    /// Conversion is symmetric in sign.
    #[test]
    fn prop_negation_commutes(amount in ledger_amount(), rate in fx_rate()) {
        prop_assert_eq!(to_group_currency(-amount, rate), -to_group_currency(amount, rate));
    }

    /// Converting at rate 1 keeps the amount.
    #[test]
    fn prop_unit_rate_is_identity(amount in ledger_amount(), dp in 0u32..=4) {
        prop_assert_eq!(convert_amount(amount, Decimal::ONE, dp), amount);
    }
}
