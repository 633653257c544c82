//! Group-currency conversion.
//!
//! CRITICAL: Rounding strategy for group amounts:
//! - Always round to the group currency's 2 decimal places
//! - Use banker's rounding (round half to even)
//! - Keep both the original and the converted amount on the record

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Decimal places of group-currency amounts.
pub const GROUP_AMOUNT_DECIMALS: u32 = 2;

/// Decimal places of FX rates.
pub const FX_RATE_DECIMALS: u32 = 4;

/// Converts an amount using the given exchange rate.
///
/// Uses banker's rounding (round half to even) to minimize cumulative errors.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal, decimal_places: u32) -> Decimal {
    let converted = amount * rate;
    converted.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

/// Converts a transaction amount into the group currency.
///
/// This is the `Amount_Group_Currency == round(Amount * FX_Rate, 2)` rule
/// shared by the generator and the dataset validator.
#[must_use]
pub fn to_group_currency(amount: Decimal, fx_rate: Decimal) -> Decimal {
    convert_amount(amount, fx_rate, GROUP_AMOUNT_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_convert_amount() {
        // 1000 at 1.2 -> 1200.00
        let result = to_group_currency(dec!(1000), dec!(1.2));
        assert_eq!(result, dec!(1200.00));
    }

    #[test]
    fn test_convert_negative_amount() {
        let result = to_group_currency(dec!(-500), dec!(1.0));
        assert_eq!(result, dec!(-500));
    }

    #[test]
    fn test_convert_with_rounding() {
        // 1234 * 0.98765 = 1218.7601 -> 1218.76
        let result = to_group_currency(dec!(1234), dec!(0.98765));
        assert_eq!(result, dec!(1218.76));
    }

    #[test]
    fn test_bankers_rounding() {
        // 2.5 rounds to 2, 3.5 rounds to 4
        let result1 = convert_amount(dec!(1), dec!(2.5), 0);
        assert_eq!(result1, dec!(2));

        let result2 = convert_amount(dec!(1), dec!(3.5), 0);
        assert_eq!(result2, dec!(4));

        // 1 * 0.125 at 2 places -> 0.12 (half to even)
        assert_eq!(to_group_currency(dec!(1), dec!(0.125)), dec!(0.12));
    }
}
