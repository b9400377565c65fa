use rust_decimal::prelude::*;

/// Number of decimal places used for on-chain amounts and prices
pub const DISPLAY_PRECISION: u32 = 8;

/// Round towards zero to `dp` decimal places.
pub fn round_down(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::ToZero)
}

/// Render an amount with exactly eight decimal places, truncating any excess.
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = round_down(value, DISPLAY_PRECISION);
    rounded.rescale(DISPLAY_PRECISION);
    rounded.to_string()
}
