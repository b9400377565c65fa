// Utility functions
// Decimal rounding and amount formatting

pub mod math;

pub use math::{format_amount, round_down, DISPLAY_PRECISION};
