//! Swap price and balance formulas.
//!
//! All arithmetic is exact decimal; prices are truncated to eight decimal places
//! so the signed max price never exceeds what the user accepted.

use rust_decimal::Decimal;

use crate::error::{Result, WalletError};
use crate::models::{InstantSwap, ResultingBalances};
use crate::utils::{round_down, DISPLAY_PRECISION};

/// Highest price per destination unit the composite swap may execute at.
///
/// `(amount_from / amount_to) * (1 + slippage)`, rounded down to 8 dp.
///
/// Truncation can swallow the slippage: the result is strictly above the spot
/// price only when `spot * slippage` is at least `0.00000001`. Below that the
/// result is the spot price truncated to 8 dp (1/3 at `0.00000001` gives
/// `0.33333333`).
pub fn max_price(amount_from: Decimal, amount_to: Decimal, slippage: Decimal) -> Result<Decimal> {
    if amount_from <= Decimal::ZERO {
        return Err(WalletError::invalid_amount(format!(
            "source amount must be positive, got {}",
            amount_from
        )));
    }

    if amount_to <= Decimal::ZERO {
        return Err(WalletError::invalid_amount(format!(
            "destination amount must be positive, got {}",
            amount_to
        )));
    }

    validate_slippage(slippage)?;

    let price = amount_from
        .checked_div(amount_to)
        .and_then(|p| p.checked_mul(Decimal::ONE + slippage))
        .ok_or_else(|| WalletError::invalid_amount("price calculation overflowed"))?;

    Ok(round_down(price, DISPLAY_PRECISION))
}

pub fn validate_slippage(slippage: Decimal) -> Result<()> {
    if slippage < Decimal::ZERO || slippage >= Decimal::ONE {
        return Err(WalletError::InvalidSlippage(slippage));
    }
    Ok(())
}

/// Balances after an instant swap, with the fee charged to whichever side holds the fee token.
pub fn resulting_balances(swap: &InstantSwap, fee_token_symbol: &str) -> ResultingBalances {
    let fee_on = |symbol: &str| {
        if symbol == fee_token_symbol {
            swap.estimated_fee
        } else {
            Decimal::ZERO
        }
    };

    let from = swap.token_from.balance_or_zero()
        - swap.amount_from
        - fee_on(&swap.token_from.display_symbol);
    let to = swap.token_to.balance_or_zero() + swap.amount_to - fee_on(&swap.token_to.display_symbol);

    ResultingBalances {
        from: from.max(Decimal::ZERO),
        to: Some(to.max(Decimal::ZERO)),
    }
}

/// Source balance after a future swap locks `amount`; the destination settles later.
pub fn future_swap_resulting_balance(balance: Decimal, amount: Decimal) -> ResultingBalances {
    ResultingBalances {
        from: (balance - amount).max(Decimal::ZERO),
        to: None,
    }
}

/// DEX fees paid along a route, as the gap between the quoted returns.
pub fn total_dex_fees(estimated_return: Decimal, estimated_return_less_dex_fees: Decimal) -> Decimal {
    (estimated_return - estimated_return_less_dex_fees).max(Decimal::ZERO)
}
