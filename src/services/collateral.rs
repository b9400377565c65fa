//! DFI collateral requirement for DUSD loans.
//!
//! A vault taking a DUSD loan must hold at least half of its required
//! collateral in DFI. The required collateral includes the loan being taken.

use rust_decimal::Decimal;

use crate::config::SwapConfig;
use crate::constants::{swap::DFI_COLLATERAL_DIVISOR, tokens};
use crate::models::{ActivePrice, CollateralCheckInput, CollateralToken, PriceKind, PriceUsage};

/// Oracle price of a token as used for vault valuation.
///
/// DUSD is pegged at 1. Collateral prices are scaled by the collateral factor.
pub fn active_price(
    display_symbol: &str,
    price: Option<&ActivePrice>,
    factor: Option<Decimal>,
    kind: PriceKind,
    usage: PriceUsage,
) -> Decimal {
    let factor = match usage {
        PriceUsage::Collateral => factor.unwrap_or(Decimal::ONE),
        PriceUsage::Loan => Decimal::ONE,
    };

    if display_symbol == tokens::DUSD_SYMBOL {
        return factor;
    }

    let amount = price
        .and_then(|p| match kind {
            PriceKind::Active => p.active,
            PriceKind::Next => p.next,
        })
        .unwrap_or(Decimal::ZERO);

    amount * factor
}

/// Checks vaults against the DFI share rule
#[derive(Debug, Clone)]
pub struct CollateralChecker {
    dfi_symbol: String,
    dusd_symbol: String,
}

impl Default for CollateralChecker {
    fn default() -> Self {
        Self::new(tokens::DFI_SYMBOL, tokens::DUSD_SYMBOL)
    }
}

impl CollateralChecker {
    pub fn new(dfi_symbol: impl Into<String>, dusd_symbol: impl Into<String>) -> Self {
        Self {
            dfi_symbol: dfi_symbol.into(),
            dusd_symbol: dusd_symbol.into(),
        }
    }

    /// Checker using the configured fee token as DFI and the configured DUSD symbol
    pub fn from_config(config: &SwapConfig) -> Self {
        Self::new(&config.fee_token_symbol, &config.dusd_symbol)
    }

    /// Value of the vault's DFI collateral at the active collateral price
    pub fn dfi_collateral_value(
        &self,
        input: &CollateralCheckInput,
        collateral_tokens: &[CollateralToken],
    ) -> Decimal {
        let dfi_token = collateral_tokens
            .iter()
            .find(|col| col.token.display_symbol == self.dfi_symbol);

        let dfi_price = active_price(
            &self.dfi_symbol,
            dfi_token.and_then(|t| t.active_price.as_ref()),
            dfi_token.and_then(|t| t.factor),
            PriceKind::Active,
            PriceUsage::Collateral,
        );

        let dfi_amount = input
            .collateral_amounts
            .iter()
            .find(|col| col.display_symbol == self.dfi_symbol)
            .map(|col| col.amount)
            .unwrap_or(Decimal::ZERO);

        dfi_price * dfi_amount
    }

    /// Half of the minimum collateral the loan value requires
    pub fn required_dfi_value(&self, input: &CollateralCheckInput) -> Decimal {
        input.loan_value * input.min_col_ratio
            / Decimal::ONE_HUNDRED
            / Decimal::from(DFI_COLLATERAL_DIVISOR)
    }

    /// True only for DUSD loans whose DFI collateral falls short of half the requirement.
    pub fn is_dfi_less_than_half_of_required_collateral(
        &self,
        input: &CollateralCheckInput,
        collateral_tokens: &[CollateralToken],
    ) -> bool {
        let is_taking_dusd_loan = input.loan_token.token.display_symbol == self.dusd_symbol;
        if !is_taking_dusd_loan {
            return false;
        }

        self.dfi_collateral_value(input, collateral_tokens) < self.required_dfi_value(input)
    }
}
