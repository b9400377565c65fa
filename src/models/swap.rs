use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::labels;

/// Token taking part in a swap, with the wallet's balance when known
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapToken {
    pub id: String,
    pub display_symbol: String,
    pub balance: Option<Decimal>,
}

impl SwapToken {
    pub fn new(id: impl Into<String>, display_symbol: impl Into<String>, balance: Option<Decimal>) -> Self {
        Self {
            id: id.into(),
            display_symbol: display_symbol.into(),
            balance,
        }
    }

    pub fn balance_or_zero(&self) -> Decimal {
        self.balance.unwrap_or(Decimal::ZERO)
    }
}

/// Immediate swap routed through one or more pool pairs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstantSwap {
    pub token_from: SwapToken,
    pub token_to: SwapToken,
    pub amount_from: Decimal,
    pub amount_to: Decimal,
    /// Fraction in `[0, 1)`; the configured default applies when absent
    #[serde(default)]
    pub slippage: Option<Decimal>,
    pub estimated_fee: Decimal,
    /// Pool pair ids along the route, in order
    pub pools: Vec<String>,
    /// Whether UTXO DFI has to be converted to token DFI first
    #[serde(default)]
    pub conversion_required: bool,
}

impl InstantSwap {
    pub fn slippage_or(&self, default: Decimal) -> Decimal {
        self.slippage.unwrap_or(default)
    }
}

/// Swap settled at oracle price on a future block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FutureSwap {
    pub from_token_id: String,
    pub from_display_symbol: String,
    pub to_token_id: String,
    pub to_display_symbol: String,
    pub amount: Decimal,
    /// Wallet balance of the source token, when known
    #[serde(default)]
    pub source_balance: Option<Decimal>,
    pub is_source_loan_token: bool,
    pub oracle_price_text: String,
    pub execution_block: u64,
    pub estimated_fee: Decimal,
}

/// What the user confirmed on the swap screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum SwapIntent {
    Instant(InstantSwap),
    Future(FutureSwap),
}

impl SwapIntent {
    pub fn swap_type(&self) -> SwapType {
        match self {
            SwapIntent::Instant(swap) if swap.conversion_required => SwapType::ConvertAndSwap,
            SwapIntent::Instant(_) => SwapType::Swap,
            SwapIntent::Future(_) => SwapType::FutureSwap,
        }
    }

    pub fn estimated_fee(&self) -> Decimal {
        match self {
            SwapIntent::Instant(swap) => swap.estimated_fee,
            SwapIntent::Future(swap) => swap.estimated_fee,
        }
    }
}

/// Kind of transaction shown on the confirmation summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapType {
    Swap,
    ConvertAndSwap,
    FutureSwap,
}

impl SwapType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Swap => labels::TYPE_SWAP,
            Self::ConvertAndSwap => labels::TYPE_CONVERT_AND_SWAP,
            Self::FutureSwap => labels::TYPE_FUTURE_SWAP,
        }
    }
}

impl fmt::Display for SwapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Balances the wallet will hold once the swap settles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultingBalances {
    pub from: Decimal,
    /// `None` for future swaps, whose destination amount depends on the settlement price
    pub to: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(conversion_required: bool) -> SwapIntent {
        SwapIntent::Instant(InstantSwap {
            token_from: SwapToken::new("0_unified", "DFI", Some(Decimal::from(10))),
            token_to: SwapToken::new("1", "dBTC", None),
            amount_from: Decimal::ONE,
            amount_to: Decimal::ONE,
            slippage: None,
            estimated_fee: Decimal::ZERO,
            pools: vec!["5".to_string()],
            conversion_required,
        })
    }

    #[test]
    fn test_swap_type_labels() {
        assert_eq!(instant(false).swap_type().to_string(), "Swap");
        assert_eq!(instant(true).swap_type().to_string(), "Convert & swap");
        assert_eq!(SwapType::FutureSwap.as_str(), "Future swap");
    }

    #[test]
    fn test_missing_slippage_deserializes_to_default() {
        let json = r#"{
            "tokenFrom": {"id": "0_unified", "displaySymbol": "DFI", "balance": "10"},
            "tokenTo": {"id": "1", "displaySymbol": "dBTC", "balance": null},
            "amountFrom": "1",
            "amountTo": "2",
            "estimatedFee": "0.0001",
            "pools": ["5"]
        }"#;
        let swap: InstantSwap = serde_json::from_str(json).unwrap();

        assert_eq!(swap.slippage, None);
        assert_eq!(swap.slippage_or(Decimal::new(3, 2)), Decimal::new(3, 2));
        assert!(!swap.conversion_required);
    }

    #[test]
    fn test_missing_balance_counts_as_zero() {
        let token = SwapToken::new("1", "dBTC", None);
        assert_eq!(token.balance_or_zero(), Decimal::ZERO);
    }
}
