use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Oracle price feed for a token
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivePrice {
    /// Price in effect for the current block
    pub active: Option<Decimal>,
    /// Price that becomes active at the next price block
    pub next: Option<Decimal>,
}

/// Which oracle price to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceKind {
    Active,
    Next,
}

/// Whether a price is used to value collateral or a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceUsage {
    Collateral,
    Loan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTokenInfo {
    pub id: String,
    pub symbol: String,
    pub display_symbol: String,
}

/// Token accepted as vault collateral
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollateralToken {
    pub token: LoanTokenInfo,
    /// Share of the token's value that counts towards collateral; defaults to 1
    pub factor: Option<Decimal>,
    pub active_price: Option<ActivePrice>,
}

/// Token that can be borrowed from a vault
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanToken {
    pub token: LoanTokenInfo,
    pub interest: Decimal,
    pub active_price: Option<ActivePrice>,
}

/// Amount of a token deposited in or borrowed from a vault
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultTokenAmount {
    pub id: String,
    pub display_symbol: String,
    pub amount: Decimal,
}

/// Vault state the DFI collateral requirement is evaluated against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollateralCheckInput {
    pub collateral_amounts: Vec<VaultTokenAmount>,
    pub loan_amounts: Vec<VaultTokenAmount>,
    pub collateral_value: Decimal,
    /// Includes the loan being taken in the current borrow flow
    pub loan_value: Decimal,
    pub loan_token: LoanToken,
    /// Minimum collateralization ratio in percent, e.g. 150
    pub min_col_ratio: Decimal,
}
