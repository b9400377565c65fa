use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::tokens::{DFI_SYMBOL, DFI_TOKEN_ID, UNIFIED_DFI_ID};
use crate::error::WalletError;

/// On-chain numeric token identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u32);

impl TokenId {
    pub const DFI: TokenId = TokenId(DFI_TOKEN_ID);

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl FromStr for TokenId {
    type Err = WalletError;

    /// Accepts the indexer's `0_unified` alias as well as plain numeric ids.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == UNIFIED_DFI_ID {
            return Ok(TokenId::DFI);
        }

        s.parse::<u32>()
            .map(TokenId)
            .map_err(|_| WalletError::InvalidTokenId(s.to_string()))
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Balance snapshot of a single token held by the wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmount {
    pub id: String,
    pub symbol: String,
    pub display_symbol: String,
    pub amount: Decimal,
    #[serde(rename = "isLPS", default)]
    pub is_lps: bool,
}

impl TokenAmount {
    pub fn new(
        id: impl Into<String>,
        display_symbol: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        let display_symbol = display_symbol.into();
        Self {
            id: id.into(),
            symbol: display_symbol.clone(),
            display_symbol,
            amount,
            is_lps: false,
        }
    }

    pub fn lp(id: impl Into<String>, display_symbol: impl Into<String>, amount: Decimal) -> Self {
        Self {
            is_lps: true,
            ..Self::new(id, display_symbol, amount)
        }
    }

    pub fn token_id(&self) -> Result<TokenId, WalletError> {
        self.id.parse()
    }

    /// The combined UTXO + token DFI row reported by the indexer
    pub fn is_unified_dfi(&self) -> bool {
        self.id == UNIFIED_DFI_ID
    }

    pub fn is_dfi(&self) -> bool {
        self.display_symbol == DFI_SYMBOL
    }
}
