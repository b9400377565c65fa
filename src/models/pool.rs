use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::token::TokenAmount;

/// One side of a pool pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolPairToken {
    pub id: String,
    pub symbol: String,
    pub display_symbol: String,
    pub reserve: Decimal,
}

/// Annualised yield of a pool pair, as fractions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolPairApr {
    pub total: Decimal,
    pub reward: Decimal,
    pub commission: Decimal,
}

/// DEX liquidity pool as reported by the indexer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolPair {
    pub id: String,
    pub symbol: String,
    pub display_symbol: String,
    pub token_a: PoolPairToken,
    pub token_b: PoolPairToken,
    /// Total LP token supply; absent when the indexer has not reported it yet
    pub total_liquidity: Option<Decimal>,
    #[serde(default)]
    pub apr: Option<PoolPairApr>,
}

/// Entry of the DEX listing: either a position the wallet holds or a pool it could join
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum DexItem {
    Your(TokenAmount),
    Available(PoolPair),
}

impl DexItem {
    pub fn id(&self) -> &str {
        match self {
            DexItem::Your(token) => &token.id,
            DexItem::Available(pair) => &pair.id,
        }
    }
}

/// Underlying tokens an LP position would return on removal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpShareBreakdown {
    pub pool_pair_id: String,
    pub to_remove: Decimal,
    pub ratio: Decimal,
    pub token_a_amount: Decimal,
    pub token_b_amount: Decimal,
}
