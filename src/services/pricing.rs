//! Portfolio valuation and LP share breakdown.

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

use crate::models::{LpShareBreakdown, PoolPair, TokenAmount};
use crate::services::traits::PriceSource;
use crate::utils::{round_down, DISPLAY_PRECISION};

/// Token row with its USD value attached
#[derive(Debug, Clone, PartialEq)]
pub struct ValuedToken {
    pub token: TokenAmount,
    pub usd_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSummary {
    /// Non-DFI rows, in input order
    pub tokens: Vec<ValuedToken>,
    pub total_usd: Decimal,
}

#[derive(Clone)]
pub struct PricingService {
    prices: Arc<dyn PriceSource>,
}

impl PricingService {
    pub fn new(prices: Arc<dyn PriceSource>) -> Self {
        Self { prices }
    }

    /// USD value of an amount; unpriced tokens are worth zero
    pub fn token_usd_value(&self, symbol: &str, amount: Decimal, is_lps: bool) -> Decimal {
        match self.prices.usd_value(symbol, amount, is_lps) {
            Some(value) => value,
            None => {
                debug!("No USD price for {}, counting as zero", symbol);
                Decimal::ZERO
            }
        }
    }

    /// Values every balance row.
    ///
    /// The `0_unified` DFI row is left out of the total because its UTXO and
    /// token parts are reported as separate rows. DFI rows are not listed.
    pub fn summarize(&self, tokens: &[TokenAmount]) -> PortfolioSummary {
        let mut total_usd = Decimal::ZERO;
        let mut rows = Vec::new();

        for token in tokens {
            let usd_amount = self.token_usd_value(&token.symbol, token.amount, token.is_lps);

            if !token.is_unified_dfi() {
                total_usd += usd_amount;
            }

            if !token.is_dfi() {
                rows.push(ValuedToken {
                    token: token.clone(),
                    usd_amount,
                });
            }
        }

        PortfolioSummary {
            tokens: rows,
            total_usd,
        }
    }
}

/// Underlying amounts returned when an LP position is removed in full.
pub fn lp_share_breakdown(pair: &PoolPair, lp_amount: Decimal) -> LpShareBreakdown {
    let to_remove = round_down(lp_amount, DISPLAY_PRECISION);

    let ratio = match pair.total_liquidity {
        Some(total) if total > Decimal::ZERO => to_remove / total,
        _ => to_remove,
    };

    LpShareBreakdown {
        pool_pair_id: pair.id.clone(),
        to_remove,
        ratio,
        token_a_amount: round_down(ratio * pair.token_a.reserve, DISPLAY_PRECISION),
        token_b_amount: round_down(ratio * pair.token_b.reserve, DISPLAY_PRECISION),
    }
}
