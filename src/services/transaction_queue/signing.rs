//! Signers for the swap transactions.
//!
//! Each signer captures the confirmed swap parameters and, once the queue hands
//! it the unlocked account, builds the DeFi transaction against the account's
//! own script.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::Result;
use crate::models::{SignedTransaction, TokenId};
use crate::services::traits::{
    CompositeSwapRequest, FutureSwapRequest, PoolRoute, Signer, WalletAccount,
};

/// Swap through a route of pool pairs, bounded by a max price
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeSwapSigner {
    pub from_token_id: TokenId,
    pub to_token_id: TokenId,
    pub from_amount: Decimal,
    pub max_price: Decimal,
    pub pools: Vec<TokenId>,
}

#[async_trait]
impl Signer for CompositeSwapSigner {
    async fn sign(&self, account: &dyn WalletAccount) -> Result<SignedTransaction> {
        let script = account.get_script().await?;

        let request = CompositeSwapRequest {
            from_script: script.clone(),
            from_token_id: self.from_token_id,
            from_amount: self.from_amount,
            to_script: script,
            to_token_id: self.to_token_id,
            max_price: self.max_price,
            pools: self.pools.iter().map(|&id| PoolRoute { id }).collect(),
        };

        debug!(
            "Building composite swap {} -> {} via {} pool(s)",
            self.from_token_id,
            self.to_token_id,
            request.pools.len()
        );

        account.composite_swap(request).await
    }
}

/// Future swap settled at the next settlement block
#[derive(Debug, Clone, PartialEq)]
pub struct FutureSwapSigner {
    pub source_token_id: TokenId,
    pub amount: Decimal,
    pub destination: TokenId,
}

#[async_trait]
impl Signer for FutureSwapSigner {
    async fn sign(&self, account: &dyn WalletAccount) -> Result<SignedTransaction> {
        let owner = account.get_script().await?;

        let request = FutureSwapRequest {
            owner,
            source_token_id: self.source_token_id,
            source_amount: self.amount,
            destination: self.destination,
            withdraw: false,
        };

        debug!(
            "Building future swap of {} token {} -> {}",
            self.amount, self.source_token_id, self.destination
        );

        account.future_swap(request).await
    }
}
