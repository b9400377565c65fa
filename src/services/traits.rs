//! Service trait abstractions for the wallet's external collaborators.
//!
//! The indexer client and the transaction-building wallet library live outside
//! this crate; these traits are the seams through which they are consumed and
//! through which tests substitute in-memory fakes.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::Result;
use crate::models::{CollateralToken, PoolPair, SignedTransaction, TokenAmount, TokenId};

/// Read-only access to the blockchain indexer
#[async_trait]
pub trait IndexerClient: Send + Sync {
    /// Current chain height
    async fn block_count(&self) -> Result<u64>;

    /// Token balances held by an address
    async fn list_tokens(&self, address: &str) -> Result<Vec<TokenAmount>>;

    /// All DEX pool pairs
    async fn list_pool_pairs(&self) -> Result<Vec<PoolPair>>;

    /// Tokens accepted as vault collateral
    async fn list_collateral_tokens(&self) -> Result<Vec<CollateralToken>>;
}

/// Pool leg of a composite swap route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolRoute {
    pub id: TokenId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeSwapRequest {
    pub from_script: String,
    pub from_token_id: TokenId,
    pub from_amount: Decimal,
    pub to_script: String,
    pub to_token_id: TokenId,
    pub max_price: Decimal,
    pub pools: Vec<PoolRoute>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FutureSwapRequest {
    pub owner: String,
    pub source_token_id: TokenId,
    pub source_amount: Decimal,
    pub destination: TokenId,
    pub withdraw: bool,
}

/// Unlocked wallet account able to build and sign DeFi transactions
#[async_trait]
pub trait WalletAccount: Send + Sync {
    /// Output script of the account, hex encoded
    async fn get_script(&self) -> Result<String>;

    async fn composite_swap(&self, request: CompositeSwapRequest) -> Result<SignedTransaction>;

    async fn future_swap(&self, request: FutureSwapRequest) -> Result<SignedTransaction>;
}

/// Capability that turns a wallet account into one signed transaction
#[async_trait]
pub trait Signer: Send + Sync {
    async fn sign(&self, account: &dyn WalletAccount) -> Result<SignedTransaction>;
}

/// Submits signed transactions to the network
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Returns the txid accepted by the node
    async fn broadcast(&self, transaction: &SignedTransaction) -> Result<String>;
}

/// USD valuation of token amounts
pub trait PriceSource: Send + Sync {
    /// `None` when no price route exists for the token
    fn usd_value(&self, symbol: &str, amount: Decimal, is_lps: bool) -> Option<Decimal>;
}

/// Whether the screen that started a transaction is still displayed
pub trait PagePresence: Send + Sync {
    fn is_on_page(&self) -> bool;
}

/// Presence flag toggled by the screen on focus and blur
#[derive(Debug)]
pub struct ScreenPresence {
    on_page: AtomicBool,
}

impl ScreenPresence {
    pub fn new() -> Self {
        Self {
            on_page: AtomicBool::new(true),
        }
    }

    pub fn enter(&self) {
        self.on_page.store(true, Ordering::SeqCst);
    }

    pub fn leave(&self) {
        self.on_page.store(false, Ordering::SeqCst);
    }
}

impl Default for ScreenPresence {
    fn default() -> Self {
        Self::new()
    }
}

impl PagePresence for ScreenPresence {
    fn is_on_page(&self) -> bool {
        self.on_page.load(Ordering::SeqCst)
    }
}
