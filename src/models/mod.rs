// Data models shared by the swap, collateral and queue services

pub mod loan;
pub mod pool;
pub mod swap;
pub mod token;
pub mod transaction;

pub use loan::{
    ActivePrice, CollateralCheckInput, CollateralToken, LoanToken, LoanTokenInfo, PriceKind,
    PriceUsage, VaultTokenAmount,
};
pub use pool::{DexItem, LpShareBreakdown, PoolPair, PoolPairApr, PoolPairToken};
pub use swap::{FutureSwap, InstantSwap, ResultingBalances, SwapIntent, SwapToken, SwapType};
pub use token::{TokenAmount, TokenId};
pub use transaction::{BroadcastReceipt, DrawerMessages, SignedTransaction, TransactionStatus};
