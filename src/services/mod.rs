// Business logic services
// Swap formulas, collateral checks, transaction queue, block watching

pub mod block_watcher;
pub mod collateral;
pub mod future_swap;
pub mod pricing;
pub mod swap_formula;
pub mod swap_submission;
pub mod traits;
pub mod transaction_queue;

pub use block_watcher::{BlockWatcher, BlockWatcherConfig, WalletSnapshot};
pub use collateral::{active_price, CollateralChecker};
pub use pricing::{lp_share_breakdown, PortfolioSummary, PricingService, ValuedToken};
pub use swap_submission::{SkipReason, SubmitOutcome, SwapPreview, SwapSubmissionService};
pub use traits::{
    Broadcaster, CompositeSwapRequest, FutureSwapRequest, IndexerClient, PagePresence, PoolRoute,
    PriceSource, ScreenPresence, Signer, WalletAccount,
};
pub use transaction_queue::{
    BroadcastCallback, BroadcastJobSummary, CompositeSwapSigner, EntrySummary, FutureSwapSigner,
    TransactionQueue, TransactionQueueEntry,
};
