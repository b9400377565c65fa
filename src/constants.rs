//! Wallet-wide constants.
//!
//! Token identifiers, well-known symbols and the fixed user-facing strings
//! emitted by the swap flows.

/// Token identifiers
pub mod tokens {
    /// Synthetic id the indexer uses for the combined UTXO + token DFI balance
    pub const UNIFIED_DFI_ID: &str = "0_unified";

    /// On-chain id of DFI, also the "settle to underlying" future swap destination
    pub const DFI_TOKEN_ID: u32 = 0;

    /// Display symbol of the native token
    pub const DFI_SYMBOL: &str = "DFI";

    /// Display symbol of the stable loan token
    pub const DUSD_SYMBOL: &str = "DUSD";
}

/// Swap defaults
pub mod swap {
    /// Default slippage tolerance in percent
    pub const DEFAULT_SLIPPAGE_PERCENT: i64 = 1;

    /// Fraction of the required collateral that must be held in DFI for DUSD loans
    pub const DFI_COLLATERAL_DIVISOR: u32 = 2;
}

/// Block watcher defaults
pub mod watcher {
    /// Default block polling interval in seconds
    pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

    /// Lower bound accepted for the polling interval
    pub const MIN_POLL_INTERVAL_SECS: u64 = 1;
}

/// Labels shown by the swap confirmation flow
pub mod labels {
    pub const CONFIRM_SWAP: &str = "CONFIRM SWAP";
    pub const SWAPPING: &str = "SWAPPING";

    pub const SWAP_TITLE: &str = "Swapping Token";
    pub const SWAP_PREPARING: &str = "Preparing to swap tokens…";
    pub const SWAP_WAITING: &str = "Swapping tokens…";
    pub const SWAP_COMPLETE: &str = "Tokens swapped";

    pub const FUTURE_SWAP_TITLE: &str = "Future swapping Token";
    pub const FUTURE_SWAP_PREPARING: &str = "Preparing your transaction…";
    pub const FUTURE_SWAP_WAITING: &str = "Processing future swap transaction…";

    pub const TYPE_FUTURE_SWAP: &str = "Future swap";
    pub const TYPE_CONVERT_AND_SWAP: &str = "Convert & swap";
    pub const TYPE_SWAP: &str = "Swap";
}
