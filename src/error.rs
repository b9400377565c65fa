use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WalletError>;

/// Error codes for categorizing errors
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorCode {
    // Validation errors (3xxx)
    #[serde(rename = "VAL_3001")]
    InvalidInput,
    #[serde(rename = "VAL_3005")]
    InvalidAmount,
    #[serde(rename = "VAL_3009")]
    InvalidSlippage,
    #[serde(rename = "VAL_3010")]
    InvalidTokenId,

    // Business logic errors (5xxx)
    #[serde(rename = "BIZ_5007")]
    QueueBusy,
    #[serde(rename = "BIZ_5008")]
    SettlementBlockReached,

    // Blockchain errors (6xxx)
    #[serde(rename = "BC_6002")]
    BlockchainTransactionFailed,
    #[serde(rename = "BC_6004")]
    SigningFailed,

    // External service errors (8xxx)
    #[serde(rename = "EXT_8003")]
    ExternalServiceError,

    // Internal errors (9xxx)
    #[serde(rename = "INT_9998")]
    ConfigurationError,
    #[serde(rename = "INT_9997")]
    UnexpectedError,
}

impl ErrorCode {
    /// Get numeric code
    pub fn code(&self) -> u16 {
        match self {
            ErrorCode::InvalidInput => 3001,
            ErrorCode::InvalidAmount => 3005,
            ErrorCode::InvalidSlippage => 3009,
            ErrorCode::InvalidTokenId => 3010,

            ErrorCode::QueueBusy => 5007,
            ErrorCode::SettlementBlockReached => 5008,

            ErrorCode::BlockchainTransactionFailed => 6002,
            ErrorCode::SigningFailed => 6004,

            ErrorCode::ExternalServiceError => 8003,

            ErrorCode::ConfigurationError => 9998,
            ErrorCode::UnexpectedError => 9997,
        }
    }

    /// Get user-friendly message
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "Invalid input provided",
            ErrorCode::InvalidAmount => "Invalid amount provided",
            ErrorCode::InvalidSlippage => "Slippage tolerance must be between 0% and 100%",
            ErrorCode::InvalidTokenId => "Invalid token id",

            ErrorCode::QueueBusy => "Another transaction is already being processed",
            ErrorCode::SettlementBlockReached => {
                "The settlement block has been reached. Please start a new future swap"
            }

            ErrorCode::BlockchainTransactionFailed => "Blockchain transaction failed",
            ErrorCode::SigningFailed => "Failed to sign transaction",

            ErrorCode::ExternalServiceError => "External service error occurred",

            ErrorCode::ConfigurationError => "Configuration error",
            ErrorCode::UnexpectedError => "An unexpected error occurred",
        }
    }
}

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid slippage {0}: must be within [0, 1)")]
    InvalidSlippage(Decimal),

    #[error("Invalid token id: {0}")]
    InvalidTokenId(String),

    #[error("Transaction queue is busy processing {0}")]
    QueueBusy(uuid::Uuid),

    #[error("Settlement block {execution_block} reached at block {block_count}")]
    SettlementBlockReached { execution_block: u64, block_count: u64 },

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Broadcast error: {0}")]
    Broadcast(String),

    #[error("Indexer error: {0}")]
    Indexer(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WalletError {
    /// Create an invalid amount error
    pub fn invalid_amount(message: impl Into<String>) -> Self {
        WalletError::InvalidAmount(message.into())
    }

    /// Map the error onto its categorized code
    pub fn code(&self) -> ErrorCode {
        match self {
            WalletError::InvalidAmount(_) => ErrorCode::InvalidAmount,
            WalletError::InvalidSlippage(_) => ErrorCode::InvalidSlippage,
            WalletError::InvalidTokenId(_) => ErrorCode::InvalidTokenId,
            WalletError::QueueBusy(_) => ErrorCode::QueueBusy,
            WalletError::SettlementBlockReached { .. } => ErrorCode::SettlementBlockReached,
            WalletError::Signing(_) => ErrorCode::SigningFailed,
            WalletError::Broadcast(_) => ErrorCode::BlockchainTransactionFailed,
            WalletError::Indexer(_) => ErrorCode::ExternalServiceError,
            WalletError::Configuration(_) => ErrorCode::ConfigurationError,
            WalletError::Serialization(_) => ErrorCode::UnexpectedError,
        }
    }

    /// Whether the error came from user input rather than a collaborator
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WalletError::InvalidAmount(_)
                | WalletError::InvalidSlippage(_)
                | WalletError::InvalidTokenId(_)
        )
    }
}
