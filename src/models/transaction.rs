// Transaction queue lifecycle models

use serde::{Deserialize, Serialize};

/// Stage of a queued transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Signing,
    Broadcasting,
    Broadcasted,
    Failed,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "signing" => Ok(Self::Signing),
            "broadcasting" => Ok(Self::Broadcasting),
            "broadcasted" => Ok(Self::Broadcasted),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Unknown transaction status: {}", s)),
        }
    }
}

impl TransactionStatus {
    /// Convert to string representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Signing => "signing",
            Self::Broadcasting => "broadcasting",
            Self::Broadcasted => "broadcasted",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Broadcasted | Self::Failed)
    }
}

/// Messages shown in the transaction drawer while an entry moves through the queue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawerMessages {
    pub preparing: Option<String>,
    pub waiting: Option<String>,
    pub complete: Option<String>,
}

impl DrawerMessages {
    pub fn new(
        preparing: impl Into<String>,
        waiting: impl Into<String>,
        complete: impl Into<String>,
    ) -> Self {
        Self {
            preparing: Some(preparing.into()),
            waiting: Some(waiting.into()),
            complete: Some(complete.into()),
        }
    }

    /// Message for the given stage, if one was provided
    pub fn for_status(&self, status: TransactionStatus) -> Option<&str> {
        match status {
            TransactionStatus::Pending | TransactionStatus::Signing => self.preparing.as_deref(),
            TransactionStatus::Broadcasting => self.waiting.as_deref(),
            TransactionStatus::Broadcasted => self.complete.as_deref(),
            TransactionStatus::Failed => None,
        }
    }
}

/// Raw signed transaction ready for broadcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub txid: String,
    pub hex: String,
}

/// Outcome of a successful broadcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastReceipt {
    pub entry_id: uuid::Uuid,
    pub txid: String,
    pub title: String,
    pub complete_message: Option<String>,
}
