//! Swap submission
//!
//! Turns a confirmed [`SwapIntent`] into a queued, signable transaction.
//! Construction failures never reach the queue: they are logged and reported
//! back as [`SubmitOutcome::BuildFailed`].

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::SwapConfig;
use crate::constants::labels;
use crate::error::{Result, WalletError};
use crate::models::{
    DrawerMessages, FutureSwap, InstantSwap, ResultingBalances, SwapIntent, SwapType, TokenId,
};
use crate::services::future_swap;
use crate::services::swap_formula;
use crate::services::traits::PagePresence;
use crate::services::transaction_queue::{
    BroadcastCallback, CompositeSwapSigner, FutureSwapSigner, TransactionQueue,
    TransactionQueueEntry,
};
use crate::utils::format_amount;

#[derive(Debug)]
pub enum SubmitOutcome {
    Queued(Uuid),
    Skipped(SkipReason),
    BuildFailed(WalletError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A previous transaction is still queued or being broadcast
    PendingJob,
    SettlementBlockReached { execution_block: u64, block_count: u64 },
}

/// Figures shown on the confirmation screen before submitting
#[derive(Debug, Clone, PartialEq)]
pub struct SwapPreview {
    pub swap_type: SwapType,
    pub resulting_balances: ResultingBalances,
    pub estimated_fee: Decimal,
    /// Only instant swaps are bounded by a max price
    pub max_price: Option<Decimal>,
}

pub struct SwapSubmissionService {
    queue: Arc<TransactionQueue>,
    config: SwapConfig,
    presence: Option<Arc<dyn PagePresence>>,
}

impl SwapSubmissionService {
    pub fn new(queue: Arc<TransactionQueue>, config: SwapConfig) -> Self {
        Self {
            queue,
            config,
            presence: None,
        }
    }

    /// Screen whose presence gates the post-broadcast callback
    pub fn with_page_presence(mut self, presence: Arc<dyn PagePresence>) -> Self {
        self.presence = Some(presence);
        self
    }

    pub fn preview(&self, intent: &SwapIntent) -> Result<SwapPreview> {
        match intent {
            SwapIntent::Instant(swap) => Ok(SwapPreview {
                swap_type: intent.swap_type(),
                resulting_balances: swap_formula::resulting_balances(
                    swap,
                    &self.config.fee_token_symbol,
                ),
                estimated_fee: swap.estimated_fee,
                max_price: Some(swap_formula::max_price(
                    swap.amount_from,
                    swap.amount_to,
                    swap.slippage_or(self.config.default_slippage),
                )?),
            }),
            SwapIntent::Future(swap) => Ok(SwapPreview {
                swap_type: intent.swap_type(),
                resulting_balances: swap_formula::future_swap_resulting_balance(
                    swap.source_balance.unwrap_or(Decimal::ZERO),
                    swap.amount,
                ),
                estimated_fee: swap.estimated_fee,
                max_price: None,
            }),
        }
    }

    /// Label of the confirm button given the queue state
    pub fn submit_label(&self) -> String {
        let has_pending_job = self.queue.has_pending_job();
        let has_pending_broadcast_job = self.queue.has_pending_broadcast_job();

        if !has_pending_job && !has_pending_broadcast_job {
            return labels::CONFIRM_SWAP.to_string();
        }

        if has_pending_broadcast_job {
            if let Some(label) = self
                .queue
                .first_broadcast_job()
                .and_then(|job| job.submit_button_label)
            {
                return label;
            }
        }

        labels::SWAPPING.to_string()
    }

    pub fn is_submit_disabled(&self, intent: &SwapIntent, block_count: u64) -> bool {
        if let SwapIntent::Future(swap) = intent {
            if !future_swap::is_submission_open(swap.execution_block, block_count) {
                return true;
            }
        }
        self.queue_busy()
    }

    fn queue_busy(&self) -> bool {
        self.queue.has_pending_job() || self.queue.has_pending_broadcast_job()
    }

    pub fn submit(
        &self,
        intent: &SwapIntent,
        block_count: u64,
        on_broadcast: Option<BroadcastCallback>,
    ) -> SubmitOutcome {
        if self.queue_busy() {
            warn!("Swap submission ignored: previous transaction still pending");
            return SubmitOutcome::Skipped(SkipReason::PendingJob);
        }

        let built = match intent {
            SwapIntent::Instant(swap) => self.build_instant_entry(swap),
            SwapIntent::Future(swap) => {
                if let Err(WalletError::SettlementBlockReached {
                    execution_block,
                    block_count,
                }) = future_swap::ensure_submission_open(swap, block_count)
                {
                    warn!(
                        "Future swap refused: settlement block {} reached at {}",
                        execution_block, block_count
                    );
                    return SubmitOutcome::Skipped(SkipReason::SettlementBlockReached {
                        execution_block,
                        block_count,
                    });
                }
                debug!(
                    "Future swap settles in {} blocks",
                    future_swap::blocks_until_settlement(swap.execution_block, block_count)
                );
                self.build_future_entry(swap)
            }
        };

        let mut entry = match built {
            Ok(entry) => entry,
            Err(e) => {
                error!(
                    code = e.code().code(),
                    validation = e.is_validation(),
                    "Failed to construct {} transaction: {}",
                    intent.swap_type(),
                    e
                );
                return SubmitOutcome::BuildFailed(e);
            }
        };

        if let Some(callback) = on_broadcast {
            entry = entry.with_on_broadcast(callback);
        }
        if let Some(presence) = &self.presence {
            entry = entry.with_page_presence(presence.clone());
        }

        // Another submit may have enqueued since the check above
        match self.queue.push_if_idle(entry) {
            Some(id) => {
                info!("{} submitted as {}", intent.swap_type(), id);
                SubmitOutcome::Queued(id)
            }
            None => {
                warn!("Swap submission ignored: previous transaction still pending");
                SubmitOutcome::Skipped(SkipReason::PendingJob)
            }
        }
    }

    fn build_instant_entry(&self, swap: &InstantSwap) -> Result<TransactionQueueEntry> {
        let max_price = swap_formula::max_price(
            swap.amount_from,
            swap.amount_to,
            swap.slippage_or(self.config.default_slippage),
        )?;
        let pools = swap
            .pools
            .iter()
            .map(|id| id.parse::<TokenId>())
            .collect::<Result<Vec<_>>>()?;

        let signer = CompositeSwapSigner {
            from_token_id: swap.token_from.id.parse()?,
            to_token_id: swap.token_to.id.parse()?,
            from_amount: swap.amount_from,
            max_price,
            pools,
        };

        let description = format!(
            "Swapping {} {} to {} {}",
            format_amount(swap.amount_from),
            swap.token_from.display_symbol,
            format_amount(swap.amount_to),
            swap.token_to.display_symbol
        );

        Ok(TransactionQueueEntry::new(Arc::new(signer), labels::SWAP_TITLE)
            .with_description(description)
            .with_drawer_messages(DrawerMessages::new(
                labels::SWAP_PREPARING,
                labels::SWAP_WAITING,
                labels::SWAP_COMPLETE,
            )))
    }

    fn build_future_entry(&self, swap: &FutureSwap) -> Result<TransactionQueueEntry> {
        if swap.amount <= Decimal::ZERO {
            return Err(WalletError::invalid_amount(format!(
                "future swap amount must be positive, got {}",
                swap.amount
            )));
        }

        let signer = FutureSwapSigner {
            source_token_id: future_swap::source_token_id(swap)?,
            amount: swap.amount,
            destination: future_swap::destination_token_id(swap)?,
        };

        let description = format!(
            "Swapping {} {} to {} on settlement block {}",
            format_amount(swap.amount),
            swap.from_display_symbol,
            swap.to_display_symbol,
            swap.execution_block
        );

        Ok(TransactionQueueEntry::new(Arc::new(signer), labels::FUTURE_SWAP_TITLE)
            .with_description(description)
            .with_drawer_messages(DrawerMessages::new(
                labels::FUTURE_SWAP_PREPARING,
                labels::FUTURE_SWAP_WAITING,
                format!(
                    "Future Swap confirmed and will be executed at block #{}",
                    swap.execution_block
                ),
            )))
    }
}
