use crate::error::{Result, WalletError};
use crate::models::{FutureSwap, TokenId};

/// Token the future swap settles into.
///
/// Selling a loan token always settles to the sentinel id `0`, which the chain
/// resolves to the loan's underlying token.
pub fn destination_token_id(swap: &FutureSwap) -> Result<TokenId> {
    if swap.is_source_loan_token {
        return Ok(TokenId::DFI);
    }
    swap.to_token_id.parse()
}

pub fn source_token_id(swap: &FutureSwap) -> Result<TokenId> {
    swap.from_token_id.parse()
}

/// Submission closes once the chain reaches the settlement block.
pub fn is_submission_open(execution_block: u64, block_count: u64) -> bool {
    block_count < execution_block
}

pub fn ensure_submission_open(swap: &FutureSwap, block_count: u64) -> Result<()> {
    if !is_submission_open(swap.execution_block, block_count) {
        return Err(WalletError::SettlementBlockReached {
            execution_block: swap.execution_block,
            block_count,
        });
    }
    Ok(())
}

pub fn blocks_until_settlement(execution_block: u64, block_count: u64) -> u64 {
    execution_block.saturating_sub(block_count)
}
