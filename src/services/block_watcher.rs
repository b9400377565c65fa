//! Block Watcher Service
//!
//! Background service that polls the indexer for the chain height and, whenever
//! it moves (or the watched address changes), refreshes balances, pool pairs and
//! collateral tokens. Subscribers receive the latest snapshot over a watch channel.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::config::SwapConfig;
use crate::error::Result;
use crate::models::{CollateralToken, PoolPair, TokenAmount};
use crate::services::traits::IndexerClient;

/// Block watcher configuration
#[derive(Debug, Clone)]
pub struct BlockWatcherConfig {
    /// How often to poll the block height (in seconds)
    pub poll_interval_secs: u64,
    /// Whether the watcher is enabled
    pub enabled: bool,
}

impl Default for BlockWatcherConfig {
    fn default() -> Self {
        Self::from(&SwapConfig::default())
    }
}

impl From<&SwapConfig> for BlockWatcherConfig {
    fn from(config: &SwapConfig) -> Self {
        Self {
            poll_interval_secs: config.poll_interval_secs,
            enabled: true,
        }
    }
}

/// Wallet state as of one block
#[derive(Debug, Clone, PartialEq)]
pub struct WalletSnapshot {
    pub block_count: u64,
    pub address: String,
    pub tokens: Vec<TokenAmount>,
    pub pool_pairs: Vec<PoolPair>,
    pub collateral_tokens: Vec<CollateralToken>,
    pub updated_at: DateTime<Utc>,
}

struct WatchState {
    address: String,
    last_block: Option<u64>,
}

pub struct BlockWatcher {
    indexer: Arc<dyn IndexerClient>,
    config: BlockWatcherConfig,
    state: Mutex<WatchState>,
    snapshot_tx: watch::Sender<Option<WalletSnapshot>>,
}

impl BlockWatcher {
    pub fn new(
        indexer: Arc<dyn IndexerClient>,
        address: impl Into<String>,
        config: BlockWatcherConfig,
    ) -> Self {
        let (snapshot_tx, _) = watch::channel(None);
        Self {
            indexer,
            config,
            state: Mutex::new(WatchState {
                address: address.into(),
                last_block: None,
            }),
            snapshot_tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<WalletSnapshot>> {
        self.snapshot_tx.subscribe()
    }

    pub fn latest(&self) -> Option<WalletSnapshot> {
        self.snapshot_tx.borrow().clone()
    }

    /// Switch the watched address; the next poll refreshes regardless of height
    pub async fn set_address(&self, address: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.address = address.into();
        state.last_block = None;
        info!("Block watcher now tracking {}", state.address);
    }

    /// Poll once. Returns whether a new snapshot was published.
    pub async fn poll_once(&self) -> Result<bool> {
        let block_count = self.indexer.block_count().await?;

        let address = {
            let state = self.state.lock().await;
            if state.last_block == Some(block_count) {
                return Ok(false);
            }
            state.address.clone()
        };

        debug!("Block height {} reached, refreshing {}", block_count, address);

        let (tokens, pool_pairs, collateral_tokens) = futures::try_join!(
            self.indexer.list_tokens(&address),
            self.indexer.list_pool_pairs(),
            self.indexer.list_collateral_tokens(),
        )?;

        {
            let mut state = self.state.lock().await;
            // Address switched while fetching; leave the refresh to the next poll
            if state.address != address {
                return Ok(false);
            }
            state.last_block = Some(block_count);
        }

        info!(
            "Refreshed {} token(s) and {} pool pair(s) at block {}",
            tokens.len(),
            pool_pairs.len(),
            block_count
        );

        self.snapshot_tx.send_replace(Some(WalletSnapshot {
            block_count,
            address,
            tokens,
            pool_pairs,
            collateral_tokens,
            updated_at: Utc::now(),
        }));

        Ok(true)
    }

    /// Start the polling loop
    pub async fn run(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        if !self.config.enabled {
            info!("Block watcher is disabled");
            return;
        }

        info!(
            "Starting block watcher with {}s interval",
            self.config.poll_interval_secs
        );

        let mut poll_interval = interval(Duration::from_secs(self.config.poll_interval_secs));
        poll_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = poll_interval.tick() => {
                    if let Err(e) = self.poll_once().await {
                        error!("Block watcher error: {}", e);
                    }
                }
                _ = shutdown.changed() => {
                    info!("Block watcher stopped");
                    break;
                }
            }
        }
    }
}
