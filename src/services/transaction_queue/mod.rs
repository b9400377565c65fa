//! Transaction queue
//!
//! Single-consumer FIFO of signable requests. Each entry is signed with the
//! wallet account, handed to the broadcast stage and sent to the network; the
//! next entry is only taken once the previous one has been retired.

pub mod broadcast;
pub mod signing;

pub use broadcast::{BroadcastJob, BroadcastJobSummary, BroadcastQueue};
pub use signing::{CompositeSwapSigner, FutureSwapSigner};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{watch, Notify};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::{Result, WalletError};
use crate::models::{BroadcastReceipt, DrawerMessages, TransactionStatus};
use crate::services::traits::{Broadcaster, PagePresence, Signer, WalletAccount};

/// Invoked once the entry's transaction has been accepted by the network
pub type BroadcastCallback = Box<dyn FnOnce(&BroadcastReceipt) + Send>;

pub struct TransactionQueueEntry {
    pub id: Uuid,
    pub signer: Arc<dyn Signer>,
    pub title: String,
    pub description: Option<String>,
    pub drawer_messages: DrawerMessages,
    pub submit_button_label: Option<String>,
    pub on_broadcast: Option<BroadcastCallback>,
    /// Gates `on_broadcast`; the broadcast itself always goes ahead
    pub page_presence: Option<Arc<dyn PagePresence>>,
    pub created_at: DateTime<Utc>,
}

impl TransactionQueueEntry {
    pub fn new(signer: Arc<dyn Signer>, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            signer,
            title: title.into(),
            description: None,
            drawer_messages: DrawerMessages::default(),
            submit_button_label: None,
            on_broadcast: None,
            page_presence: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_drawer_messages(mut self, messages: DrawerMessages) -> Self {
        self.drawer_messages = messages;
        self
    }

    pub fn with_submit_button_label(mut self, label: impl Into<String>) -> Self {
        self.submit_button_label = Some(label.into());
        self
    }

    pub fn with_on_broadcast(mut self, callback: BroadcastCallback) -> Self {
        self.on_broadcast = Some(callback);
        self
    }

    pub fn with_page_presence(mut self, presence: Arc<dyn PagePresence>) -> Self {
        self.page_presence = Some(presence);
        self
    }

    /// Terminal stages are always logged, others only when a drawer message exists
    fn log_stage(&self, status: TransactionStatus) {
        match self.drawer_messages.for_status(status) {
            Some(message) => debug!("[{}] {}: {}", self.id, status, message),
            None if status.is_terminal() => debug!("[{}] {}", self.id, status),
            None => {}
        }
    }
}

impl fmt::Debug for TransactionQueueEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionQueueEntry")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("drawer_messages", &self.drawer_messages)
            .field("submit_button_label", &self.submit_button_label)
            .field("has_on_broadcast", &self.on_broadcast.is_some())
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Read-only view of a queued entry
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySummary {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub drawer_messages: DrawerMessages,
    pub created_at: DateTime<Utc>,
}

#[derive(Default)]
struct QueueState {
    pending: VecDeque<TransactionQueueEntry>,
    in_flight: Option<Uuid>,
}

pub struct TransactionQueue {
    account: Arc<dyn WalletAccount>,
    broadcaster: Arc<dyn Broadcaster>,
    state: Mutex<QueueState>,
    broadcasts: BroadcastQueue,
    notify: Notify,
}

impl TransactionQueue {
    pub fn new(account: Arc<dyn WalletAccount>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            account,
            broadcaster,
            state: Mutex::new(QueueState::default()),
            broadcasts: BroadcastQueue::new(),
            notify: Notify::new(),
        }
    }

    /// Append an entry (non-blocking)
    pub fn push(&self, entry: TransactionQueueEntry) -> Uuid {
        let (id, title) = (entry.id, entry.title.clone());
        entry.log_stage(TransactionStatus::Pending);

        let depth = {
            let mut state = self.state.lock();
            state.pending.push_back(entry);
            state.pending.len()
        };

        self.queued(id, &title, depth);
        id
    }

    /// Append an entry only when nothing is queued, in flight or being broadcast.
    ///
    /// The idle check and the append happen under one lock, so concurrent
    /// callers cannot both enqueue. Returns `None` and drops the entry when busy.
    pub fn push_if_idle(&self, entry: TransactionQueueEntry) -> Option<Uuid> {
        let (id, title) = (entry.id, entry.title.clone());

        let depth = {
            let mut state = self.state.lock();
            if !state.pending.is_empty()
                || state.in_flight.is_some()
                || self.broadcasts.has_pending_job()
            {
                debug!("Queue busy, refusing {} ({})", id, title);
                return None;
            }
            entry.log_stage(TransactionStatus::Pending);
            state.pending.push_back(entry);
            state.pending.len()
        };

        self.queued(id, &title, depth);
        Some(id)
    }

    fn queued(&self, id: Uuid, title: &str, depth: usize) {
        info!("Queued transaction {} ({}), {} waiting", id, title, depth);
        self.notify.notify_one();
    }

    /// Anything queued or currently being signed/broadcast
    pub fn has_pending_job(&self) -> bool {
        let state = self.state.lock();
        !state.pending.is_empty() || state.in_flight.is_some()
    }

    pub fn has_pending_broadcast_job(&self) -> bool {
        self.broadcasts.has_pending_job()
    }

    pub fn first_broadcast_job(&self) -> Option<BroadcastJobSummary> {
        self.broadcasts.first_job()
    }

    pub fn len(&self) -> usize {
        self.state.lock().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries waiting to be processed, oldest first
    pub fn pending_entries(&self) -> Vec<EntrySummary> {
        let state = self.state.lock();
        state
            .pending
            .iter()
            .map(|e| EntrySummary {
                id: e.id,
                title: e.title.clone(),
                description: e.description.clone(),
                drawer_messages: e.drawer_messages.clone(),
                created_at: e.created_at,
            })
            .collect()
    }

    /// Process the oldest entry.
    ///
    /// Returns `Ok(None)` when the queue is empty and `QueueBusy` when another
    /// caller is already processing. A failed entry is retired, not retried.
    /// Dropping the returned future retires the entry as well.
    pub async fn process_next(&self) -> Result<Option<BroadcastReceipt>> {
        let entry = {
            let mut state = self.state.lock();
            if let Some(id) = state.in_flight {
                return Err(WalletError::QueueBusy(id));
            }
            match state.pending.pop_front() {
                Some(entry) => {
                    state.in_flight = Some(entry.id);
                    entry
                }
                None => return Ok(None),
            }
        };

        let mut guard = InFlightGuard {
            queue: self,
            id: entry.id,
            finished: false,
        };
        let result = self.execute(entry).await;
        guard.finished = true;

        result.map(Some)
    }

    /// Drain the queue, logging failed entries and moving on
    pub async fn process_pending(&self) -> Result<usize> {
        let mut broadcasted = 0;

        loop {
            match self.process_next().await {
                Ok(Some(_)) => broadcasted += 1,
                Ok(None) => break,
                Err(e @ WalletError::QueueBusy(_)) => return Err(e),
                Err(e) => warn!("❌ Transaction dropped from queue: {}", e),
            }
        }

        Ok(broadcasted)
    }

    /// Background consumer: processes entries as they are pushed until shutdown fires
    pub async fn run(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        info!("Starting transaction queue worker");

        loop {
            if let Err(e) = self.process_pending().await {
                warn!("Transaction queue worker: {}", e);
            }

            tokio::select! {
                _ = self.notify.notified() => {}
                _ = shutdown.changed() => {
                    info!("Transaction queue worker stopped");
                    break;
                }
            }
        }
    }

    async fn execute(&self, entry: TransactionQueueEntry) -> Result<BroadcastReceipt> {
        info!("Processing transaction {} ({})", entry.id, entry.title);
        entry.log_stage(TransactionStatus::Signing);

        let transaction = match entry.signer.sign(self.account.as_ref()).await {
            Ok(tx) => tx,
            Err(e) => {
                error!("❌ Failed to sign transaction {}: {}", entry.id, e);
                entry.log_stage(TransactionStatus::Failed);
                return Err(e);
            }
        };

        self.broadcasts.push(BroadcastJob {
            entry_id: entry.id,
            title: entry.title.clone(),
            submit_button_label: entry.submit_button_label.clone(),
            transaction: transaction.clone(),
        });
        entry.log_stage(TransactionStatus::Broadcasting);

        let result = self.broadcaster.broadcast(&transaction).await;
        self.broadcasts.complete(entry.id);

        let txid = match result {
            Ok(txid) => txid,
            Err(e) => {
                error!("❌ Failed to broadcast transaction {}: {}", entry.id, e);
                entry.log_stage(TransactionStatus::Failed);
                return Err(e);
            }
        };

        info!("✅ Transaction {} broadcasted: {}", entry.id, txid);
        entry.log_stage(TransactionStatus::Broadcasted);

        let receipt = BroadcastReceipt {
            entry_id: entry.id,
            txid,
            title: entry.title,
            complete_message: entry.drawer_messages.complete,
        };

        if let Some(callback) = entry.on_broadcast {
            let on_page = entry
                .page_presence
                .as_ref()
                .map_or(true, |presence| presence.is_on_page());

            if on_page {
                callback(&receipt);
            } else {
                debug!("Screen left before {} was broadcast, skipping callback", receipt.entry_id);
            }
        }

        Ok(receipt)
    }
}

/// Retires the in-flight entry once `process_next` ends, whether it completed
/// or its future was dropped mid-await.
struct InFlightGuard<'a> {
    queue: &'a TransactionQueue,
    id: Uuid,
    finished: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("Transaction {} abandoned before completion, retiring it", self.id);
        }

        self.queue.broadcasts.complete(self.id);

        let mut state = self.queue.state.lock();
        if state.in_flight == Some(self.id) {
            state.in_flight = None;
        }
    }
}
