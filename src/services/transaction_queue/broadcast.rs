//! Broadcast stage of the transaction queue.
//!
//! Signed transactions wait here until the broadcaster accepts them. The head
//! job drives the submit button label while it is in flight.

use parking_lot::Mutex;
use std::collections::VecDeque;
use uuid::Uuid;

use crate::models::SignedTransaction;

/// Signed transaction waiting for broadcast
#[derive(Debug, Clone, PartialEq)]
pub struct BroadcastJob {
    pub entry_id: Uuid,
    pub title: String,
    pub submit_button_label: Option<String>,
    pub transaction: SignedTransaction,
}

/// Title and label of the job currently being broadcast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastJobSummary {
    pub entry_id: Uuid,
    pub title: String,
    pub submit_button_label: Option<String>,
}

#[derive(Debug, Default)]
pub struct BroadcastQueue {
    jobs: Mutex<VecDeque<BroadcastJob>>,
}

impl BroadcastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, job: BroadcastJob) {
        self.jobs.lock().push_back(job);
    }

    /// Drop a job once its broadcast finished, whatever the outcome
    pub fn complete(&self, entry_id: Uuid) -> Option<BroadcastJob> {
        let mut jobs = self.jobs.lock();
        let index = jobs.iter().position(|job| job.entry_id == entry_id)?;
        jobs.remove(index)
    }

    pub fn has_pending_job(&self) -> bool {
        !self.jobs.lock().is_empty()
    }

    pub fn first_job(&self) -> Option<BroadcastJobSummary> {
        self.jobs.lock().front().map(|job| BroadcastJobSummary {
            entry_id: job.entry_id,
            title: job.title.clone(),
            submit_button_label: job.submit_button_label.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.jobs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_pending_job()
    }
}
