//! Live balance feed for snapshot consumers.
//!
//! The external store notifies this feed with the full current transaction
//! set whenever any record changes. Each emission triggers a from-scratch
//! recomputation whose result is published over a watch channel; consumers
//! always observe the most recently published report. When emissions race,
//! only the newest one wins: a recomputation that finishes after a newer one
//! has already been published is discarded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use log::{info, warn};
use shared::{BalanceUpdate, FeedStatus, Transaction};
use tokio::sync::watch;

use super::balance_sheet_service::BalanceSheetService;

/// Publishes recomputed balance reports to any number of subscribers
pub struct BalanceFeed {
    service: BalanceSheetService,
    sender: watch::Sender<BalanceUpdate>,
    next_revision: AtomicU64,
    last_published: Mutex<u64>,
}

impl BalanceFeed {
    pub fn new() -> Self {
        let service = BalanceSheetService::new();
        let initial = BalanceUpdate {
            revision: 0,
            status: FeedStatus::Live,
            report: service.build_report(&[]),
        };
        let (sender, _receiver) = watch::channel(initial);

        Self {
            service,
            sender,
            next_revision: AtomicU64::new(0),
            last_published: Mutex::new(0),
        }
    }

    /// Subscribe to balance updates. The receiver starts out holding the most
    /// recently published update.
    pub fn subscribe(&self) -> watch::Receiver<BalanceUpdate> {
        self.sender.subscribe()
    }

    /// Handle a complete transaction set emission from the store.
    ///
    /// The emission is stamped with a revision on arrival. The recomputed
    /// report is only published if nothing newer has been published in the
    /// meantime, so out-of-order completions cannot clobber fresher data.
    pub fn on_transaction_set_changed(&self, transactions: &[Transaction]) {
        let revision = self.next_revision.fetch_add(1, Ordering::SeqCst) + 1;
        let report = self.service.build_report(transactions);

        let mut last_published = self.last_published.lock().unwrap();
        if revision <= *last_published {
            warn!(
                "Discarding stale balance recomputation: revision {} already superseded by {}",
                revision, *last_published
            );
            return;
        }
        *last_published = revision;

        self.sender.send_replace(BalanceUpdate {
            revision,
            status: FeedStatus::Live,
            report,
        });
        info!(
            "Published balance report revision {} from {} transactions",
            revision,
            transactions.len()
        );
    }

    /// Record a feed-level failure. The last good report is retained and
    /// flagged stale so the presentation layer can distinguish it from live
    /// data.
    pub fn mark_stale(&self) {
        warn!("Transaction feed reported an error, marking balance data as stale");
        self.sender.send_modify(|update| update.status = FeedStatus::Stale);
    }

    /// The most recently published update
    pub fn latest(&self) -> BalanceUpdate {
        self.sender.borrow().clone()
    }
}

impl Default for BalanceFeed {
    fn default() -> Self {
        Self::new()
    }
}
