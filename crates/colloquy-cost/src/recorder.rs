// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fire-and-forget front for the usage ledger.
//!
//! Callers hand entries to an unbounded channel and move on; a single worker
//! task writes them through the ledger. A failed or unrecordable entry is
//! logged and dropped, never surfaced to the caller: usage accounting must
//! not be able to fail a chat request.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::ledger::{UsageEntry, UsageLedger};

/// Queues usage entries for background recording. Cloneable; all clones feed
/// the same worker.
#[derive(Clone)]
pub struct UsageRecorder {
    tx: mpsc::UnboundedSender<UsageEntry>,
}

impl UsageRecorder {
    /// Spawn the recording worker.
    ///
    /// The returned handle completes once every sender clone is dropped and
    /// the queue has drained; await it at shutdown so tail entries reach the
    /// ledger.
    pub fn spawn(ledger: UsageLedger) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<UsageEntry>();
        let worker = tokio::spawn(async move {
            while let Some(entry) = rx.recv().await {
                match ledger.record(&entry).await {
                    Ok(Some(id)) => debug!(id = %id, "usage entry recorded"),
                    Ok(None) => {}
                    Err(e) => warn!(error = %e, "usage entry dropped"),
                }
            }
            debug!("usage recorder drained");
        });
        (Self { tx }, worker)
    }

    /// Queue an entry. Never blocks and never fails the caller; if the
    /// worker is gone the entry is dropped with a warning.
    pub fn record(&self, entry: UsageEntry) {
        if self.tx.send(entry).is_err() {
            warn!("usage recorder is shut down; entry dropped");
        }
    }
}
