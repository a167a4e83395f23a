//! Pending transaction ledger
//!
//! Tracks approval and swap transactions from submission until they are
//! mined or fail. Settled entries are dropped; nothing is persisted.

use std::time::Instant;

use serde::Serialize;
use swapdesk_core::{TxHash, TxKind, TxRecord, TxState};

struct LedgerEntry {
    record: TxRecord,
    submitted_at: Instant,
}

/// A pending transaction as reported to the page
#[derive(Debug, Clone, Serialize)]
pub struct PendingTx {
    pub kind: TxKind,
    pub hash: TxHash,
    pub state: TxState,
    pub elapsed_secs: u64,
}

#[derive(Default)]
pub struct TxLedger {
    entries: Vec<LedgerEntry>,
}

impl TxLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a freshly submitted transaction
    pub fn track(&mut self, kind: TxKind, hash: TxHash) {
        tracing::debug!(%hash, %kind, "Tracking transaction");
        self.entries.push(LedgerEntry {
            record: TxRecord::pending(kind, hash),
            submitted_at: Instant::now(),
        });
    }

    /// Record the final state of a transaction and drop it.
    ///
    /// Returns the settled record, or `None` if the hash was never tracked.
    pub fn settle(&mut self, hash: TxHash, state: TxState) -> Option<TxRecord> {
        let pos = self.entries.iter().position(|e| e.record.hash == hash)?;
        let entry = self.entries.remove(pos);
        let elapsed = entry.submitted_at.elapsed().as_secs();

        let mut record = entry.record;
        record.state = state;
        tracing::info!(%hash, kind = %record.kind, ?state, elapsed_secs = elapsed, "Transaction settled");
        Some(record)
    }

    pub fn pending(&self) -> Vec<PendingTx> {
        self.entries
            .iter()
            .map(|e| PendingTx {
                kind: e.record.kind,
                hash: e.record.hash,
                state: e.record.state,
                elapsed_secs: e.submitted_at.elapsed().as_secs(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_and_settle() {
        let mut ledger = TxLedger::new();
        let approval = TxHash::with_last_byte(1);
        let swap = TxHash::with_last_byte(2);

        ledger.track(TxKind::Approval, approval);
        ledger.track(TxKind::Swap, swap);
        assert_eq!(ledger.len(), 2);

        let settled = ledger.settle(approval, TxState::Confirmed).unwrap();
        assert_eq!(settled.kind, TxKind::Approval);
        assert_eq!(settled.state, TxState::Confirmed);

        let pending = ledger.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].hash, swap);
        assert_eq!(pending[0].state, TxState::Pending);
    }

    #[test]
    fn test_settle_unknown_hash() {
        let mut ledger = TxLedger::new();
        assert!(ledger.settle(TxHash::with_last_byte(9), TxState::Failed).is_none());
        assert!(ledger.is_empty());
    }
}
