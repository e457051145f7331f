//! In-memory transaction log for testing and development

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::traits::TransactionLog;
use crate::types::*;

/// In-memory [`TransactionLog`] implementation.
///
/// Entries are held in an append-only vector; identifiers come from a single
/// shared atomic counter, the one piece of intentionally global state in the
/// system. Cloning yields another handle to the same log.
#[derive(Debug, Clone)]
pub struct MemoryLog {
    entries: Arc<RwLock<Vec<Transaction>>>,
    next_id: Arc<AtomicU64>,
}

impl MemoryLog {
    /// Create a new empty log
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Total number of recorded transactions
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }

    fn sequence(&self, record: TransactionRecord) -> Transaction {
        Transaction {
            id: TransactionId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            account_id: record.account_id,
            amount: record.amount,
            kind: record.kind,
            transfer_ref: record.transfer_ref,
            timestamp: chrono::Utc::now().naive_utc(),
        }
    }
}

impl Default for MemoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionLog for MemoryLog {
    fn append(&self, record: TransactionRecord) -> LedgerResult<Transaction> {
        let transaction = self.sequence(record);
        self.entries.write().unwrap().push(transaction.clone());
        Ok(transaction)
    }

    fn append_transfer(
        &self,
        debit: TransactionRecord,
        credit: TransactionRecord,
    ) -> LedgerResult<(Transaction, Transaction)> {
        // Both records land under one write lock, so no reader can observe
        // the debit side without the credit side.
        let mut entries = self.entries.write().unwrap();
        let out = self.sequence(debit);
        let incoming = self.sequence(credit);
        entries.push(out.clone());
        entries.push(incoming.clone());
        Ok((out, incoming))
    }

    fn history(&self, account_id: &AccountId) -> LedgerResult<Vec<Transaction>> {
        let mut matches: Vec<Transaction> = self
            .entries
            .read()
            .unwrap()
            .iter()
            .filter(|transaction| transaction.account_id == *account_id)
            .cloned()
            .collect();
        // Most recent first; equal timestamps fall back to the monotonic id.
        matches.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id)));
        Ok(matches)
    }
}
