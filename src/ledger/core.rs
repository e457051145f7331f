//! Ledger facade that coordinates the account directory and the engine

use bigdecimal::BigDecimal;

use crate::ledger::{AccountDirectory, LedgerEngine};
use crate::traits::{LedgerStore, TransactionLog};
use crate::types::*;
use crate::utils::{MemoryLog, MemoryStore};

/// Single handle over all ledger operations.
///
/// Holds an [`AccountDirectory`] and a [`LedgerEngine`] sharing the same
/// store and log. All methods take `&self`, so one (cloned) handle can serve
/// any number of concurrent callers; per-account serialization happens in the
/// store, not here.
#[derive(Debug, Clone)]
pub struct Ledger<S: LedgerStore + Clone, L: TransactionLog + Clone> {
    directory: AccountDirectory<S>,
    engine: LedgerEngine<S, L>,
}

impl<S: LedgerStore + Clone, L: TransactionLog + Clone> Ledger<S, L> {
    /// Create a new ledger over the given storage backends
    pub fn new(store: S, log: L) -> Self {
        Self {
            directory: AccountDirectory::new(store.clone()),
            engine: LedgerEngine::new(store, log),
        }
    }

    // Directory operations

    /// Create a new account with the given opening balance
    pub async fn create_account(&self, initial_balance: BigDecimal) -> LedgerResult<Account> {
        self.directory.create_account(initial_balance).await
    }

    /// Get an account by ID
    pub async fn get_account(&self, id: &AccountId) -> LedgerResult<Account> {
        self.directory.get_account(id).await
    }

    /// List all accounts in insertion order
    pub async fn list_accounts(&self) -> LedgerResult<Vec<Account>> {
        self.directory.list_accounts().await
    }

    /// Delete an account, leaving its transaction history intact
    pub async fn delete_account(&self, id: &AccountId) -> LedgerResult<()> {
        self.directory.delete_account(id).await
    }

    // Engine operations

    /// Deposit funds; returns the post-operation account state
    pub async fn deposit(&self, id: AccountId, amount: BigDecimal) -> LedgerResult<Account> {
        self.engine.deposit(id, amount).await
    }

    /// Withdraw funds; returns the post-operation account state
    pub async fn withdraw(&self, id: AccountId, amount: BigDecimal) -> LedgerResult<Account> {
        self.engine.withdraw(id, amount).await
    }

    /// Transfer funds between two accounts; returns both post-transfer states
    pub async fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: BigDecimal,
    ) -> LedgerResult<(Account, Account)> {
        self.engine.transfer(from, to, amount).await
    }

    /// All transactions for an account, most recent first
    pub async fn history(&self, id: &AccountId) -> LedgerResult<Vec<Transaction>> {
        self.engine.history(id).await
    }
}

impl Ledger<MemoryStore, MemoryLog> {
    /// Ledger over fresh in-memory backends
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), MemoryLog::new())
    }
}

impl Default for Ledger<MemoryStore, MemoryLog> {
    fn default() -> Self {
        Self::in_memory()
    }
}
