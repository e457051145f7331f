//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::types::*;

/// Storage abstraction for account records.
///
/// This trait allows the ledger to work with any storage backend (PostgreSQL,
/// SQLite, in-memory, etc.) by implementing these methods. Besides plain CRUD
/// it provides the exclusive-access primitive the engine builds every balance
/// mutation on: `with_account` and `with_account_pair` serialize all mutation
/// windows per account, so a check made inside the closure still holds when
/// the new balance is committed.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Insert a newly created account
    async fn insert_account(&self, account: Account) -> LedgerResult<Account>;

    /// Get an account by ID
    async fn get_account(&self, id: &AccountId) -> LedgerResult<Option<Account>>;

    /// List all accounts in stable insertion order
    async fn list_accounts(&self) -> LedgerResult<Vec<Account>>;

    /// Remove an account record; fails with [`LedgerError::NotFound`] if absent
    async fn remove_account(&self, id: &AccountId) -> LedgerResult<()>;

    /// Run `f` under sole mutation rights over the account.
    ///
    /// `f` receives a working copy of the balance. On `Ok` the balance is
    /// written back and the updated account returned together with `f`'s
    /// output; on `Err` the record is left exactly as it was. Windows for the
    /// same account never overlap; windows for different accounts do not block
    /// each other.
    async fn with_account<T, F>(&self, id: AccountId, f: F) -> LedgerResult<(Account, T)>
    where
        T: Send,
        F: FnOnce(&mut BigDecimal) -> LedgerResult<T> + Send;

    /// Run `f` under sole mutation rights over two distinct accounts.
    ///
    /// Acquisition is ordered by identifier regardless of argument order, so
    /// two crossed transfers over the same pair cannot deadlock. The balances
    /// are handed to `f` in argument order. Both balances commit on `Ok` as a
    /// single publication — no read, snapshot listings included, observes one
    /// side without the other. Neither changes on `Err`.
    async fn with_account_pair<T, F>(
        &self,
        first: AccountId,
        second: AccountId,
        f: F,
    ) -> LedgerResult<(Account, Account, T)>
    where
        T: Send,
        F: FnOnce(&mut BigDecimal, &mut BigDecimal) -> LedgerResult<T> + Send;
}

/// Append-only record of every balance mutation.
///
/// Appends are the only writes; records are never updated or deleted, and
/// they survive deletion of the account they reference. Identifier assignment
/// is coordinated by the implementation (a single atomic counter), which is
/// what makes concurrent appends safe without further locking.
pub trait TransactionLog: Send + Sync {
    /// Durably record one transaction, assigning its id and timestamp.
    ///
    /// Fails only with [`LedgerError::StoreUnavailable`].
    fn append(&self, record: TransactionRecord) -> LedgerResult<Transaction>;

    /// Record the two sides of a transfer as a single unit.
    ///
    /// Either both records become visible or neither does.
    fn append_transfer(
        &self,
        debit: TransactionRecord,
        credit: TransactionRecord,
    ) -> LedgerResult<(Transaction, Transaction)>;

    /// All transactions for the account, most recent first.
    ///
    /// Equal timestamps tie-break on higher identifier first; timestamps alone
    /// are not assumed unique.
    fn history(&self, account_id: &AccountId) -> LedgerResult<Vec<Transaction>>;
}
