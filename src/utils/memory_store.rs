//! In-memory account store for testing and development

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::Mutex as AsyncMutex;

use crate::traits::LedgerStore;
use crate::types::*;

/// In-memory [`LedgerStore`] implementation.
///
/// Account records live in a map behind an `RwLock`; exclusive mutation
/// windows are backed by one `tokio::sync::Mutex` per account, created lazily
/// on first use and kept for the lifetime of the store. Cloning yields another
/// handle to the same state.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
    /// Insertion order of account ids, so listing is stable.
    order: Arc<RwLock<Vec<AccountId>>>,
    locks: Arc<Mutex<HashMap<AccountId, Arc<AsyncMutex<()>>>>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            order: Arc::new(RwLock::new(Vec::new())),
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Lock handle for an account, created on first use.
    ///
    /// Handles are never removed while the store lives, so two callers racing
    /// on the same id always end up on the same mutex.
    fn lock_handle(&self, id: &AccountId) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks.entry(*id).or_default().clone()
    }

    fn balance_of(&self, id: &AccountId) -> LedgerResult<BigDecimal> {
        let accounts = self.accounts.read().unwrap();
        accounts
            .get(id)
            .map(|account| account.balance.clone())
            .ok_or(LedgerError::NotFound(*id))
    }

    fn commit_balance(&self, id: &AccountId, balance: BigDecimal) -> LedgerResult<Account> {
        let mut accounts = self.accounts.write().unwrap();
        let account = accounts.get_mut(id).ok_or(LedgerError::NotFound(*id))?;
        account.balance = balance;
        account.updated_at = chrono::Utc::now().naive_utc();
        Ok(account.clone())
    }

    /// Commit two balances under one write acquisition, so a snapshot reader
    /// can never observe one side of a pair mutation without the other.
    fn commit_balance_pair(
        &self,
        first: &AccountId,
        first_balance: BigDecimal,
        second: &AccountId,
        second_balance: BigDecimal,
    ) -> LedgerResult<(Account, Account)> {
        let mut accounts = self.accounts.write().unwrap();
        // Both sides must resolve before either write.
        if !accounts.contains_key(first) {
            return Err(LedgerError::NotFound(*first));
        }
        if !accounts.contains_key(second) {
            return Err(LedgerError::NotFound(*second));
        }
        let now = chrono::Utc::now().naive_utc();
        let first_account = {
            let account = accounts.get_mut(first).ok_or(LedgerError::NotFound(*first))?;
            account.balance = first_balance;
            account.updated_at = now;
            account.clone()
        };
        let second_account = {
            let account = accounts
                .get_mut(second)
                .ok_or(LedgerError::NotFound(*second))?;
            account.balance = second_balance;
            account.updated_at = now;
            account.clone()
        };
        Ok((first_account, second_account))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn insert_account(&self, account: Account) -> LedgerResult<Account> {
        let mut accounts = self.accounts.write().unwrap();
        if accounts.contains_key(&account.id) {
            return Err(LedgerError::InvalidArgument(format!(
                "account {} already exists",
                account.id
            )));
        }
        self.order.write().unwrap().push(account.id);
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn get_account(&self, id: &AccountId) -> LedgerResult<Option<Account>> {
        Ok(self.accounts.read().unwrap().get(id).cloned())
    }

    async fn list_accounts(&self) -> LedgerResult<Vec<Account>> {
        let accounts = self.accounts.read().unwrap();
        let order = self.order.read().unwrap();
        Ok(order
            .iter()
            .filter_map(|id| accounts.get(id).cloned())
            .collect())
    }

    async fn remove_account(&self, id: &AccountId) -> LedgerResult<()> {
        // Removal takes the account's window so it cannot interleave with an
        // in-flight mutation.
        let handle = self.lock_handle(id);
        let _window = handle.lock().await;
        if self.accounts.write().unwrap().remove(id).is_none() {
            return Err(LedgerError::NotFound(*id));
        }
        self.order.write().unwrap().retain(|known| known != id);
        Ok(())
    }

    async fn with_account<T, F>(&self, id: AccountId, f: F) -> LedgerResult<(Account, T)>
    where
        T: Send,
        F: FnOnce(&mut BigDecimal) -> LedgerResult<T> + Send,
    {
        let handle = self.lock_handle(&id);
        let _window = handle.lock().await;
        // No await points from here on: once the window is held the whole
        // validate+commit unit runs in a single poll, so an abandoned caller
        // can never leave a half-applied mutation.
        let mut balance = self.balance_of(&id)?;
        let output = f(&mut balance)?;
        let account = self.commit_balance(&id, balance)?;
        Ok((account, output))
    }

    async fn with_account_pair<T, F>(
        &self,
        first: AccountId,
        second: AccountId,
        f: F,
    ) -> LedgerResult<(Account, Account, T)>
    where
        T: Send,
        F: FnOnce(&mut BigDecimal, &mut BigDecimal) -> LedgerResult<T> + Send,
    {
        if first == second {
            return Err(LedgerError::InvalidArgument(
                "cannot lock the same account twice".to_string(),
            ));
        }
        // Fixed total order over identifiers, independent of argument order,
        // so crossed transfers over the same pair cannot deadlock.
        let (low, high) = if first < second {
            (first, second)
        } else {
            (second, first)
        };
        let low_handle = self.lock_handle(&low);
        let high_handle = self.lock_handle(&high);
        let _low_window = low_handle.lock().await;
        let _high_window = high_handle.lock().await;

        let mut first_balance = self.balance_of(&first)?;
        let mut second_balance = self.balance_of(&second)?;
        let output = f(&mut first_balance, &mut second_balance)?;
        let (first_account, second_account) =
            self.commit_balance_pair(&first, first_balance, &second, second_balance)?;
        Ok((first_account, second_account, output))
    }
}
