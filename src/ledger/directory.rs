//! Account directory: create, look up, list, and delete accounts

use bigdecimal::BigDecimal;

use crate::traits::LedgerStore;
use crate::types::*;
use crate::utils::validation::validate_initial_balance;

/// Directory of account metadata, backed by a [`LedgerStore`].
///
/// The directory owns identifier assignment; balances are only ever mutated
/// through the engine's exclusive windows.
#[derive(Debug, Clone)]
pub struct AccountDirectory<S: LedgerStore> {
    store: S,
}

impl<S: LedgerStore> AccountDirectory<S> {
    /// Create a new directory over the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create an account with the given opening balance.
    ///
    /// Fails with [`LedgerError::InvalidArgument`] if the balance is negative
    /// or carries more precision than the ledger supports.
    pub async fn create_account(&self, initial_balance: BigDecimal) -> LedgerResult<Account> {
        validate_initial_balance(&initial_balance)?;
        let account = self
            .store
            .insert_account(Account::new(AccountId::new(), initial_balance))
            .await?;
        tracing::info!(account = %account.id, balance = %account.balance, "account created");
        Ok(account)
    }

    /// Get an account by ID; fails with [`LedgerError::NotFound`] if absent
    pub async fn get_account(&self, id: &AccountId) -> LedgerResult<Account> {
        self.store
            .get_account(id)
            .await?
            .ok_or(LedgerError::NotFound(*id))
    }

    /// List all accounts in insertion order
    pub async fn list_accounts(&self) -> LedgerResult<Vec<Account>> {
        self.store.list_accounts().await
    }

    /// Delete an account.
    ///
    /// Fails with [`LedgerError::NotFound`] if absent, including on a second
    /// delete of the same id. The account's transaction history is untouched.
    pub async fn delete_account(&self, id: &AccountId) -> LedgerResult<()> {
        self.store.remove_account(id).await?;
        tracing::info!(account = %id, "account deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::MemoryStore;

    #[tokio::test]
    async fn create_rejects_negative_opening_balance() {
        let directory = AccountDirectory::new(MemoryStore::new());
        let result = directory.create_account(BigDecimal::from(-1)).await;
        assert!(matches!(result, Err(LedgerError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn second_delete_fails_not_found() {
        let directory = AccountDirectory::new(MemoryStore::new());
        let account = directory.create_account(BigDecimal::from(0)).await.unwrap();
        directory.delete_account(&account.id).await.unwrap();
        let result = directory.delete_account(&account.id).await;
        assert!(matches!(result, Err(LedgerError::NotFound(_))));
    }

    #[tokio::test]
    async fn listing_preserves_insertion_order() {
        let directory = AccountDirectory::new(MemoryStore::new());
        let mut created = Vec::new();
        for n in 0..4 {
            created.push(directory.create_account(BigDecimal::from(n)).await.unwrap());
        }
        let listed = directory.list_accounts().await.unwrap();
        assert_eq!(
            listed.iter().map(|a| a.id).collect::<Vec<_>>(),
            created.iter().map(|a| a.id).collect::<Vec<_>>()
        );
    }
}
