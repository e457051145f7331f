//! Ledger engine: deposits, withdrawals, transfers, and history reads

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::traits::{LedgerStore, TransactionLog};
use crate::types::*;
use crate::utils::validation::validate_amount;

/// Stateless mutation logic over a [`LedgerStore`] and a [`TransactionLog`].
///
/// Every operation is a validate-then-commit unit run inside the store's
/// exclusive window for the touched account(s). The log append happens inside
/// the window, so a failed append rolls the balance back and the account is
/// left in its pre-operation state. Reads do not take the window: a `history`
/// call interleaving with an in-flight commit may see the freshly appended
/// record an instant before the balance write lands. Mutation windows, not
/// reads, are what serialize.
#[derive(Debug, Clone)]
pub struct LedgerEngine<S: LedgerStore, L: TransactionLog> {
    store: S,
    log: L,
}

impl<S: LedgerStore, L: TransactionLog> LedgerEngine<S, L> {
    /// Create a new engine over the given store and log
    pub fn new(store: S, log: L) -> Self {
        Self { store, log }
    }

    /// Add funds to an account and record a `DEPOSIT` transaction.
    ///
    /// Fails with [`LedgerError::InvalidArgument`] on a non-positive or
    /// over-precise amount, [`LedgerError::NotFound`] on a missing account.
    pub async fn deposit(&self, id: AccountId, amount: BigDecimal) -> LedgerResult<Account> {
        validate_amount(&amount)?;
        let log = &self.log;
        let (account, transaction) = self
            .store
            .with_account(id, |balance| {
                *balance += &amount;
                log.append(TransactionRecord::deposit(id, amount.clone()))
            })
            .await?;
        tracing::info!(
            account = %account.id,
            transaction = %transaction.id,
            amount = %transaction.amount,
            "deposit committed"
        );
        Ok(account)
    }

    /// Remove funds from an account and record a `WITHDRAW` transaction.
    ///
    /// The funds check and the debit happen inside the same exclusive window,
    /// so no concurrent operation can change the balance between them. Fails
    /// with [`LedgerError::InsufficientFunds`] when the balance is short.
    pub async fn withdraw(&self, id: AccountId, amount: BigDecimal) -> LedgerResult<Account> {
        validate_amount(&amount)?;
        let log = &self.log;
        let (account, transaction) = self
            .store
            .with_account(id, |balance| {
                if *balance < amount {
                    return Err(LedgerError::InsufficientFunds {
                        account: id,
                        balance: balance.clone(),
                        requested: amount.clone(),
                    });
                }
                *balance -= &amount;
                log.append(TransactionRecord::withdraw(id, amount.clone()))
            })
            .await?;
        tracing::info!(
            account = %account.id,
            transaction = %transaction.id,
            amount = %transaction.amount,
            "withdrawal committed"
        );
        Ok(account)
    }

    /// Move funds between two accounts as one atomic unit.
    ///
    /// Debit, credit, and the two linked records (`TRANSFER_OUT` on `from`,
    /// `TRANSFER_IN` on `to`, sharing one transfer reference) commit while
    /// both accounts' windows are held, so a partial transfer is never
    /// observable. Returns the two post-transfer accounts in argument order.
    pub async fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: BigDecimal,
    ) -> LedgerResult<(Account, Account)> {
        validate_amount(&amount)?;
        if from == to {
            return Err(LedgerError::InvalidArgument(
                "cannot transfer to the same account".to_string(),
            ));
        }
        let reference = Uuid::new_v4();
        let log = &self.log;
        let (from_account, to_account, (debit, credit)) = self
            .store
            .with_account_pair(from, to, |from_balance, to_balance| {
                if *from_balance < amount {
                    return Err(LedgerError::InsufficientFunds {
                        account: from,
                        balance: from_balance.clone(),
                        requested: amount.clone(),
                    });
                }
                *from_balance -= &amount;
                *to_balance += &amount;
                log.append_transfer(
                    TransactionRecord::transfer_out(from, amount.clone(), reference),
                    TransactionRecord::transfer_in(to, amount.clone(), reference),
                )
            })
            .await?;
        tracing::info!(
            from = %from,
            to = %to,
            transfer_ref = %reference,
            debit = %debit.id,
            credit = %credit.id,
            amount = %amount,
            "transfer committed"
        );
        Ok((from_account, to_account))
    }

    /// All transactions for an account, most recent first.
    ///
    /// A deleted account keeps a readable history; only an identifier that
    /// resolves to neither an account nor any recorded transaction fails with
    /// [`LedgerError::NotFound`].
    pub async fn history(&self, id: &AccountId) -> LedgerResult<Vec<Transaction>> {
        let transactions = self.log.history(id)?;
        if transactions.is_empty() && self.store.get_account(id).await?.is_none() {
            return Err(LedgerError::NotFound(*id));
        }
        tracing::debug!(account = %id, count = transactions.len(), "history read");
        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{MemoryLog, MemoryStore};

    async fn engine_with_account(
        balance: i64,
    ) -> (LedgerEngine<MemoryStore, MemoryLog>, AccountId) {
        let store = MemoryStore::new();
        let account = store
            .insert_account(Account::new(AccountId::new(), BigDecimal::from(balance)))
            .await
            .unwrap();
        (LedgerEngine::new(store, MemoryLog::new()), account.id)
    }

    #[tokio::test]
    async fn deposit_on_unknown_account_fails_not_found() {
        let engine = LedgerEngine::new(MemoryStore::new(), MemoryLog::new());
        let result = engine.deposit(AccountId::new(), BigDecimal::from(10)).await;
        assert!(matches!(result, Err(LedgerError::NotFound(_))));
    }

    #[tokio::test]
    async fn failed_withdrawal_records_nothing() {
        let (engine, id) = engine_with_account(30).await;
        let result = engine.withdraw(id, BigDecimal::from(50)).await;
        assert!(matches!(result, Err(LedgerError::InsufficientFunds { .. })));
        assert!(engine.history(&id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn transfer_to_self_is_invalid() {
        let (engine, id) = engine_with_account(100).await;
        let result = engine.transfer(id, id, BigDecimal::from(10)).await;
        assert!(matches!(result, Err(LedgerError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn zero_amount_is_rejected_before_any_lookup() {
        let engine = LedgerEngine::new(MemoryStore::new(), MemoryLog::new());
        // Invalid amount wins over the missing account.
        let result = engine.deposit(AccountId::new(), BigDecimal::from(0)).await;
        assert!(matches!(result, Err(LedgerError::InvalidArgument(_))));
    }

    /// Log double whose appends always fail, for rollback coverage.
    #[derive(Clone)]
    struct UnavailableLog;

    impl TransactionLog for UnavailableLog {
        fn append(&self, _record: TransactionRecord) -> LedgerResult<Transaction> {
            Err(LedgerError::StoreUnavailable("log offline".to_string()))
        }

        fn append_transfer(
            &self,
            _debit: TransactionRecord,
            _credit: TransactionRecord,
        ) -> LedgerResult<(Transaction, Transaction)> {
            Err(LedgerError::StoreUnavailable("log offline".to_string()))
        }

        fn history(&self, _account_id: &AccountId) -> LedgerResult<Vec<Transaction>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn failed_log_append_rolls_the_balance_back() {
        let store = MemoryStore::new();
        let account = store
            .insert_account(Account::new(AccountId::new(), BigDecimal::from(100)))
            .await
            .unwrap();
        let engine = LedgerEngine::new(store.clone(), UnavailableLog);

        let deposit = engine.deposit(account.id, BigDecimal::from(50)).await;
        assert!(matches!(deposit, Err(LedgerError::StoreUnavailable(_))));

        let other = store
            .insert_account(Account::new(AccountId::new(), BigDecimal::from(0)))
            .await
            .unwrap();
        let transfer = engine
            .transfer(account.id, other.id, BigDecimal::from(40))
            .await;
        assert!(matches!(transfer, Err(LedgerError::StoreUnavailable(_))));

        // Pre-operation state on both sides; the caller may retry.
        let untouched = store.get_account(&account.id).await.unwrap().unwrap();
        assert_eq!(untouched.balance, BigDecimal::from(100));
        let other_untouched = store.get_account(&other.id).await.unwrap().unwrap();
        assert_eq!(other_untouched.balance, BigDecimal::from(0));
    }
}
