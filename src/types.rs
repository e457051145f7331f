//! Core types and data structures for the banking ledger

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque account identifier.
///
/// Identifiers are totally ordered; the store relies on this order when it
/// has to hold exclusive access to two accounts at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Monotonically assigned transaction identifier.
///
/// Assigned by the transaction log from a single process-wide counter, so a
/// higher value always means a later append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub u64);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A monetary account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier, immutable once assigned
    pub id: AccountId,
    /// Current balance; never negative after a completed operation
    pub balance: BigDecimal,
    /// When the account was created
    pub created_at: NaiveDateTime,
    /// When the balance last changed
    pub updated_at: NaiveDateTime,
}

impl Account {
    /// Create a new account with the given opening balance
    pub fn new(id: AccountId, balance: BigDecimal) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id,
            balance,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The kind of balance mutation a transaction records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Funds added to the account
    Deposit,
    /// Funds removed from the account
    Withdraw,
    /// Debit side of a transfer
    TransferOut,
    /// Credit side of a transfer
    TransferIn,
}

/// An immutable record of a single balance mutation.
///
/// A transfer produces two linked records, one per side, sharing the same
/// `transfer_ref`. Records are never updated or deleted, and they outlive the
/// account they reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, monotonically assigned
    pub id: TransactionId,
    /// Account whose balance this mutation affected
    pub account_id: AccountId,
    /// Positive magnitude of the mutation
    pub amount: BigDecimal,
    /// Kind of mutation
    pub kind: TransactionKind,
    /// Shared reference linking the two sides of a transfer
    pub transfer_ref: Option<Uuid>,
    /// When the mutation was recorded
    pub timestamp: NaiveDateTime,
}

/// The unsequenced input to the transaction log.
///
/// The log assigns the identifier and timestamp at append time.
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub account_id: AccountId,
    pub amount: BigDecimal,
    pub kind: TransactionKind,
    pub transfer_ref: Option<Uuid>,
}

impl TransactionRecord {
    /// Record for a deposit
    pub fn deposit(account_id: AccountId, amount: BigDecimal) -> Self {
        Self {
            account_id,
            amount,
            kind: TransactionKind::Deposit,
            transfer_ref: None,
        }
    }

    /// Record for a withdrawal
    pub fn withdraw(account_id: AccountId, amount: BigDecimal) -> Self {
        Self {
            account_id,
            amount,
            kind: TransactionKind::Withdraw,
            transfer_ref: None,
        }
    }

    /// Debit-side record of a transfer
    pub fn transfer_out(account_id: AccountId, amount: BigDecimal, transfer_ref: Uuid) -> Self {
        Self {
            account_id,
            amount,
            kind: TransactionKind::TransferOut,
            transfer_ref: Some(transfer_ref),
        }
    }

    /// Credit-side record of a transfer
    pub fn transfer_in(account_id: AccountId, amount: BigDecimal, transfer_ref: Uuid) -> Self {
        Self {
            account_id,
            amount,
            kind: TransactionKind::TransferIn,
            transfer_ref: Some(transfer_ref),
        }
    }
}

/// Errors that can occur in the ledger system.
///
/// Each business-rule failure surfaces as its own variant so callers can tell
/// "retrying won't help" (`NotFound`, `InvalidArgument`, `InsufficientFunds`)
/// from "retry may help" (`StoreUnavailable`).
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("account not found: {0}")]
    NotFound(AccountId),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("insufficient funds in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account: AccountId,
        balance: BigDecimal,
        requested: BigDecimal,
    },
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
