//! # Banking Core
//!
//! A banking ledger engine maintaining monetary account balances and an
//! append-only transaction history, with correctness guarantees under
//! concurrent access.
//!
//! ## Features
//!
//! - **Account directory**: create, look up, list, and delete accounts
//! - **Atomic mutations**: deposit, withdraw, and transfer run as
//!   validate-then-commit units inside per-account exclusive windows
//! - **Append-only history**: every balance mutation produces exactly one
//!   immutable transaction record (two linked records for a transfer),
//!   queryable per account most-recent-first
//! - **Non-negative balances**: overdrafts fail with a distinct
//!   `InsufficientFunds` error; the funds check and the debit share one window
//! - **Deadlock-free transfers**: two-account locking always follows the
//!   identifier order, regardless of caller-supplied from/to order
//! - **Decimal amounts**: `bigdecimal` throughout, no binary floating point
//! - **Storage abstraction**: trait-based store and log with in-memory
//!   implementations included
//!
//! ## Quick Start
//!
//! ```rust
//! use banking_core::Ledger;
//! use bigdecimal::BigDecimal;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> banking_core::LedgerResult<()> {
//! let ledger = Ledger::in_memory();
//!
//! let alice = ledger.create_account(BigDecimal::from(100)).await?;
//! let bob = ledger.create_account(BigDecimal::from(0)).await?;
//!
//! ledger.transfer(alice.id, bob.id, BigDecimal::from(40)).await?;
//!
//! assert_eq!(ledger.get_account(&bob.id).await?.balance, BigDecimal::from(40));
//! # Ok(())
//! # }
//! ```

pub mod ledger;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use ledger::*;
pub use traits::*;
pub use types::*;
pub use utils::{MemoryLog, MemoryStore};
