//! Ledger module containing the account directory, the mutation engine, and
//! the facade that ties them together

pub mod core;
pub mod directory;
pub mod engine;

pub use core::*;
pub use directory::*;
pub use engine::*;
