//! Utility modules

pub mod memory_log;
pub mod memory_store;
pub mod validation;

pub use memory_log::*;
pub use memory_store::*;
pub use validation::*;
