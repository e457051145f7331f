//! Validation utilities

use crate::types::*;
use bigdecimal::BigDecimal;

/// Smallest representable unit is one cent: amounts may carry at most this
/// many fractional digits.
pub const MAX_FRACTIONAL_DIGITS: i64 = 2;

/// Validate that an operation amount is strictly positive and representable
pub fn validate_amount(amount: &BigDecimal) -> LedgerResult<()> {
    if *amount <= BigDecimal::from(0) {
        return Err(LedgerError::InvalidArgument(
            "amount must be positive".to_string(),
        ));
    }
    validate_precision(amount)
}

/// Validate that an opening balance is non-negative and representable
pub fn validate_initial_balance(balance: &BigDecimal) -> LedgerResult<()> {
    if *balance < BigDecimal::from(0) {
        return Err(LedgerError::InvalidArgument(
            "initial balance cannot be negative".to_string(),
        ));
    }
    validate_precision(balance)
}

/// Reject values carrying more precision than the ledger supports.
///
/// Over-precise amounts are rejected rather than rounded, so no caller ever
/// has a cent silently appear or disappear.
pub fn validate_precision(value: &BigDecimal) -> LedgerResult<()> {
    if value.normalized().fractional_digit_count() > MAX_FRACTIONAL_DIGITS {
        return Err(LedgerError::InvalidArgument(format!(
            "amount {} exceeds {} fractional digits",
            value, MAX_FRACTIONAL_DIGITS
        )));
    }
    Ok(())
}
