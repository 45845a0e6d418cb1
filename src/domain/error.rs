//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

use super::money::Currency;

/// Domain-specific errors
///
/// These errors represent business rule violations and domain invariant
/// failures. They are independent of the persistence and adapter layers,
/// non-retryable, and surfaced verbatim to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Money amounts are minor-unit integers and can never be negative
    #[error("Money amount must be non-negative (got {0})")]
    NegativeAmount(i64),

    /// A transfer value must move at least one minor unit
    #[error("Transfer value must be positive (got {0})")]
    NonPositiveAmount(i64),

    /// Addition left the representable integer range
    #[error("Amount overflows the representable range")]
    AmountOverflow,

    /// Arithmetic across differing currencies is undefined
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: Currency, right: Currency },

    /// Insufficient funds for a debit operation
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: i64, available: i64 },

    /// Role string is not one of the known roles
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// Document is not well-formed for its declared kind
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Email address fails the shape check
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Full name must not be empty
    #[error("Full name must not be empty")]
    InvalidFullName,

    /// Payer and payee must be distinct wallets
    #[error("Cannot transfer to the same wallet")]
    SameWalletTransfer,

    /// Transfer statuses are append-only; terminal states admit no exit
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_funds_carries_both_sides() {
        let err = DomainError::InsufficientFunds {
            required: 100,
            available: 50,
        };

        assert!(err.to_string().contains("100"));
        assert!(err.to_string().contains("50"));
    }

    #[test]
    fn currency_mismatch_names_both_currencies() {
        let err = DomainError::CurrencyMismatch {
            left: Currency::Brl,
            right: Currency::Usd,
        };

        assert!(err.to_string().contains("BRL"));
        assert!(err.to_string().contains("USD"));
    }
}
