//! Money value object
//!
//! Domain primitive for monetary values. Amounts are integers in minor
//! currency units (cents); there is no floating-point representation
//! anywhere. Values are validated at construction time, ensuring invalid
//! money cannot exist in the system.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Supported currencies.
///
/// One currency per wallet; conversion between currencies is out of scope
/// and any cross-currency arithmetic is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Brl,
    Usd,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Brl => write!(f, "BRL"),
            Currency::Usd => write!(f, "USD"),
        }
    }
}

/// Money represents a validated monetary value: a non-negative integer
/// amount in minor units plus a currency tag.
///
/// # Invariants
/// - `amount >= 0` always
/// - arithmetic across differing currencies fails with `CurrencyMismatch`
///
/// Money is immutable; every operation produces a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: i64,
    currency: Currency,
}

impl Money {
    /// Create a new Money value with validation.
    ///
    /// # Errors
    /// - `DomainError::NegativeAmount` if `amount < 0`
    pub fn new(currency: Currency, amount: i64) -> Result<Self, DomainError> {
        if amount < 0 {
            return Err(DomainError::NegativeAmount(amount));
        }

        Ok(Self { amount, currency })
    }

    /// Zero value in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: 0,
            currency,
        }
    }

    /// Amount in minor units.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Add another value of the same currency, overflow-checked.
    pub fn add(&self, other: &Money) -> Result<Money, DomainError> {
        self.require_same_currency(other)?;

        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(DomainError::AmountOverflow)?;

        Ok(Self {
            amount,
            currency: self.currency,
        })
    }

    /// Subtract another value of the same currency.
    ///
    /// Never produces a negative amount: fails with `InsufficientFunds`
    /// when `other` exceeds `self`.
    pub fn subtract(&self, other: &Money) -> Result<Money, DomainError> {
        self.require_same_currency(other)?;

        if other.amount > self.amount {
            return Err(DomainError::InsufficientFunds {
                required: other.amount,
                available: self.amount,
            });
        }

        Ok(Self {
            amount: self.amount - other.amount,
            currency: self.currency,
        })
    }

    /// Check whether this value covers `other`.
    pub fn is_sufficient_for(&self, other: &Money) -> Result<bool, DomainError> {
        self.require_same_currency(other)?;
        Ok(self.amount >= other.amount)
    }

    fn require_same_currency(&self, other: &Money) -> Result<(), DomainError> {
        if self.currency != other.currency {
            return Err(DomainError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_negative_amount_accepted() {
        let money = Money::new(Currency::Brl, 100).unwrap();
        assert_eq!(money.amount(), 100);
        assert_eq!(money.currency(), Currency::Brl);
    }

    #[test]
    fn negative_amount_rejected() {
        let result = Money::new(Currency::Brl, -1);
        assert!(matches!(result, Err(DomainError::NegativeAmount(-1))));
    }

    #[test]
    fn zero_amount_is_valid() {
        let money = Money::new(Currency::Brl, 0).unwrap();
        assert_eq!(money, Money::zero(Currency::Brl));
    }

    #[test]
    fn add_same_currency() {
        let a = Money::new(Currency::Brl, 100).unwrap();
        let b = Money::new(Currency::Brl, 50).unwrap();

        let sum = a.add(&b).unwrap();
        assert_eq!(sum.amount(), 150);
    }

    #[test]
    fn add_overflow_rejected() {
        let a = Money::new(Currency::Brl, i64::MAX).unwrap();
        let b = Money::new(Currency::Brl, 1).unwrap();

        assert!(matches!(a.add(&b), Err(DomainError::AmountOverflow)));
    }

    #[test]
    fn subtract_same_currency() {
        let a = Money::new(Currency::Brl, 100).unwrap();
        let b = Money::new(Currency::Brl, 30).unwrap();

        let diff = a.subtract(&b).unwrap();
        assert_eq!(diff.amount(), 70);
    }

    #[test]
    fn subtract_to_exactly_zero() {
        let a = Money::new(Currency::Brl, 100).unwrap();

        let diff = a.subtract(&a).unwrap();
        assert_eq!(diff.amount(), 0);
    }

    #[test]
    fn subtract_more_than_available_rejected() {
        let a = Money::new(Currency::Brl, 100).unwrap();
        let b = Money::new(Currency::Brl, 1000).unwrap();

        let result = a.subtract(&b);
        assert!(matches!(
            result,
            Err(DomainError::InsufficientFunds {
                required: 1000,
                available: 100,
            })
        ));
        // original value untouched
        assert_eq!(a.amount(), 100);
    }

    #[test]
    fn cross_currency_arithmetic_rejected() {
        let brl = Money::new(Currency::Brl, 100).unwrap();
        let usd = Money::new(Currency::Usd, 100).unwrap();

        assert!(matches!(
            brl.add(&usd),
            Err(DomainError::CurrencyMismatch { .. })
        ));
        assert!(matches!(
            brl.subtract(&usd),
            Err(DomainError::CurrencyMismatch { .. })
        ));
        assert!(matches!(
            brl.is_sufficient_for(&usd),
            Err(DomainError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn sufficiency_check() {
        let balance = Money::new(Currency::Brl, 50).unwrap();
        let small = Money::new(Currency::Brl, 50).unwrap();
        let large = Money::new(Currency::Brl, 100).unwrap();

        assert!(balance.is_sufficient_for(&small).unwrap());
        assert!(!balance.is_sufficient_for(&large).unwrap());
    }
}
