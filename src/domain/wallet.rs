//! Wallet value object
//!
//! A wallet is a user's single balance holding, denominated in one currency.
//! It is owned exclusively by exactly one user and mutated only through
//! `credit` and `debit`, both of which return a new wallet.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::{Currency, Money};

/// Wallet holds one Money value.
///
/// # Invariants
/// - `wallet.money().amount() >= 0` at every observable point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    money: Money,
}

impl Wallet {
    pub fn new(money: Money) -> Self {
        Self { money }
    }

    /// Empty wallet in the given currency.
    pub fn empty(currency: Currency) -> Self {
        Self {
            money: Money::zero(currency),
        }
    }

    pub fn money(&self) -> &Money {
        &self.money
    }

    /// Balance in minor units.
    pub fn balance(&self) -> i64 {
        self.money.amount()
    }

    /// Return a new wallet with `money` added.
    ///
    /// Only fails on currency mismatch or integer overflow; the amount can
    /// only grow.
    pub fn credit(&self, money: &Money) -> Result<Wallet, DomainError> {
        Ok(Self {
            money: self.money.add(money)?,
        })
    }

    /// Return a new wallet with `money` removed, or fail with
    /// `InsufficientFunds` leaving the original wallet unchanged.
    pub fn debit(&self, money: &Money) -> Result<Wallet, DomainError> {
        Ok(Self {
            money: self.money.subtract(money)?,
        })
    }
}
