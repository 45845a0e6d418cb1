//! Transfer entity
//!
//! An immutable, append-only record of one attempted money movement
//! between two wallets. Status transitions are one-way: a transfer starts
//! `Pending` and ends in exactly one terminal state; a failed attempt is a
//! queryable fact, never deleted or corrected in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainError, Money};

/// Transfer lifecycle status.
///
/// `Pending -> {Completed, Failed, Rejected}`; all non-pending states are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferStatus {
    Pending,
    Completed,
    Failed,
    Rejected,
}

impl TransferStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransferStatus::Pending)
    }
}

impl std::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferStatus::Pending => write!(f, "PENDING"),
            TransferStatus::Completed => write!(f, "COMPLETED"),
            TransferStatus::Failed => write!(f, "FAILED"),
            TransferStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// Record of one attempted money movement.
///
/// References payer and payee by id only; it never holds the user objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    id: Uuid,
    payer_id: Uuid,
    payee_id: Uuid,
    value: Money,
    created_at: DateTime<Utc>,
    status: TransferStatus,
}

impl Transfer {
    /// Create a pending transfer record.
    ///
    /// # Errors
    /// - `DomainError::SameWalletTransfer` when payer and payee coincide
    /// - `DomainError::NonPositiveAmount` when the value moves nothing
    pub fn new(
        id: Uuid,
        payer_id: Uuid,
        payee_id: Uuid,
        value: Money,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if payer_id == payee_id {
            return Err(DomainError::SameWalletTransfer);
        }

        if value.amount() == 0 {
            return Err(DomainError::NonPositiveAmount(value.amount()));
        }

        Ok(Self {
            id,
            payer_id,
            payee_id,
            value,
            created_at,
            status: TransferStatus::Pending,
        })
    }

    /// Move to `next`, enforcing the one-way state machine.
    pub fn transition(self, next: TransferStatus) -> Result<Self, DomainError> {
        if self.status.is_terminal() || next == TransferStatus::Pending {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }

        Ok(Self {
            status: next,
            ..self
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn payer_id(&self) -> Uuid {
        self.payer_id
    }

    pub fn payee_id(&self) -> Uuid {
        self.payee_id
    }

    pub fn value(&self) -> &Money {
        &self.value
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn status(&self) -> TransferStatus {
        self.status
    }
}
