//! Command definitions
//!
//! Commands represent intentions to change the system state, plus the
//! results handlers hand back to their callers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Currency, Money};
use crate::entity::Transfer;

/// Command to register a new user.
///
/// Carries raw external input; role, document, and email are validated on
/// execution and violations surface as domain errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserCommand {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub document_kind: String,
    pub document_number: String,
    pub role: String,
    pub currency: Currency,
    /// Opening balance in minor units
    pub initial_balance: i64,
}

impl CreateUserCommand {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        document_kind: impl Into<String>,
        document_number: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            password: password.into(),
            document_kind: document_kind.into(),
            document_number: document_number.into(),
            role: role.into(),
            currency: Currency::Brl,
            initial_balance: 0,
        }
    }

    pub fn with_initial_balance(mut self, currency: Currency, amount: i64) -> Self {
        self.currency = currency;
        self.initial_balance = amount;
        self
    }
}

/// Command to move money between two wallets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferCommand {
    /// Idempotency key: set on retry to reuse the transfer id generated by
    /// a previous attempt. Left empty on first submission.
    pub transfer_id: Option<Uuid>,
    pub payer_id: Uuid,
    pub payee_id: Uuid,
    pub value: Money,
}

impl TransferCommand {
    pub fn new(payer_id: Uuid, payee_id: Uuid, value: Money) -> Self {
        Self {
            transfer_id: None,
            payer_id,
            payee_id,
            value,
        }
    }

    pub fn with_transfer_id(mut self, transfer_id: Uuid) -> Self {
        self.transfer_id = Some(transfer_id);
        self
    }
}

/// Result of a successful transfer.
///
/// A failed notification does not roll the transfer back; it is reported
/// here and retried out-of-band, idempotent on the transfer id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferResult {
    pub transfer: Transfer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_error: Option<String>,
}
