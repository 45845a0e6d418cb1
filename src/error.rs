//! Error handling module
//!
//! Application-level error taxonomy. Input and invariant errors are
//! non-retryable and surfaced verbatim; infrastructure errors carry the
//! transfer id as an idempotency key for caller-driven retry;
//! `ReconciliationRequired` is the one unrecoverable condition.

use uuid::Uuid;

use crate::domain::DomainError;
use crate::ports::StoreError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Referenced user does not exist
    #[error("user not found: {0}")]
    UserNotFound(Uuid),

    /// Role gate or external-authorizer denial
    #[error("transfer not authorized")]
    TransferNotAuthorized,

    /// The caller-supplied deadline passed before the transfer committed.
    /// Any wallet write already applied has been compensated.
    #[error("operation deadline exceeded")]
    DeadlineExceeded,

    /// Business rule violation (insufficient funds, currency mismatch,
    /// invalid role/document, ...)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A repository port signaled a write or read error. Retryable by the
    /// caller using the carried transfer id as an idempotency key.
    #[error("persistence failure: {source}")]
    PersistenceFailure {
        transfer_id: Option<Uuid>,
        source: StoreError,
    },

    /// A compensation write failed after a partial mutation was observed.
    /// Retry-in-place cannot restore the conservation invariant; the
    /// carried detail supports manual or asynchronous reconciliation.
    #[error(
        "reconciliation required for transfer {transfer_id}: \
         wallet {wallet_owner} expected balance {expected_balance}, observed {observed_balance:?}"
    )]
    ReconciliationRequired {
        transfer_id: Uuid,
        wallet_owner: Uuid,
        expected_balance: i64,
        observed_balance: Option<i64>,
    },
}

impl AppError {
    /// Check if this is a client error (bad input or business rule
    /// violation; retrying the same request cannot succeed)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::UserNotFound(_) | AppError::TransferNotAuthorized | AppError::Domain(_)
        )
    }

    /// Check if the caller may retry the same request (with the same
    /// transfer id where one is carried)
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::PersistenceFailure { .. })
    }

    pub(crate) fn persistence(transfer_id: Uuid, source: StoreError) -> Self {
        AppError::PersistenceFailure {
            transfer_id: Some(transfer_id),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(AppError::UserNotFound(Uuid::nil()).is_client_error());
        assert!(AppError::TransferNotAuthorized.is_client_error());
        assert!(AppError::Domain(DomainError::InsufficientFunds {
            required: 1,
            available: 0,
        })
        .is_client_error());

        let persistence = AppError::persistence(Uuid::nil(), StoreError::Unavailable("down".into()));
        assert!(persistence.is_retryable());
        assert!(!persistence.is_client_error());

        let reconciliation = AppError::ReconciliationRequired {
            transfer_id: Uuid::nil(),
            wallet_owner: Uuid::nil(),
            expected_balance: 100,
            observed_balance: None,
        };
        assert!(!reconciliation.is_retryable());
        assert!(!reconciliation.is_client_error());
    }

    #[test]
    fn domain_errors_surface_verbatim() {
        let err: AppError = DomainError::InvalidRole("ADMIN".to_string()).into();
        assert_eq!(err.to_string(), "Invalid role: ADMIN");
    }
}
