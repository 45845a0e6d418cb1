//! Collaborator ports
//!
//! Abstract contracts the handlers consume. All implementations are flat
//! and swappable: in-memory adapters for tests and local wiring, HTTP
//! adapters for third-party services. No inheritance hierarchy, just trait
//! objects behind `Arc`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Money;
use crate::entity::{Transfer, TransferStatus, User};

/// Errors surfaced by repository ports.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Record not found
    #[error("record not found: {0}")]
    NotFound(Uuid),

    /// Optimistic concurrency conflict: the stored version moved since read
    #[error("version conflict for {id}: expected {expected}, found {found}")]
    VersionConflict {
        id: Uuid,
        expected: i64,
        found: i64,
    },

    /// Backend write or read failure
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Check if this error is a concurrency conflict
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, StoreError::VersionConflict { .. })
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StoreError::VersionConflict { .. } | StoreError::Unavailable(_)
        )
    }
}

/// Authorization service failure. Treated as a denial by the engine.
#[derive(Debug, thiserror::Error)]
#[error("authorization service failure: {0}")]
pub struct AuthorizerError(pub String);

/// Notification delivery failure. Non-fatal for a committed transfer.
#[derive(Debug, thiserror::Error)]
#[error("notification delivery failure: {0}")]
pub struct NotifierError(pub String);

/// Lookup and persistence of users and their wallets.
///
/// Implementations must provide per-wallet serializability: `update_wallet`
/// carries the version observed at read time and fails with
/// `StoreError::VersionConflict` when the stored record has moved on, so a
/// concurrent read-modify-write never loses an update.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Persist a newly registered user. The stored record starts at
    /// version 1.
    async fn create(&self, user: User) -> Result<User, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Persist a new wallet balance for the given user.
    async fn update_wallet(
        &self,
        id: Uuid,
        money: Money,
        expected_version: i64,
    ) -> Result<(), StoreError>;
}

/// Persistence of transfer records.
#[async_trait]
pub trait TransferRepository: Send + Sync {
    /// Persist a pending transfer. An existing record under the same id
    /// may be replaced only when it is not `Completed` (a fresh attempt
    /// under the caller's idempotency key).
    async fn create(&self, transfer: Transfer) -> Result<Transfer, StoreError>;

    async fn update_status(&self, id: Uuid, status: TransferStatus) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transfer>, StoreError>;
}

/// Third-party approval of a transfer.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(&self, transfer: &Transfer) -> Result<bool, AuthorizerError>;
}

/// Best-effort delivery of a completion event. Idempotent on transfer id;
/// the caller retries out-of-band on failure.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, transfer: &Transfer) -> Result<(), NotifierError>;
}

/// Injected id generation keeps the handlers deterministic under test.
pub trait IdProvider: Send + Sync {
    fn generate(&self) -> Uuid;
}

/// Default random v4 UUID generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}
