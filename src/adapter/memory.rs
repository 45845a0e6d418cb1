//! In-memory adapters
//!
//! Versioned in-memory repositories plus local stand-ins for the external
//! authorizer and notifier. The account store provides per-wallet
//! serializability: every update goes through the map entry (holding the
//! shard lock) with a version compare, so a concurrent read-modify-write
//! on the same wallet never loses a write.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{Money, Wallet};
use crate::entity::{Transfer, TransferStatus, User};
use crate::ports::{
    AccountRepository, Authorizer, AuthorizerError, Notifier, NotifierError, StoreError,
    TransferRepository,
};

/// In-memory user store with optimistic concurrency.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    users: DashMap<Uuid, User>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, user: User) -> Result<User, StoreError> {
        match self.users.entry(user.id()) {
            Entry::Occupied(_) => Err(StoreError::Unavailable(format!(
                "user {} already exists",
                user.id()
            ))),
            Entry::Vacant(slot) => {
                let stored = user.with_version(1);
                slot.insert(stored.clone());
                Ok(stored)
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(&id).map(|record| record.value().clone()))
    }

    async fn update_wallet(
        &self,
        id: Uuid,
        money: Money,
        expected_version: i64,
    ) -> Result<(), StoreError> {
        match self.users.entry(id) {
            Entry::Occupied(mut slot) => {
                let found = slot.get().version();
                if found != expected_version {
                    return Err(StoreError::VersionConflict {
                        id,
                        expected: expected_version,
                        found,
                    });
                }

                let updated = slot
                    .get()
                    .clone()
                    .with_wallet(Wallet::new(money))
                    .with_version(found + 1);
                slot.insert(updated);
                Ok(())
            }
            Entry::Vacant(_) => Err(StoreError::NotFound(id)),
        }
    }
}

/// In-memory transfer store.
#[derive(Debug, Default)]
pub struct InMemoryTransferRepository {
    transfers: DashMap<Uuid, Transfer>,
}

impl InMemoryTransferRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransferRepository for InMemoryTransferRepository {
    async fn create(&self, transfer: Transfer) -> Result<Transfer, StoreError> {
        match self.transfers.entry(transfer.id()) {
            Entry::Occupied(mut slot) => {
                // A dead attempt may be replaced by a fresh one under the
                // caller's idempotency key; a committed transfer may not.
                if slot.get().status() == TransferStatus::Completed {
                    return Err(StoreError::Unavailable(format!(
                        "transfer {} already completed",
                        transfer.id()
                    )));
                }
                slot.insert(transfer.clone());
                Ok(transfer)
            }
            Entry::Vacant(slot) => {
                slot.insert(transfer.clone());
                Ok(transfer)
            }
        }
    }

    async fn update_status(&self, id: Uuid, status: TransferStatus) -> Result<(), StoreError> {
        match self.transfers.entry(id) {
            Entry::Occupied(mut slot) => {
                let next = slot
                    .get()
                    .clone()
                    .transition(status)
                    .map_err(|e| StoreError::Unavailable(e.to_string()))?;
                slot.insert(next);
                Ok(())
            }
            Entry::Vacant(_) => Err(StoreError::NotFound(id)),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transfer>, StoreError> {
        Ok(self.transfers.get(&id).map(|record| record.value().clone()))
    }
}

/// Authorizer stand-in with a fixed decision. Used when no external
/// decision service is configured.
#[derive(Debug, Clone, Copy)]
pub struct StaticAuthorizer {
    approve: bool,
}

impl StaticAuthorizer {
    pub fn approving() -> Self {
        Self { approve: true }
    }

    pub fn denying() -> Self {
        Self { approve: false }
    }
}

#[async_trait]
impl Authorizer for StaticAuthorizer {
    async fn authorize(&self, _transfer: &Transfer) -> Result<bool, AuthorizerError> {
        Ok(self.approve)
    }
}

/// Notifier stand-in that records completions in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotifier;

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn notify(&self, transfer: &Transfer) -> Result<(), NotifierError> {
        tracing::info!(
            transfer_id = %transfer.id(),
            payee_id = %transfer.payee_id(),
            "transfer completion notified"
        );
        Ok(())
    }
}
