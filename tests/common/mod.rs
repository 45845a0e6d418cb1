//! Common test utilities
//!
//! Fixtures and failure-injecting port doubles shared by the integration
//! suites.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use walletpay::adapter::InMemoryAccountRepository;
use walletpay::domain::{
    Currency, Document, DocumentKind, Email, FullName, Money, Password, Wallet,
};
use walletpay::entity::{Role, Transfer, User};
use walletpay::ports::{
    AccountRepository, Authorizer, AuthorizerError, IdProvider, Notifier, NotifierError,
    StoreError,
};

pub fn brl(amount: i64) -> Money {
    Money::new(Currency::Brl, amount).unwrap()
}

pub fn user_with(role: Role, balance: Money) -> User {
    let (kind, number) = match role {
        Role::Merchant => (DocumentKind::Cnpj, "90.691.635/0001-75"),
        _ => (DocumentKind::Cpf, "07010965836"),
    };

    User::new(
        Uuid::new_v4(),
        FullName::new("Test Testing").unwrap(),
        Email::new("test@example.com").unwrap(),
        Password::new("passw"),
        Document::new(kind, number).unwrap(),
        role,
        Wallet::new(balance),
        Utc::now(),
    )
}

pub async fn seed_user<R: AccountRepository>(repo: &R, role: Role, balance: i64) -> User {
    repo.create(user_with(role, brl(balance))).await.unwrap()
}

pub async fn balance_of<R: AccountRepository>(repo: &R, id: Uuid) -> i64 {
    repo.find_by_id(id)
        .await
        .unwrap()
        .expect("user should exist")
        .wallet()
        .balance()
}

/// Id provider handing out one fixed id, so tests can predict the
/// generated transfer id.
pub struct FixedIdProvider {
    id: Uuid,
}

impl FixedIdProvider {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl IdProvider for FixedIdProvider {
    fn generate(&self) -> Uuid {
        self.id
    }
}

/// What an injected wallet-write failure looks like.
#[derive(Debug, Clone, Copy)]
pub enum FailureMode {
    Unavailable,
    VersionConflict,
}

/// Account repository wrapper that fails selected `update_wallet` calls.
/// Call indexes are 1-based and count only wallet writes; reads and user
/// creation pass through untouched.
pub struct FlakyAccountRepository {
    inner: InMemoryAccountRepository,
    mode: FailureMode,
    fail_calls: Vec<u32>,
    fail_from: Option<u32>,
    calls: AtomicU32,
}

impl FlakyAccountRepository {
    pub fn failing_on(mode: FailureMode, fail_calls: &[u32]) -> Self {
        Self {
            inner: InMemoryAccountRepository::new(),
            mode,
            fail_calls: fail_calls.to_vec(),
            fail_from: None,
            calls: AtomicU32::new(0),
        }
    }

    /// Every wallet write from the `from`-th on fails.
    pub fn failing_from(mode: FailureMode, from: u32) -> Self {
        Self {
            inner: InMemoryAccountRepository::new(),
            mode,
            fail_calls: Vec::new(),
            fail_from: Some(from),
            calls: AtomicU32::new(0),
        }
    }

    pub fn wallet_writes(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn should_fail(&self, call: u32) -> bool {
        self.fail_calls.contains(&call) || matches!(self.fail_from, Some(from) if call >= from)
    }

    fn injected_error(&self, id: Uuid, expected_version: i64, call: u32) -> StoreError {
        match self.mode {
            FailureMode::Unavailable => {
                StoreError::Unavailable(format!("injected failure on wallet write {call}"))
            }
            FailureMode::VersionConflict => StoreError::VersionConflict {
                id,
                expected: expected_version,
                found: expected_version + 1,
            },
        }
    }
}

#[async_trait]
impl AccountRepository for FlakyAccountRepository {
    async fn create(&self, user: User) -> Result<User, StoreError> {
        self.inner.create(user).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.inner.find_by_id(id).await
    }

    async fn update_wallet(
        &self,
        id: Uuid,
        money: Money,
        expected_version: i64,
    ) -> Result<(), StoreError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.should_fail(call) {
            return Err(self.injected_error(id, expected_version, call));
        }
        self.inner.update_wallet(id, money, expected_version).await
    }
}

/// Account repository wrapper that sleeps before every wallet write, for
/// deadline tests.
pub struct SlowAccountRepository {
    inner: InMemoryAccountRepository,
    delay: std::time::Duration,
}

impl SlowAccountRepository {
    pub fn new(delay: std::time::Duration) -> Self {
        Self {
            inner: InMemoryAccountRepository::new(),
            delay,
        }
    }
}

#[async_trait]
impl AccountRepository for SlowAccountRepository {
    async fn create(&self, user: User) -> Result<User, StoreError> {
        self.inner.create(user).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.inner.find_by_id(id).await
    }

    async fn update_wallet(
        &self,
        id: Uuid,
        money: Money,
        expected_version: i64,
    ) -> Result<(), StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.update_wallet(id, money, expected_version).await
    }
}

/// Transfer repository wrapper that fails the COMPLETED status write,
/// for the commit-failure compensation path.
pub struct FlakyTransferRepository {
    inner: walletpay::adapter::InMemoryTransferRepository,
}

impl FlakyTransferRepository {
    pub fn failing_completion() -> Self {
        Self {
            inner: walletpay::adapter::InMemoryTransferRepository::new(),
        }
    }
}

#[async_trait]
impl walletpay::ports::TransferRepository for FlakyTransferRepository {
    async fn create(&self, transfer: Transfer) -> Result<Transfer, StoreError> {
        self.inner.create(transfer).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: walletpay::entity::TransferStatus,
    ) -> Result<(), StoreError> {
        if status == walletpay::entity::TransferStatus::Completed {
            return Err(StoreError::Unavailable(
                "injected failure on status commit".to_string(),
            ));
        }
        self.inner.update_status(id, status).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transfer>, StoreError> {
        self.inner.find_by_id(id).await
    }
}

/// Authorizer that always errors, for the denial-on-error path.
pub struct ErroringAuthorizer;

#[async_trait]
impl Authorizer for ErroringAuthorizer {
    async fn authorize(&self, _transfer: &Transfer) -> Result<bool, AuthorizerError> {
        Err(AuthorizerError("decision service unreachable".to_string()))
    }
}

/// Notifier that always fails delivery.
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(&self, _transfer: &Transfer) -> Result<(), NotifierError> {
        Err(NotifierError("webhook returned 500".to_string()))
    }
}
