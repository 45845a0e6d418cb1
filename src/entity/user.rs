//! User entity
//!
//! A user owns exactly one wallet. The role decides transfer eligibility:
//! common and custom users may initiate outbound transfers, merchants may
//! only receive. Balance changes go through `deposit`/`withdraw`, which
//! return an updated copy and never mutate in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Document, DomainError, Email, FullName, Money, Password, Wallet};

/// User role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Common,
    Merchant,
    Custom,
}

impl Role {
    /// Whether this role may initiate outbound transfers.
    pub fn can_transfer(&self) -> bool {
        !matches!(self, Role::Merchant)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Common => write!(f, "COMMON"),
            Role::Merchant => write!(f, "MERCHANT"),
            Role::Custom => write!(f, "CUSTOM"),
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "COMMON" => Ok(Role::Common),
            "MERCHANT" => Ok(Role::Merchant),
            "CUSTOM" => Ok(Role::Custom),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}

/// User entity.
///
/// Construction is pure; persistence is a separate concern. The `version`
/// field is the optimistic-concurrency sequence number managed by the
/// account repository and bumped on every wallet write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: Uuid,
    full_name: FullName,
    email: Email,
    password: Password,
    document: Document,
    role: Role,
    wallet: Wallet,
    created_at: DateTime<Utc>,
    version: i64,
}

impl User {
    /// Assemble a user from validated value objects.
    ///
    /// The value objects (`FullName`, `Email`, `Document`, `Role`) each
    /// validate at their own construction, so an invalid user cannot be
    /// assembled from raw input without surfacing `InvalidRole`,
    /// `InvalidDocument`, or `InvalidEmail` on the way here.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        full_name: FullName,
        email: Email,
        password: Password,
        document: Document,
        role: Role,
        wallet: Wallet,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            full_name,
            email,
            password,
            document,
            role,
            wallet,
            created_at,
            version: 0,
        }
    }

    /// Whether this user may initiate outbound transfers. Pure function of
    /// the role.
    pub fn can_transfer(&self) -> bool {
        self.role.can_transfer()
    }

    /// Return an updated user with `money` credited to the wallet.
    ///
    /// Only fails on currency mismatch or integer overflow.
    pub fn deposit(&self, money: &Money) -> Result<User, DomainError> {
        let wallet = self.wallet.credit(money)?;
        Ok(Self {
            wallet,
            ..self.clone()
        })
    }

    /// Return an updated user with `money` debited from the wallet, or fail
    /// with `InsufficientFunds` leaving the user unchanged.
    pub fn withdraw(&self, money: &Money) -> Result<User, DomainError> {
        let wallet = self.wallet.debit(money)?;
        Ok(Self {
            wallet,
            ..self.clone()
        })
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn full_name(&self) -> &FullName {
        &self.full_name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    /// Repository bookkeeping: stamp the stored version.
    pub fn with_version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }

    /// Repository bookkeeping: replace the wallet wholesale.
    pub fn with_wallet(mut self, wallet: Wallet) -> Self {
        self.wallet = wallet;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Currency, DocumentKind};

    fn brl(amount: i64) -> Money {
        Money::new(Currency::Brl, amount).unwrap()
    }

    fn user_with(role: Role, balance: i64) -> User {
        User::new(
            Uuid::new_v4(),
            FullName::new("Test Testing").unwrap(),
            Email::new("test@example.com").unwrap(),
            Password::new("passw"),
            Document::new(DocumentKind::Cpf, "07010965836").unwrap(),
            role,
            Wallet::new(brl(balance)),
            Utc::now(),
        )
    }

    #[test]
    fn common_user_can_transfer() {
        assert!(user_with(Role::Common, 0).can_transfer());
    }

    #[test]
    fn custom_user_can_transfer() {
        assert!(user_with(Role::Custom, 0).can_transfer());
    }

    #[test]
    fn merchant_cannot_transfer() {
        assert!(!user_with(Role::Merchant, 0).can_transfer());
    }

    #[test]
    fn role_parsing() {
        assert_eq!(Role::try_from("COMMON").unwrap(), Role::Common);
        assert_eq!(Role::try_from("MERCHANT").unwrap(), Role::Merchant);
        assert_eq!(Role::try_from("CUSTOM").unwrap(), Role::Custom);
        assert!(matches!(
            Role::try_from("INVALID"),
            Err(DomainError::InvalidRole(_))
        ));
    }

    #[test]
    fn deposit_returns_updated_copy() {
        let user = user_with(Role::Common, 100);

        let updated = user.deposit(&brl(100)).unwrap();
        assert_eq!(updated.wallet().balance(), 200);
        // original untouched
        assert_eq!(user.wallet().balance(), 100);
    }

    #[test]
    fn withdraw_returns_updated_copy() {
        let user = user_with(Role::Common, 100);

        let updated = user.withdraw(&brl(50)).unwrap();
        assert_eq!(updated.wallet().balance(), 50);
        assert_eq!(user.wallet().balance(), 100);
    }

    #[test]
    fn withdraw_insufficient_funds() {
        let user = user_with(Role::Common, 100);

        let result = user.withdraw(&brl(1000));
        assert!(matches!(
            result,
            Err(DomainError::InsufficientFunds {
                required: 1000,
                available: 100,
            })
        ));
        assert_eq!(user.wallet().balance(), 100);
    }

    #[test]
    fn withdraw_to_zero() {
        let user = user_with(Role::Common, 100);
        let updated = user.withdraw(&brl(100)).unwrap();
        assert_eq!(updated.wallet().balance(), 0);
    }

    #[test]
    fn version_stamping() {
        let user = user_with(Role::Common, 0);
        assert_eq!(user.version(), 0);

        let user = user.with_version(3);
        assert_eq!(user.version(), 3);
    }
}
