//! Create User Handler
//!
//! Registers a new user with an opening wallet. Validation happens in the
//! value-object constructors; the id comes from the injected provider and
//! the timestamp is server-assigned.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{Document, DocumentKind, Email, FullName, Money, Password, Wallet};
use crate::entity::{Role, User};
use crate::error::{AppError, AppResult};
use crate::ports::{AccountRepository, IdProvider};

use super::CreateUserCommand;

/// Handler for user registration.
pub struct CreateUserHandler {
    accounts: Arc<dyn AccountRepository>,
    ids: Arc<dyn IdProvider>,
}

impl CreateUserHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>, ids: Arc<dyn IdProvider>) -> Self {
        Self { accounts, ids }
    }

    /// Execute the registration command.
    ///
    /// Role, document, and email violations surface verbatim as domain
    /// errors before anything is persisted.
    pub async fn execute(&self, command: CreateUserCommand) -> AppResult<User> {
        let role = Role::try_from(command.role.as_str())?;
        let kind = DocumentKind::try_from(command.document_kind.as_str())?;
        let document = Document::new(kind, &command.document_number)?;
        let full_name = FullName::new(&command.full_name)?;
        let email = Email::new(&command.email)?;
        let opening = Money::new(command.currency, command.initial_balance)?;

        let user = User::new(
            self.ids.generate(),
            full_name,
            email,
            Password::new(command.password),
            document,
            role,
            Wallet::new(opening),
            Utc::now(),
        );

        let user = self
            .accounts
            .create(user)
            .await
            .map_err(|e| AppError::PersistenceFailure {
                transfer_id: None,
                source: e,
            })?;

        tracing::info!(user_id = %user.id(), role = %user.role(), "user registered");
        Ok(user)
    }
}
