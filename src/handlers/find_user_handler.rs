//! Find User Handler

use std::sync::Arc;

use uuid::Uuid;

use crate::entity::User;
use crate::error::{AppError, AppResult};
use crate::ports::AccountRepository;

/// Handler for user lookup by id.
pub struct FindUserHandler {
    accounts: Arc<dyn AccountRepository>,
}

impl FindUserHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    pub async fn execute(&self, id: Uuid) -> AppResult<User> {
        self.accounts
            .find_by_id(id)
            .await
            .map_err(|e| AppError::PersistenceFailure {
                transfer_id: None,
                source: e,
            })?
            .ok_or(AppError::UserNotFound(id))
    }
}
