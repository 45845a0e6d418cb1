//! Operation Context
//!
//! Metadata about the current operation: correlation id for tracing, the
//! requesting user, and an optional deadline. The deadline is the
//! cancellation signal for long-running operations; the transfer engine
//! checks it between steps and always runs compensation before honoring it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for an operation, used for auditing, tracing, and cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationContext {
    /// Requesting user, when the call originates from an end user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_user_id: Option<Uuid>,

    /// Correlation ID for request tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<Uuid>,

    /// Deadline after which the operation should stop making progress
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
}

impl OperationContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self {
            request_user_id: None,
            correlation_id: None,
            deadline: None,
        }
    }

    /// Context with a requesting user
    pub fn with_request_user(mut self, user_id: Uuid) -> Self {
        self.request_user_id = Some(user_id);
        self
    }

    /// Context with a correlation ID
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Context with a deadline
    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Generate a new correlation ID if not present
    pub fn ensure_correlation_id(&mut self) -> Uuid {
        *self.correlation_id.get_or_insert_with(Uuid::new_v4)
    }

    /// Whether the deadline, if any, has passed.
    pub fn deadline_exceeded(&self) -> bool {
        matches!(self.deadline, Some(deadline) if Utc::now() >= deadline)
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::new()
    }
}
