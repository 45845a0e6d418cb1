//! Identity value objects
//!
//! Full name, email, and password secret carried by a user. Validation
//! happens at construction; deeper identity verification (mail delivery,
//! password hashing policy) belongs to external collaborators.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// A user's display name. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FullName(String);

impl FullName {
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidFullName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A minimally shape-checked email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Accepts `local@domain` with a dot somewhere in the domain part.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidEmail(value.to_string());

        let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(invalid());
        }
        if domain.starts_with('.') || domain.ends_with('.') {
            return Err(invalid());
        }

        Ok(Self(value.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque password secret.
///
/// Storage and hashing policy are external concerns; inside this crate the
/// secret is carried verbatim but never logged or serialized outward.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Access the raw secret. Callers own the responsibility of not
    /// leaking it into logs or responses.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Password(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_trims_whitespace() {
        let name = FullName::new("  Gabriel Facina  ").unwrap();
        assert_eq!(name.value(), "Gabriel Facina");
    }

    #[test]
    fn empty_full_name_rejected() {
        assert!(matches!(
            FullName::new("   "),
            Err(DomainError::InvalidFullName)
        ));
    }

    #[test]
    fn well_formed_email_accepted() {
        let email = Email::new("payer@example.com").unwrap();
        assert_eq!(email.value(), "payer@example.com");
    }

    #[test]
    fn malformed_emails_rejected() {
        for candidate in ["", "no-at-sign", "@example.com", "user@", "user@nodot", "user@.com"] {
            assert!(
                matches!(Email::new(candidate), Err(DomainError::InvalidEmail(_))),
                "expected rejection for {candidate:?}"
            );
        }
    }

    #[test]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter2");
        let debug = format!("{password:?}");

        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("redacted"));
        assert_eq!(password.expose(), "hunter2");
    }
}
