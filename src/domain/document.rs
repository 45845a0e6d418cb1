//! Identification document
//!
//! A user carries exactly one identification document, either a CPF
//! (natural person) or a CNPJ (legal entity). The number is validated for
//! well-formedness against the declared kind at construction time.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// CPF numbers carry 11 digits, CNPJ numbers 14, ignoring punctuation.
const CPF_DIGITS: usize = 11;
const CNPJ_DIGITS: usize = 14;

/// Kind of identification document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentKind {
    Cpf,
    Cnpj,
}

impl DocumentKind {
    fn expected_digits(&self) -> usize {
        match self {
            DocumentKind::Cpf => CPF_DIGITS,
            DocumentKind::Cnpj => CNPJ_DIGITS,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Cpf => write!(f, "CPF"),
            DocumentKind::Cnpj => write!(f, "CNPJ"),
        }
    }
}

impl TryFrom<&str> for DocumentKind {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "CPF" => Ok(DocumentKind::Cpf),
            "CNPJ" => Ok(DocumentKind::Cnpj),
            other => Err(DomainError::InvalidDocument(format!(
                "unknown document kind: {other}"
            ))),
        }
    }
}

/// A validated identification document.
///
/// The stored number is normalized to digits only; formatting punctuation
/// (`.`, `-`, `/`) in the input is accepted and stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    kind: DocumentKind,
    number: String,
}

impl Document {
    /// Create a document, validating the number against the declared kind.
    ///
    /// # Errors
    /// - `DomainError::InvalidDocument` when the digit count does not match
    ///   the kind or the input carries non-numeric characters beyond
    ///   formatting punctuation
    pub fn new(kind: DocumentKind, number: &str) -> Result<Self, DomainError> {
        let digits: String = number
            .chars()
            .filter(|c| !matches!(c, '.' | '-' | '/' | ' '))
            .collect();

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvalidDocument(format!(
                "{kind} number contains non-digit characters: {number}"
            )));
        }

        if digits.len() != kind.expected_digits() {
            return Err(DomainError::InvalidDocument(format!(
                "{kind} number must have {} digits, got {}",
                kind.expected_digits(),
                digits.len()
            )));
        }

        Ok(Self {
            kind,
            number: digits,
        })
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Normalized number, digits only.
    pub fn number(&self) -> &str {
        &self.number
    }
}
