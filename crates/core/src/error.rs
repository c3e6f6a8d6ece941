//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, currency rules). Data-access failures belong to the collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. duplicate product ids in a list).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Two amounts in different currencies were combined.
    ///
    /// Currencies are carried as their display codes so the core stays free of
    /// any particular currency enumeration.
    #[error("currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch { expected: String, found: String },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn currency_mismatch(expected: impl ToString, found: impl ToString) -> Self {
        Self::CurrencyMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}
