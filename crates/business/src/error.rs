//! Business-layer error model.

use thiserror::Error;

use clientbook_core::DomainError;

use crate::data_access::DataAccessError;

pub type BusinessResult<T> = Result<T, BusinessError>;

/// Error returned by business operations.
///
/// Domain failures (currency mismatch, duplicate ids) are raised before any
/// collaborator is touched. Collaborator failures are passed through unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusinessError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("data access failed: {0}")]
    DataAccess(#[from] DataAccessError),
}
