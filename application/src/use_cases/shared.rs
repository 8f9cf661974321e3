//! Shared types for the administration use cases.

use crate::ports::storage::StorageError;
use grove_domain::DomainError;
use thiserror::Error;

/// Errors returned by model, conversation and settings administration
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Storage error: {0}")]
    Storage(#[source] StorageError),
}

impl AdminError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        AdminError::InvalidArgument(message.into())
    }
}

impl From<StorageError> for AdminError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { entity, id } => AdminError::NotFound { entity, id },
            other => AdminError::Storage(other),
        }
    }
}

impl From<DomainError> for AdminError {
    fn from(e: DomainError) -> Self {
        AdminError::InvalidArgument(e.to_string())
    }
}

/// Reject zero and negative identities before touching storage.
pub(crate) fn require_positive(field: &str, id: i64) -> Result<(), AdminError> {
    if id <= 0 {
        return Err(AdminError::invalid(format!("{field} must be positive")));
    }
    Ok(())
}

/// Trim and drop empty optional text.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
