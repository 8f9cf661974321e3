//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Raised when an entity or value object would be constructed in a state that
/// violates its invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field} must be positive, got {value}")]
    NonPositiveId { field: &'static str, value: i64 },

    #[error("Unknown message role: {0}")]
    UnknownRole(String),
}

impl DomainError {
    pub fn empty(field: &'static str) -> Self {
        DomainError::EmptyField { field }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_field_display() {
        assert_eq!(
            DomainError::empty("api_key").to_string(),
            "api_key must not be empty"
        );
    }

    #[test]
    fn test_non_positive_display() {
        let err = DomainError::NonPositiveId {
            field: "model_id",
            value: -3,
        };
        assert_eq!(err.to_string(), "model_id must be positive, got -3");
    }
}
