//! Domain error types
//!
//! These errors are framework-agnostic and represent data-access failures.
//! A lookup that finds nothing is not an error: repositories return `None`
//! or an empty `Vec` for that.

use std::fmt;

#[derive(Debug)]
pub enum DomainError {
    /// Resource not found (only raised by operations that require a row)
    NotFound,
    /// Validation error with message
    Validation(String),
    /// Unique or foreign-key constraint violated by a write
    Constraint(String),
    /// A single-result query matched more than one row
    NonUniqueResult(usize),
    /// Database/persistence error
    Database(String),
    /// Generic internal error
    Internal(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound => write!(f, "Resource not found"),
            DomainError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DomainError::Constraint(msg) => write!(f, "Constraint violation: {}", msg),
            DomainError::NonUniqueResult(count) => {
                write!(f, "Expected at most one result, found {}", count)
            }
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg))
            | Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(msg)) => {
                DomainError::Constraint(msg)
            }
            _ => DomainError::Database(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(DomainError::NotFound.to_string(), "Resource not found");
        assert_eq!(
            DomainError::NonUniqueResult(3).to_string(),
            "Expected at most one result, found 3"
        );
        assert_eq!(
            DomainError::Validation("bad sort".to_string()).to_string(),
            "Validation error: bad sort"
        );
    }

    #[test]
    fn test_plain_db_error_maps_to_database() {
        let err = DomainError::from(sea_orm::DbErr::Custom("boom".to_string()));
        assert!(matches!(err, DomainError::Database(msg) if msg.contains("boom")));
    }
}
