//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i32 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Which kind of storage constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    /// Value rejected by a column check, e.g. longer than its varchar limit.
    Check,
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation ({kind:?}): {message}")]
    Constraint { kind: ConstraintKind, message: String },
}

impl RepoError {
    pub fn unique(message: impl Into<String>) -> Self {
        Self::Constraint {
            kind: ConstraintKind::Unique,
            message: message.into(),
        }
    }

    pub fn foreign_key(message: impl Into<String>) -> Self {
        Self::Constraint {
            kind: ConstraintKind::ForeignKey,
            message: message.into(),
        }
    }

    pub fn check(message: impl Into<String>) -> Self {
        Self::Constraint {
            kind: ConstraintKind::Check,
            message: message.into(),
        }
    }

    /// True when the store rejected the write because of a constraint of `kind`.
    pub fn is_constraint(&self, kind: ConstraintKind) -> bool {
        matches!(self, Self::Constraint { kind: k, .. } if *k == kind)
    }
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint {
                kind: ConstraintKind::Unique,
                message,
            } => DomainError::Duplicate(message),
            RepoError::Constraint { message, .. } => DomainError::Validation(message),
            RepoError::NotFound => DomainError::Internal("Referenced row vanished".to_string()),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Internal(msg),
        }
    }
}
