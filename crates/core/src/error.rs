//! Domain error model.

use thiserror::Error;

use crate::outcome::FieldError;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// `NotFoundOrForbidden` is deliberately a single variant: a caller must not
/// be able to tell "does not exist" apart from "exists but owned by someone
/// else".
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// One or more fields failed validation.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Entity missing or not owned by the caller.
    #[error("not found")]
    NotFoundOrForbidden,

    /// Uniqueness violation (e.g. duplicate email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A multi-entity delete failed before the parent was removed.
    #[error("cascade aborted: {0}")]
    Cascade(String),

    /// The persistence layer failed in a way the domain cannot interpret.
    #[error("store failure: {0}")]
    Store(String),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn cascade(msg: impl Into<String>) -> Self {
        Self::Cascade(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
