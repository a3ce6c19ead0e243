use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Failures of booking rules, independent of storage and transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input rejected by entity validation (empty title, bad email, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Path or body identifier that is not an integer id.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("not found")]
    NotFound,

    /// Request clashes with current state, e.g. not enough seats left.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
