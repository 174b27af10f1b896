//! Domain error taxonomy.
//!
//! Every store call site traps failures and converts them into one of
//! these variants; nothing crosses the async boundary uncaught and none
//! of them is fatal to the process.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Bad input caught before any store call
    #[error("{0}")]
    Validation(String),

    /// Duplicate entity detected by a pre-write existence check
    #[error("{0}")]
    Conflict(String),

    /// Referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// A store read or write failed; recoverable by retrying
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        DomainError::NotFound(message.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
