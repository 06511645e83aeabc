//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, caller-recoverable failures
/// (validation, missing records, conflicts). Backend failures travel as
/// `Storage` and are passed up for logging, never interpreted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Caller-supplied input violates a documented constraint.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced component does not exist at the time of the operation.
    #[error("not found")]
    NotFound,

    /// Creation attempted with a unique number already in use.
    #[error("duplicate unique number: {0}")]
    DuplicateKey(String),

    /// An update lost a race with another concurrent writer; the record still
    /// exists but no longer matches what the caller read.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Deletion blocked because other state still points at the record.
    #[error("referential conflict: {0}")]
    ReferentialConflict(String),

    /// Opaque lower-level storage failure (connectivity loss, unclassified
    /// constraint violations).
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate_key(msg: impl Into<String>) -> Self {
        Self::DuplicateKey(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn referential_conflict(msg: impl Into<String>) -> Self {
        Self::ReferentialConflict(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
