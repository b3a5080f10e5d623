//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No node with the given id exists in the playbook.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No world with the given id exists in the playbook.
    #[error("world not found: {0}")]
    WorldNotFound(String),

    /// A playbook document could not be parsed or is otherwise invalid.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure error (file access and the like).
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
