//! Domain error types

use crate::plan::TaskId;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    #[error("Malformed reasoning response: {0}")]
    MalformedResponse(String),

    #[error("Result for {0} was already recorded")]
    DuplicateResult(TaskId),

    #[error("Result for {0} does not belong to the task graph")]
    UnknownTask(TaskId),
}

impl DomainError {
    /// Check if this error came from parsing an external response
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, DomainError::MalformedResponse(_))
    }
}
