use thiserror::Error;

/// Errors that can occur during customer operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CustomerError {
    #[error("Customer not found: {0}")]
    NotFound(String),

    #[error("Invalid customer: {0}")]
    Validation(String),

    /// The actor could not be reached or did not answer.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
