use thiserror::Error;

/// Domain-level errors for entity construction and state transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

pub type EntityResult<T> = std::result::Result<T, EntityError>;
