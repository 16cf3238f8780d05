use domus_core::{ConsumerId, EntityError, HouseId};
use thiserror::Error;

/// Errors raised by market registration, clearing and queries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    #[error("Duplicate consumer id: {0}")]
    DuplicateConsumer(ConsumerId),

    #[error("Duplicate house id: {0}")]
    DuplicateHouse(HouseId),

    #[error("Unknown consumer id: {0}")]
    UnknownConsumer(ConsumerId),

    #[error("Unknown house id: {0}")]
    UnknownHouse(HouseId),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Entity error: {0}")]
    Entity(#[from] EntityError),
}

pub type MarketResult<T> = std::result::Result<T, MarketError>;
