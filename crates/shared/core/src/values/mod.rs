use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monetary value (prices, incomes, savings) - uses Decimal for precision
pub type Money = Decimal;

/// Living area in square feet - uses Decimal for precision
pub type Area = Decimal;

/// Unique identifier for a consumer
///
/// Consumers arrive from input records with stable integer ids; the newtype
/// keeps them from being confused with house ids in map keys and match
/// records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConsumerId(pub u64);

impl ConsumerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ConsumerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ConsumerId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Unique identifier for a housing unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HouseId(pub u64);

impl HouseId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for HouseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for HouseId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
