use serde::{Deserialize, Serialize};

/// Order in which consumers are processed during a clearing pass
///
/// Every variant is reproducible: even the shuffled order is driven by an
/// explicit seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClearingOrder {
    /// Stable ascending consumer id (the default)
    ById,
    /// Highest annual income first; ties fall back to ascending id
    IncomeDescending,
    /// Lowest annual income first; ties fall back to ascending id
    IncomeAscending,
    /// Seeded shuffle
    Random { seed: u64 },
}

impl Default for ClearingOrder {
    fn default() -> Self {
        ClearingOrder::ById
    }
}
