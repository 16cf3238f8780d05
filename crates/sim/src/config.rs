use domus_core::{INTEREST_RATE, Money, SAVING_RATE};
use domus_ports::ClearingOrder;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Income distribution for generated consumers (truncated normal)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeDistribution {
    pub minimum: Money,
    pub average: Money,
    pub std_dev: Money,
    pub maximum: Money,
}

impl Default for IncomeDistribution {
    fn default() -> Self {
        Self {
            minimum: dec!(25000),
            average: dec!(75000),
            std_dev: dec!(30000),
            maximum: dec!(250000),
        }
    }
}

/// Inclusive range of children per generated consumer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChildrenRange {
    pub minimum: u8,
    pub maximum: u8,
}

impl Default for ChildrenRange {
    fn default() -> Self {
        Self {
            minimum: 0,
            maximum: 5,
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of consumers to generate
    pub consumer_count: usize,
    /// Years of savings to accumulate before clearing
    pub years: u32,
    pub income: IncomeDistribution,
    pub children: ChildrenRange,
    pub clearing_order: ClearingOrder,
    /// Saving and interest rates applied to every generated consumer
    pub saving_rate: Money,
    pub interest_rate: Money,
    /// Random seed (for reproducibility)
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            consumer_count: 100,
            years: 5,
            income: IncomeDistribution::default(),
            children: ChildrenRange::default(),
            clearing_order: ClearingOrder::default(),
            saving_rate: SAVING_RATE,
            interest_rate: INTEREST_RATE,
            seed: None,
        }
    }
}
