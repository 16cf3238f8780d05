use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::EntityError;
use crate::values::Money;

/// Buyer segment taxonomy
///
/// Defined exactly once, here, and imported by both the consumer-side and the
/// market-side code paths. Neither of those modules owns a partial copy of
/// this enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// Top income band; shops for new construction in excellent condition
    Fancy,
    /// Middle income band; shops below the market price per square foot
    Optimizer,
    /// Entry income band; shops below the average market price
    Average,
}

/// Annual income at or above this classifies a consumer as `Fancy`
pub const FANCY_INCOME_FLOOR: Money = dec!(120000);

/// Annual income at or above this (and below the fancy floor) classifies a
/// consumer as `Optimizer`
pub const OPTIMIZER_INCOME_FLOOR: Money = dec!(60000);

impl Segment {
    /// All segments, in canonical order
    pub const ALL: [Segment; 3] = [Segment::Fancy, Segment::Optimizer, Segment::Average];

    /// Fixed ordered sequence of all segment values
    pub fn values() -> &'static [Segment] {
        &Self::ALL
    }

    /// Membership check over the canonical labels
    pub fn contains(label: &str) -> bool {
        Self::ALL.iter().any(|segment| segment.label() == label)
    }

    /// Canonical label for this segment
    pub fn label(&self) -> &'static str {
        match self {
            Segment::Fancy => "Fancy",
            Segment::Optimizer => "Optimizer",
            Segment::Average => "Average",
        }
    }

    /// Deterministic classification by annual income band
    pub fn for_income(annual_income: Money) -> Segment {
        if annual_income >= FANCY_INCOME_FLOOR {
            Segment::Fancy
        } else if annual_income >= OPTIMIZER_INCOME_FLOOR {
            Segment::Optimizer
        } else {
            Segment::Average
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Segment {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|segment| segment.label() == s)
            .ok_or_else(|| EntityError::InvalidAttribute(format!("unknown segment: {s:?}")))
    }
}
