use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::segment::Segment;
use crate::values::{ConsumerId, HouseId, Money};

/// Unique identifier for a sale
pub type SaleId = Uuid;

/// Sale produced by a market clearing pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: SaleId,
    pub consumer_id: ConsumerId,
    pub house_id: HouseId,
    /// Asking price the unit cleared at
    pub price: Money,
    /// Segment of the buying consumer at match time
    pub segment: Segment,
    pub timestamp: DateTime<Utc>,
}

impl SaleRecord {
    /// Create a sale record with explicit timestamp
    pub fn new_with_time(
        consumer_id: ConsumerId,
        house_id: HouseId,
        price: Money,
        segment: Segment,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            consumer_id,
            house_id,
            price,
            segment,
            timestamp,
        }
    }

    /// Create a sale record using current system time
    pub fn new(
        consumer_id: ConsumerId,
        house_id: HouseId,
        price: Money,
        segment: Segment,
    ) -> Self {
        Self::new_with_time(consumer_id, house_id, price, segment, Utc::now())
    }
}
