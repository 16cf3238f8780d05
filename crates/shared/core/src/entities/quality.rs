use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::house::EARLIEST_YEAR_BUILT;
use crate::error::{EntityError, EntityResult};
use crate::values::Area;

/// Five-band quality score for a housing unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualityScore {
    Poor = 1,
    Fair = 2,
    Average = 3,
    Good = 4,
    Excellent = 5,
}

/// Reference room size used by the derived score (square feet)
const AVG_ROOM_SQFT: Area = dec!(200);

/// Reference house size used by the derived score (square feet)
const AVG_HOUSE_SQFT: Area = dec!(2000);

impl QualityScore {
    /// Numeric rank, 1 (poor) through 5 (excellent)
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Map a 1-10 overall condition rating onto the five bands
    pub fn from_overall_rating(rating: u8) -> EntityResult<QualityScore> {
        match rating {
            1..=2 => Ok(QualityScore::Poor),
            3..=4 => Ok(QualityScore::Fair),
            5..=6 => Ok(QualityScore::Average),
            7..=8 => Ok(QualityScore::Good),
            9..=10 => Ok(QualityScore::Excellent),
            other => Err(EntityError::InvalidAttribute(format!(
                "overall rating must be 1-10, got {other}"
            ))),
        }
    }

    /// Heuristic score for listings that arrive without a recorded rating
    ///
    /// Weighs age (30%), size per bedroom (40%) and base size (30%), each
    /// normalized to [0, 1].
    pub fn derive(area: Area, bedrooms: u32, year_built: i32, current_year: i32) -> QualityScore {
        let max_age = Decimal::from((current_year - EARLIEST_YEAR_BUILT).max(1));
        let age = Decimal::from((current_year - year_built).max(0));
        let age_score = Decimal::ONE - age / max_age;

        let rooms = Decimal::from(bedrooms.max(1) as u64);
        let size_per_bedroom = area / rooms;
        let size_score = (size_per_bedroom / (AVG_ROOM_SQFT * dec!(2))).min(Decimal::ONE);

        let base_size_score = (area / (AVG_HOUSE_SQFT * dec!(2))).min(Decimal::ONE);

        let total = age_score * dec!(0.3) + size_score * dec!(0.4) + base_size_score * dec!(0.3);

        if total >= dec!(0.8) {
            QualityScore::Excellent
        } else if total >= dec!(0.6) {
            QualityScore::Good
        } else if total >= dec!(0.4) {
            QualityScore::Average
        } else if total >= dec!(0.2) {
            QualityScore::Fair
        } else {
            QualityScore::Poor
        }
    }
}
