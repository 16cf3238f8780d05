use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::quality::QualityScore;
use crate::error::{EntityError, EntityResult};
use crate::values::{Area, HouseId, Money};

/// Oldest construction year the toolkit accepts
pub const EARLIEST_YEAR_BUILT: i32 = 1800;

/// A listing younger than this many years counts as new construction
pub const NEW_CONSTRUCTION_MAX_AGE: i32 = 5;

/// Structural and location attributes of a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseFeatures {
    pub area: Area,
    pub bedrooms: u32,
    pub year_built: i32,
    pub location: Option<String>,
}

impl HouseFeatures {
    pub fn new(area: Area, bedrooms: u32, year_built: i32) -> Self {
        Self {
            area,
            bedrooms,
            year_built,
            location: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// A housing unit listed on the market
///
/// `available` flips to false exactly once, when the unit is matched; the
/// unit is never relisted within a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct House {
    pub id: HouseId,
    pub price: Money,
    pub features: HouseFeatures,
    pub quality: Option<QualityScore>,
    available: bool,
}

impl House {
    /// Create a listing; price and area must be positive
    pub fn new(id: HouseId, price: Money, features: HouseFeatures) -> EntityResult<Self> {
        if price <= Money::ZERO {
            return Err(EntityError::InvalidAttribute(format!(
                "price must be positive, got {price}"
            )));
        }
        if features.area <= Area::ZERO {
            return Err(EntityError::InvalidAttribute(format!(
                "area must be positive, got {}",
                features.area
            )));
        }

        Ok(Self {
            id,
            price,
            features,
            quality: None,
            available: true,
        })
    }

    /// Attach a recorded quality score
    pub fn with_quality(mut self, quality: QualityScore) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Take the unit off the market
    ///
    /// Double-matching is a sequencing error, not a no-op.
    pub fn mark_sold(&mut self) -> EntityResult<()> {
        if !self.available {
            return Err(EntityError::InvalidState(format!(
                "house {} is already sold",
                self.id
            )));
        }
        self.available = false;
        Ok(())
    }

    /// Price per square foot, rounded to cents
    pub fn price_per_square_foot(&self) -> Money {
        // area > 0 is guaranteed by the constructor
        (self.price / self.features.area).round_dp(2)
    }

    /// Whether the unit counts as new construction relative to `current_year`
    pub fn is_new_construction(&self, current_year: i32) -> EntityResult<bool> {
        if self.features.year_built > current_year {
            return Err(EntityError::InvalidAttribute(format!(
                "year built {} is in the future",
                self.features.year_built
            )));
        }
        if self.features.year_built < EARLIEST_YEAR_BUILT {
            return Err(EntityError::InvalidAttribute(format!(
                "year built {} predates {EARLIEST_YEAR_BUILT}",
                self.features.year_built
            )));
        }
        Ok(current_year - self.features.year_built < NEW_CONSTRUCTION_MAX_AGE)
    }

    /// Recorded quality score, or the derived heuristic when none was recorded
    pub fn quality_or_derived(&self, current_year: i32) -> QualityScore {
        self.quality.unwrap_or_else(|| {
            QualityScore::derive(
                self.features.area,
                self.features.bedrooms,
                self.features.year_built,
                current_year,
            )
        })
    }

    /// Regression feature row for this listing: area, bedrooms, year built
    ///
    /// Kept aligned with the training sets the forecaster is fit on.
    pub fn feature_vector(&self) -> Vec<Money> {
        vec![
            self.features.area,
            Decimal::from(self.features.bedrooms as u64),
            Decimal::from(self.features.year_built as i64),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn house(price: Money) -> House {
        House::new(HouseId(1), price, HouseFeatures::new(dec!(1500), 3, 2010)).unwrap()
    }

    #[test]
    fn non_positive_price_is_rejected() {
        let err = House::new(HouseId(1), Money::ZERO, HouseFeatures::new(dec!(1500), 3, 2010));
        assert!(matches!(err, Err(EntityError::InvalidAttribute(_))));
        let err = House::new(HouseId(1), dec!(-5), HouseFeatures::new(dec!(1500), 3, 2010));
        assert!(matches!(err, Err(EntityError::InvalidAttribute(_))));
    }

    #[test]
    fn non_positive_area_is_rejected() {
        let err = House::new(HouseId(1), dec!(100000), HouseFeatures::new(Area::ZERO, 3, 2010));
        assert!(matches!(err, Err(EntityError::InvalidAttribute(_))));
    }

    #[test]
    fn selling_twice_is_an_error() {
        let mut h = house(dec!(100000));
        assert!(h.is_available());
        h.mark_sold().unwrap();
        assert!(!h.is_available());
        assert!(matches!(h.mark_sold(), Err(EntityError::InvalidState(_))));
        assert!(!h.is_available());
    }

    #[test]
    fn price_per_square_foot_rounds_to_cents() {
        let h = House::new(HouseId(1), dec!(100000), HouseFeatures::new(dec!(1333), 3, 2010))
            .unwrap();
        assert_eq!(h.price_per_square_foot(), dec!(75.02));
    }

    #[test]
    fn new_construction_window_is_five_years() {
        let recent = House::new(HouseId(1), dec!(100000), HouseFeatures::new(dec!(1500), 3, 2021))
            .unwrap();
        assert!(recent.is_new_construction(2024).unwrap());

        let old = house(dec!(100000));
        assert!(!old.is_new_construction(2024).unwrap());
    }

    #[test]
    fn implausible_year_built_is_rejected() {
        let future = House::new(HouseId(1), dec!(100000), HouseFeatures::new(dec!(1500), 3, 2030))
            .unwrap();
        assert!(future.is_new_construction(2024).is_err());

        let ancient = House::new(HouseId(1), dec!(100000), HouseFeatures::new(dec!(1500), 3, 1750))
            .unwrap();
        assert!(ancient.is_new_construction(2024).is_err());
    }

    #[test]
    fn quality_falls_back_to_derived_score() {
        let rated = house(dec!(100000)).with_quality(QualityScore::Poor);
        assert_eq!(rated.quality_or_derived(2024), QualityScore::Poor);

        let unrated = house(dec!(100000));
        assert_eq!(
            unrated.quality_or_derived(2024),
            QualityScore::derive(dec!(1500), 3, 2010, 2024)
        );
    }

    #[test]
    fn feature_vector_is_area_bedrooms_year() {
        let h = house(dec!(100000));
        assert_eq!(h.feature_vector(), vec![dec!(1500), dec!(3), dec!(2010)]);
    }
}
