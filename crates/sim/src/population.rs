use domus_core::{House, HouseFeatures, HouseId, Money, QualityScore};
use domus_market::HousingMarket;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Already-parsed listing row handed over by the external loader
///
/// The toolkit never resolves file locations or parses raw formats; it
/// accepts these in-memory records as its input boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseRecord {
    pub sale_price: Money,
    pub living_area: Money,
    pub bedrooms: u32,
    pub year_built: i32,
    /// 1-10 overall condition rating, when the dataset carries one
    pub overall_quality: Option<u8>,
    pub location: Option<String>,
}

/// Convert listing records into a housing market
///
/// Rows that fail entity validation are skipped with a warning rather than
/// aborting the whole load.
pub fn build_market(records: &[HouseRecord]) -> HousingMarket {
    let mut market = HousingMarket::new();
    for (index, record) in records.iter().enumerate() {
        let mut features =
            HouseFeatures::new(record.living_area, record.bedrooms, record.year_built);
        if let Some(location) = &record.location {
            features = features.with_location(location.clone());
        }

        let house = match House::new(HouseId(index as u64), record.sale_price, features) {
            Ok(house) => house,
            Err(err) => {
                warn!("skipping invalid house record {index}: {err}");
                continue;
            }
        };
        let house = match record.overall_quality {
            Some(rating) => match QualityScore::from_overall_rating(rating) {
                Ok(quality) => house.with_quality(quality),
                Err(err) => {
                    warn!("house record {index} has an unusable quality rating: {err}");
                    house
                }
            },
            None => house,
        };

        if let Err(err) = market.add_house(house) {
            warn!("skipping house record {index}: {err}");
        }
    }
    info!(
        "built market with {} of {} listing records",
        market.house_count(),
        records.len()
    );
    market
}

/// Feature matrix and target vector for forecaster training
///
/// Rows align with `House::feature_vector` (area, bedrooms, year built);
/// records that would fail listing validation are excluded, matching
/// `build_market`.
pub fn training_set(records: &[HouseRecord]) -> (Vec<Vec<Money>>, Vec<Money>) {
    let mut rows = Vec::new();
    let mut targets = Vec::new();
    for record in records {
        if record.sale_price <= Money::ZERO || record.living_area <= Money::ZERO {
            continue;
        }
        rows.push(vec![
            record.living_area,
            Money::from(record.bedrooms as u64),
            Money::from(record.year_built as i64),
        ]);
        targets.push(record.sale_price);
    }
    (rows, targets)
}
