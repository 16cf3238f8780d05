use std::sync::Arc;

use domus_core::{House, Money};
use domus_ports::PriceEstimator;

use crate::forecaster::PriceForecaster;
use crate::model_type::ModelType;

/// Adapter exposing a trained forecaster to the market as a price estimator
///
/// Scores a listing's `feature_vector()` with the configured strategy and
/// declines (returns `None`) when that strategy has no trained slot or the
/// vector does not match the trained arity, leaving the market to fall back
/// to the asking price.
pub struct HouseAppraiser {
    forecaster: Arc<PriceForecaster>,
    model_type: ModelType,
}

impl HouseAppraiser {
    pub fn new(forecaster: Arc<PriceForecaster>, model_type: ModelType) -> Self {
        Self {
            forecaster,
            model_type,
        }
    }

    pub fn model_type(&self) -> ModelType {
        self.model_type
    }
}

impl PriceEstimator for HouseAppraiser {
    fn appraise(&self, house: &House) -> Option<Money> {
        self.forecaster
            .predict_with(self.model_type, &house.feature_vector())
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domus_core::{HouseFeatures, HouseId};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn trained_forecaster() -> Arc<PriceForecaster> {
        // price = 100 * area, over (area, bedrooms, year built) rows
        let rows: Vec<Vec<Decimal>> = [
            (dec!(900), 2, 1990),
            (dec!(1400), 3, 2001),
            (dec!(1900), 3, 2010),
            (dec!(2400), 4, 2018),
        ]
        .into_iter()
        .map(|(area, bedrooms, year)| {
            vec![area, Decimal::from(bedrooms as u64), Decimal::from(year as i64)]
        })
        .collect();
        let targets: Vec<Decimal> = rows.iter().map(|row| dec!(100) * row[0]).collect();

        let mut forecaster = PriceForecaster::new();
        forecaster
            .train_model(ModelType::LinearRegression, &rows, &targets)
            .unwrap();
        Arc::new(forecaster)
    }

    #[test]
    fn appraises_listings_with_the_trained_strategy() {
        let appraiser =
            HouseAppraiser::new(trained_forecaster(), ModelType::LinearRegression);
        let house = House::new(
            HouseId(1),
            dec!(150000),
            HouseFeatures::new(dec!(1500), 3, 2005),
        )
        .unwrap();

        let fair_value = appraiser.appraise(&house).unwrap();
        assert!((fair_value - dec!(150000)).abs() < dec!(100));
    }

    #[test]
    fn declines_when_the_strategy_is_untrained() {
        let appraiser = HouseAppraiser::new(
            Arc::new(PriceForecaster::new()),
            ModelType::GradientBoosting,
        );
        let house = House::new(
            HouseId(1),
            dec!(150000),
            HouseFeatures::new(dec!(1500), 3, 2005),
        )
        .unwrap();
        assert_eq!(appraiser.appraise(&house), None);
    }
}
