use std::collections::HashMap;

use domus_core::Money;
use domus_ports::{ForecastError, ForecastResult, Regressor};
use log::info;

use crate::boosting::BoostedTreesModel;
use crate::linear::LinearModel;
use crate::metrics::TrainingReport;
use crate::model_type::ModelType;

/// Model-selection facade over the two supported regression strategies
///
/// Holds one trained slot per model type; a training call replaces that
/// type's slot and leaves the other untouched. Prediction requires a prior
/// successful fit for the requested type.
pub struct PriceForecaster {
    trained: HashMap<ModelType, TrainedModel>,
}

struct TrainedModel {
    regressor: Box<dyn Regressor>,
    report: TrainingReport,
}

impl PriceForecaster {
    pub fn new() -> Self {
        Self {
            trained: HashMap::new(),
        }
    }

    /// Train the strategy selected by its canonical label
    ///
    /// The label is validated against the closed set before any numeric
    /// work; near-miss spellings fail with `UnknownModelType`.
    pub fn train(
        &mut self,
        model_type: &str,
        rows: &[Vec<Money>],
        targets: &[Money],
    ) -> ForecastResult<TrainingReport> {
        let model_type = ModelType::parse(model_type)?;
        self.train_model(model_type, rows, targets)
    }

    /// Train the strategy selected by its enum variant
    pub fn train_model(
        &mut self,
        model_type: ModelType,
        rows: &[Vec<Money>],
        targets: &[Money],
    ) -> ForecastResult<TrainingReport> {
        let mut regressor: Box<dyn Regressor> = match model_type {
            ModelType::LinearRegression => Box::new(LinearModel::new()),
            ModelType::GradientBoosting => Box::new(BoostedTreesModel::new()),
        };
        regressor.fit(rows, targets)?;

        let fitted: Vec<Money> = rows
            .iter()
            .map(|row| regressor.predict(row))
            .collect::<ForecastResult<_>>()?;
        let report = TrainingReport::from_predictions(model_type, &fitted, targets);
        info!(
            "trained {} on {} samples (r²={:.3})",
            model_type, report.n_samples, report.r_squared
        );

        self.trained.insert(model_type, TrainedModel {
            regressor,
            report: report.clone(),
        });
        Ok(report)
    }

    /// Price estimate from the strategy selected by its canonical label
    pub fn predict(&self, model_type: &str, row: &[Money]) -> ForecastResult<Money> {
        let model_type = ModelType::parse(model_type)?;
        self.predict_with(model_type, row)
    }

    /// Price estimate from the strategy selected by its enum variant
    pub fn predict_with(&self, model_type: ModelType, row: &[Money]) -> ForecastResult<Money> {
        let trained = self
            .trained
            .get(&model_type)
            .ok_or_else(|| ForecastError::ModelNotTrained(model_type.label().to_string()))?;
        trained.regressor.predict(row)
    }

    /// Whether a trained slot exists for the model type
    pub fn is_trained(&self, model_type: ModelType) -> bool {
        self.trained.contains_key(&model_type)
    }

    /// Training report for the model type's current slot, if any
    pub fn training_report(&self, model_type: ModelType) -> Option<&TrainingReport> {
        self.trained.get(&model_type).map(|trained| &trained.report)
    }
}

impl Default for PriceForecaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// price = 50 * area + 1000 * bedrooms, exactly linear
    fn linear_fixture() -> (Vec<Vec<Decimal>>, Vec<Decimal>) {
        let rows = vec![
            vec![dec!(800), dec!(2)],
            vec![dec!(1200), dec!(2)],
            vec![dec!(1500), dec!(3)],
            vec![dec!(2000), dec!(4)],
            vec![dec!(2600), dec!(4)],
        ];
        let targets = rows
            .iter()
            .map(|row| dec!(50) * row[0] + dec!(1000) * row[1])
            .collect();
        (rows, targets)
    }

    #[test]
    fn train_then_predict_recovers_training_rows() {
        let (rows, targets) = linear_fixture();
        let mut forecaster = PriceForecaster::new();
        forecaster.train("Linear Regression", &rows, &targets).unwrap();

        for (row, target) in rows.iter().zip(&targets) {
            let estimate = forecaster.predict("Linear Regression", row).unwrap();
            assert!((estimate - *target).abs() < dec!(0.01));
        }
    }

    #[test]
    fn both_strategies_serve_the_same_contract() {
        let (rows, targets) = linear_fixture();
        let mut forecaster = PriceForecaster::new();

        for model_type in ModelType::ALL {
            let report = forecaster
                .train_model(model_type, &rows, &targets)
                .unwrap();
            assert_eq!(report.n_samples, rows.len());

            let estimate = forecaster.predict_with(model_type, &rows[0]).unwrap();
            // Both estimates stay in the neighbourhood of the recorded price
            assert!((estimate - targets[0]).abs() < dec!(5000));
        }
    }

    #[test]
    fn unknown_model_type_literals_are_rejected() {
        let (rows, targets) = linear_fixture();
        let mut forecaster = PriceForecaster::new();

        // The historical defect: the default label spelled without a space
        assert!(matches!(
            forecaster.train("LinearRegression", &rows, &targets),
            Err(ForecastError::UnknownModelType(_))
        ));
        assert!(matches!(
            forecaster.predict("Advanced", &rows[0]),
            Err(ForecastError::UnknownModelType(_))
        ));
    }

    #[test]
    fn predict_before_train_is_an_error_per_type() {
        let (rows, targets) = linear_fixture();
        let mut forecaster = PriceForecaster::new();
        forecaster.train("Linear Regression", &rows, &targets).unwrap();

        // The other slot stays untrained
        assert!(matches!(
            forecaster.predict("Gradient Boosting", &rows[0]),
            Err(ForecastError::ModelNotTrained(_))
        ));
    }

    #[test]
    fn retraining_replaces_only_that_slot() {
        let (rows, targets) = linear_fixture();
        let mut forecaster = PriceForecaster::new();
        forecaster.train("Linear Regression", &rows, &targets).unwrap();
        forecaster.train("Gradient Boosting", &rows, &targets).unwrap();

        // Retrain linear on a single-feature set; boosting keeps its arity
        let narrow_rows = vec![vec![dec!(1)], vec![dec!(2)], vec![dec!(3)]];
        let narrow_targets = vec![dec!(10), dec!(20), dec!(30)];
        forecaster
            .train("Linear Regression", &narrow_rows, &narrow_targets)
            .unwrap();

        assert!(matches!(
            forecaster.predict("Linear Regression", &rows[0]),
            Err(ForecastError::DimensionMismatch {
                expected: 1,
                got: 2
            })
        ));
        assert!(forecaster.predict("Gradient Boosting", &rows[0]).is_ok());
    }

    #[test]
    fn insufficient_data_is_rejected() {
        let mut forecaster = PriceForecaster::new();
        assert!(matches!(
            forecaster.train("Linear Regression", &[vec![dec!(1)]], &[dec!(1)]),
            Err(ForecastError::InsufficientData(_))
        ));
        assert!(!forecaster.is_trained(ModelType::LinearRegression));
    }

    #[test]
    fn training_report_tracks_the_current_slot() {
        let (rows, targets) = linear_fixture();
        let mut forecaster = PriceForecaster::new();
        assert!(forecaster.training_report(ModelType::LinearRegression).is_none());

        let report = forecaster.train("Linear Regression", &rows, &targets).unwrap();
        let stored = forecaster
            .training_report(ModelType::LinearRegression)
            .unwrap();
        assert_eq!(stored.n_samples, report.n_samples);
        assert_eq!(stored.r_squared, report.r_squared);
    }
}
