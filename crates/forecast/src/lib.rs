//! Domus Forecast
//!
//! Price forecasting for the domus toolkit: a model-selection facade over
//! exactly two regression strategies (ordinary least squares and gradient
//! boosted trees), both fit and served entirely in `Decimal`.

mod appraiser;
mod boosting;
mod dataset;
mod forecaster;
mod linear;
mod metrics;
mod model_type;

pub use appraiser::HouseAppraiser;
pub use boosting::{BoostedTreesModel, ESTIMATORS, LEARNING_RATE, MAX_DEPTH, MIN_SAMPLES_SPLIT};
pub use dataset::MIN_TRAINING_ROWS;
pub use forecaster::PriceForecaster;
pub use linear::{LinearModel, REGULARIZATION};
pub use metrics::{FitQuality, TrainingReport};
pub use model_type::ModelType;
