use domus_ports::{ForecastError, ForecastResult};
use serde::{Deserialize, Serialize};

/// The two supported regression strategies
///
/// Selection is by canonical label. Anything else - including near-misses
/// like `"LinearRegression"` without the space - is rejected up front with
/// `UnknownModelType` rather than silently missing a lookup later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelType {
    LinearRegression,
    GradientBoosting,
}

impl ModelType {
    /// All model types, in canonical order
    pub const ALL: [ModelType; 2] = [ModelType::LinearRegression, ModelType::GradientBoosting];

    /// Canonical label for this model type
    pub fn label(&self) -> &'static str {
        match self {
            ModelType::LinearRegression => "Linear Regression",
            ModelType::GradientBoosting => "Gradient Boosting",
        }
    }

    /// Resolve a caller-supplied label against the closed set
    pub fn parse(label: &str) -> ForecastResult<ModelType> {
        Self::ALL
            .iter()
            .copied()
            .find(|model_type| model_type.label() == label)
            .ok_or_else(|| ForecastError::UnknownModelType(label.to_string()))
    }
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ModelType {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
