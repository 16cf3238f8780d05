use domus_core::Money;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::model_type::ModelType;

/// Goodness-of-fit summary for a trained model, computed over its own
/// training set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub model_type: ModelType,
    pub r_squared: Decimal,
    pub rmse: Decimal,
    pub mae: Decimal,
    /// Mean absolute percentage error; zero-valued targets are skipped
    pub mape: Decimal,
    pub n_samples: usize,
}

/// Coarse banding of a report's in-sample fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl TrainingReport {
    /// Build a report from aligned fitted values and targets
    pub fn from_predictions(
        model_type: ModelType,
        predictions: &[Money],
        targets: &[Money],
    ) -> Self {
        let n = targets.len();
        let count = Decimal::from(n.max(1) as u64);

        let target_mean: Decimal = targets.iter().sum::<Decimal>() / count;

        let mut ss_res = Decimal::ZERO;
        let mut ss_tot = Decimal::ZERO;
        let mut abs_errors = Decimal::ZERO;
        let mut pct_errors = Decimal::ZERO;
        let mut pct_count = 0u64;
        for (prediction, target) in predictions.iter().zip(targets) {
            let residual = *target - *prediction;
            ss_res += residual * residual;
            ss_tot += (*target - target_mean) * (*target - target_mean);
            abs_errors += residual.abs();
            if !target.is_zero() {
                pct_errors += (residual / *target).abs();
                pct_count += 1;
            }
        }

        let r_squared = if ss_tot > Decimal::ZERO {
            Decimal::ONE - ss_res / ss_tot
        } else {
            Decimal::ZERO
        };
        let rmse = sqrt_decimal(ss_res / count);
        let mae = abs_errors / count;
        let mape = if pct_count > 0 {
            pct_errors / Decimal::from(pct_count)
        } else {
            Decimal::ZERO
        };

        Self {
            model_type,
            r_squared,
            rmse,
            mae,
            mape,
            n_samples: n,
        }
    }

    /// Coarse fit grade from explained variance and sample count
    pub fn quality_grade(&self) -> FitQuality {
        if self.r_squared > dec!(0.9) && self.n_samples >= 30 {
            FitQuality::Excellent
        } else if self.r_squared > dec!(0.7) && self.n_samples >= 10 {
            FitQuality::Good
        } else if self.r_squared > dec!(0.5) {
            FitQuality::Fair
        } else {
            FitQuality::Poor
        }
    }

    /// Human-readable summary
    pub fn report(&self) -> String {
        format!(
            "Training Results ({})\n\
             R²: {:.3}\n\
             RMSE: {:.2}\n\
             MAE: {:.2}\n\
             MAPE: {:.4}\n\
             Samples: {}\n\
             Quality: {:?}",
            self.model_type,
            self.r_squared,
            self.rmse,
            self.mae,
            self.mape,
            self.n_samples,
            self.quality_grade(),
        )
    }
}

/// Newton-iteration square root for Decimal
pub fn sqrt_decimal(x: Decimal) -> Decimal {
    if x <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut guess = x / Decimal::TWO;
    if guess.is_zero() {
        guess = dec!(0.0001);
    }

    for _ in 0..32 {
        let next = (guess + x / guess) / Decimal::TWO;
        if (next - guess).abs() < dec!(0.0000001) {
            return next;
        }
        guess = next;
    }
    guess
}
