use domus_core::Money;
use domus_ports::{ForecastError, ForecastResult, Regressor};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::dataset::check_training_set;
use crate::model_type::ModelType;

/// Ridge term added to the Gram diagonal so collinear columns stay solvable
pub const REGULARIZATION: Decimal = dec!(0.000000001);

/// A pivot below this is treated as a singular system
const PIVOT_EPSILON: Decimal = dec!(0.000000000001);

/// Ordinary least squares with intercept
///
/// Solves the normal equations `X'X b = X'y` by Gaussian elimination with
/// partial pivoting, entirely in `Decimal`.
pub struct LinearModel {
    fitted: Option<FittedLine>,
}

struct FittedLine {
    /// Intercept followed by one coefficient per feature column
    coefficients: Vec<Decimal>,
}

impl LinearModel {
    pub fn new() -> Self {
        Self { fitted: None }
    }
}

impl Default for LinearModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Regressor for LinearModel {
    fn fit(&mut self, rows: &[Vec<Money>], targets: &[Money]) -> ForecastResult<()> {
        let arity = check_training_set(rows, targets)?;
        let dim = arity + 1;

        // Gram matrix and right-hand side over the intercept-augmented design
        let mut gram = vec![vec![Decimal::ZERO; dim]; dim];
        let mut rhs = vec![Decimal::ZERO; dim];
        for (row, target) in rows.iter().zip(targets) {
            for i in 0..dim {
                let xi = if i == 0 { Decimal::ONE } else { row[i - 1] };
                rhs[i] += xi * *target;
                for j in i..dim {
                    let xj = if j == 0 { Decimal::ONE } else { row[j - 1] };
                    gram[i][j] += xi * xj;
                }
            }
        }
        for i in 0..dim {
            for j in 0..i {
                gram[i][j] = gram[j][i];
            }
            gram[i][i] += REGULARIZATION;
        }

        let coefficients = solve(gram, rhs)?;
        self.fitted = Some(FittedLine { coefficients });
        Ok(())
    }

    fn predict(&self, row: &[Money]) -> ForecastResult<Money> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or_else(|| ForecastError::ModelNotTrained(self.name().to_string()))?;

        let arity = fitted.coefficients.len() - 1;
        if row.len() != arity {
            return Err(ForecastError::DimensionMismatch {
                expected: arity,
                got: row.len(),
            });
        }

        let mut estimate = fitted.coefficients[0];
        for (value, coefficient) in row.iter().zip(&fitted.coefficients[1..]) {
            estimate += *value * *coefficient;
        }
        Ok(estimate)
    }

    fn feature_count(&self) -> Option<usize> {
        self.fitted
            .as_ref()
            .map(|fitted| fitted.coefficients.len() - 1)
    }

    fn name(&self) -> &str {
        ModelType::LinearRegression.label()
    }
}

/// Gaussian elimination with partial pivoting, then back substitution
fn solve(mut a: Vec<Vec<Decimal>>, mut b: Vec<Decimal>) -> ForecastResult<Vec<Decimal>> {
    let n = b.len();

    for col in 0..n {
        let mut pivot = col;
        for row in col + 1..n {
            if a[row][col].abs() > a[pivot][col].abs() {
                pivot = row;
            }
        }
        if a[pivot][col].abs() < PIVOT_EPSILON {
            return Err(ForecastError::InsufficientData(
                "feature columns are collinear; normal equations are singular".to_string(),
            ));
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            for c in col..n {
                let delta = factor * a[col][c];
                a[row][c] -= delta;
            }
            let b_col = b[col];
            b[row] -= factor * b_col;
        }
    }

    let mut x = vec![Decimal::ZERO; n];
    for row in (0..n).rev() {
        let mut acc = b[row];
        for col in row + 1..n {
            acc -= a[row][col] * x[col];
        }
        x[row] = acc / a[row][row];
    }
    Ok(x)
}
