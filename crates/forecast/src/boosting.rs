use domus_core::Money;
use domus_ports::{ForecastError, ForecastResult, Regressor};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::dataset::check_training_set;
use crate::model_type::ModelType;

/// Number of boosting rounds
pub const ESTIMATORS: usize = 100;

/// Shrinkage applied to every tree's contribution
pub const LEARNING_RATE: Decimal = dec!(0.1);

/// Maximum depth of each regression tree
pub const MAX_DEPTH: usize = 4;

/// A node is not split below this many samples
pub const MIN_SAMPLES_SPLIT: usize = 2;

/// Gradient-boosted regression trees on squared error
///
/// Each round fits a depth-limited tree to the current residuals and folds
/// it in at the fixed learning rate. The ensemble is fully deterministic:
/// no row or feature subsampling, and split ties resolve to the first
/// candidate in (feature index, threshold) order, so identical inputs
/// reproduce identical ensembles across runs.
pub struct BoostedTreesModel {
    fitted: Option<FittedEnsemble>,
}

struct FittedEnsemble {
    base_prediction: Decimal,
    trees: Vec<Node>,
    feature_count: usize,
}

enum Node {
    Leaf {
        value: Decimal,
    },
    Split {
        feature: usize,
        threshold: Decimal,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn score(&self, row: &[Decimal]) -> Decimal {
        match self {
            Node::Leaf { value } => *value,
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if row[*feature] <= *threshold {
                    left.score(row)
                } else {
                    right.score(row)
                }
            }
        }
    }
}

impl BoostedTreesModel {
    pub fn new() -> Self {
        Self { fitted: None }
    }
}

impl Default for BoostedTreesModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Regressor for BoostedTreesModel {
    fn fit(&mut self, rows: &[Vec<Money>], targets: &[Money]) -> ForecastResult<()> {
        let arity = check_training_set(rows, targets)?;

        let base_prediction = mean(targets);
        let mut residuals: Vec<Decimal> =
            targets.iter().map(|target| *target - base_prediction).collect();

        let all_indices: Vec<usize> = (0..rows.len()).collect();
        let mut trees = Vec::with_capacity(ESTIMATORS);
        for _ in 0..ESTIMATORS {
            if residuals.iter().all(|residual| residual.is_zero()) {
                break;
            }
            let tree = grow(rows, &residuals, &all_indices, 0);
            for (index, row) in rows.iter().enumerate() {
                residuals[index] -= LEARNING_RATE * tree.score(row);
            }
            trees.push(tree);
        }

        self.fitted = Some(FittedEnsemble {
            base_prediction,
            trees,
            feature_count: arity,
        });
        Ok(())
    }

    fn predict(&self, row: &[Money]) -> ForecastResult<Money> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or_else(|| ForecastError::ModelNotTrained(self.name().to_string()))?;

        if row.len() != fitted.feature_count {
            return Err(ForecastError::DimensionMismatch {
                expected: fitted.feature_count,
                got: row.len(),
            });
        }

        let boosted: Decimal = fitted.trees.iter().map(|tree| tree.score(row)).sum();
        Ok(fitted.base_prediction + LEARNING_RATE * boosted)
    }

    fn feature_count(&self) -> Option<usize> {
        self.fitted.as_ref().map(|fitted| fitted.feature_count)
    }

    fn name(&self) -> &str {
        ModelType::GradientBoosting.label()
    }
}

fn grow(rows: &[Vec<Decimal>], residuals: &[Decimal], indices: &[usize], depth: usize) -> Node {
    let node_mean = mean_over(residuals, indices);
    if depth >= MAX_DEPTH || indices.len() < MIN_SAMPLES_SPLIT {
        return Node::Leaf { value: node_mean };
    }

    let Some((feature, threshold)) = best_split(rows, residuals, indices) else {
        return Node::Leaf { value: node_mean };
    };

    let (left, right): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&index| rows[index][feature] <= threshold);

    Node::Split {
        feature,
        threshold,
        left: Box::new(grow(rows, residuals, &left, depth + 1)),
        right: Box::new(grow(rows, residuals, &right, depth + 1)),
    }
}

/// Best (feature, threshold) split by squared-error reduction
///
/// Candidate thresholds are midpoints between consecutive distinct feature
/// values; only strictly positive gains split, and ties keep the first
/// candidate scanned.
fn best_split(
    rows: &[Vec<Decimal>],
    residuals: &[Decimal],
    indices: &[usize],
) -> Option<(usize, Decimal)> {
    let arity = rows[indices[0]].len();
    let parent_sse = sse_over(residuals, indices);

    let mut best: Option<(Decimal, usize, Decimal)> = None;
    for feature in 0..arity {
        let mut values: Vec<Decimal> = indices.iter().map(|&index| rows[index][feature]).collect();
        values.sort();
        values.dedup();

        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / dec!(2);

            let mut left_sum = Decimal::ZERO;
            let mut left_sq = Decimal::ZERO;
            let mut left_count = 0u64;
            let mut right_sum = Decimal::ZERO;
            let mut right_sq = Decimal::ZERO;
            let mut right_count = 0u64;
            for &index in indices {
                let residual = residuals[index];
                if rows[index][feature] <= threshold {
                    left_sum += residual;
                    left_sq += residual * residual;
                    left_count += 1;
                } else {
                    right_sum += residual;
                    right_sq += residual * residual;
                    right_count += 1;
                }
            }
            if left_count == 0 || right_count == 0 {
                continue;
            }

            let left_sse = left_sq - left_sum * left_sum / Decimal::from(left_count);
            let right_sse = right_sq - right_sum * right_sum / Decimal::from(right_count);
            let gain = parent_sse - left_sse - right_sse;

            let better = match &best {
                Some((best_gain, _, _)) => gain > *best_gain,
                None => gain > Decimal::ZERO,
            };
            if better {
                best = Some((gain, feature, threshold));
            }
        }
    }

    best.map(|(_, feature, threshold)| (feature, threshold))
}

fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    values.iter().sum::<Decimal>() / Decimal::from(values.len() as u64)
}

fn mean_over(values: &[Decimal], indices: &[usize]) -> Decimal {
    if indices.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = indices.iter().map(|&index| values[index]).sum();
    sum / Decimal::from(indices.len() as u64)
}

fn sse_over(values: &[Decimal], indices: &[usize]) -> Decimal {
    let mut sum = Decimal::ZERO;
    let mut sq = Decimal::ZERO;
    for &index in indices {
        sum += values[index];
        sq += values[index] * values[index];
    }
    if indices.is_empty() {
        return Decimal::ZERO;
    }
    sq - sum * sum / Decimal::from(indices.len() as u64)
}
