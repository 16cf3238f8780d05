use domus_core::Money;
use domus_ports::{ForecastError, ForecastResult};

/// Minimum number of samples a training call must supply
pub const MIN_TRAINING_ROWS: usize = 2;

/// Validate a training set and return its feature arity
///
/// Rejects undersized or misaligned inputs before any numeric work starts.
pub(crate) fn check_training_set(
    rows: &[Vec<Money>],
    targets: &[Money],
) -> ForecastResult<usize> {
    if rows.len() < MIN_TRAINING_ROWS {
        return Err(ForecastError::InsufficientData(format!(
            "need at least {MIN_TRAINING_ROWS} samples, got {}",
            rows.len()
        )));
    }
    if rows.len() != targets.len() {
        return Err(ForecastError::InsufficientData(format!(
            "{} feature rows against {} targets",
            rows.len(),
            targets.len()
        )));
    }

    let arity = rows[0].len();
    if arity == 0 {
        return Err(ForecastError::InsufficientData(
            "feature rows are empty".to_string(),
        ));
    }
    for row in rows {
        if row.len() != arity {
            return Err(ForecastError::DimensionMismatch {
                expected: arity,
                got: row.len(),
            });
        }
    }
    Ok(arity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn undersized_and_misaligned_sets_are_rejected() {
        let one_row = vec![vec![dec!(1)]];
        assert!(matches!(
            check_training_set(&one_row, &[dec!(1)]),
            Err(ForecastError::InsufficientData(_))
        ));

        let rows = vec![vec![dec!(1)], vec![dec!(2)]];
        assert!(matches!(
            check_training_set(&rows, &[dec!(1)]),
            Err(ForecastError::InsufficientData(_))
        ));
    }

    #[test]
    fn ragged_rows_are_a_dimension_mismatch() {
        let rows = vec![vec![dec!(1), dec!(2)], vec![dec!(3)]];
        assert!(matches!(
            check_training_set(&rows, &[dec!(1), dec!(2)]),
            Err(ForecastError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn well_formed_sets_report_arity() {
        let rows = vec![vec![dec!(1), dec!(2)], vec![dec!(3), dec!(4)]];
        assert_eq!(check_training_set(&rows, &[dec!(1), dec!(2)]).unwrap(), 2);
    }
}
