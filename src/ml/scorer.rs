// ============================================================
// Layer 5 — Scorer
// ============================================================
// Scores a model against a TrainingTable:
//
//   score = Σ_i |raw_prediction_i - expected_i|
//
// One batch prediction over the whole input matrix, then an L1
// sum (not a mean) accumulated in f64. Lower is better.

use crate::domain::error::{Result, TrainerError};
use crate::domain::matrix::TrainingTable;
use crate::domain::traits::TrainableModel;

/// Sum of absolute errors between raw predictions and targets.
pub fn score<M: TrainableModel + ?Sized>(model: &M, table: &TrainingTable) -> Result<f64> {
    let predicted = model.predict_raw(table.inputs())?;
    let expected = table.outputs();

    if predicted.rows() != expected.rows() || predicted.cols() != expected.cols() {
        return Err(TrainerError::Model(format!(
            "prediction shape {}x{} does not match expected {}x{}",
            predicted.rows(),
            predicted.cols(),
            expected.rows(),
            expected.cols()
        )));
    }

    Ok(predicted
        .as_slice()
        .iter()
        .zip(expected.as_slice())
        .map(|(&p, &e)| (f64::from(p) - f64::from(e)).abs())
        .sum())
}

/// Per-row average of a total score; 0 for an empty table.
pub fn mean_score(total: f64, rows: usize) -> f64 {
    if rows == 0 {
        0.0
    } else {
        total / rows as f64
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::matrix::Matrix;
    use crate::domain::traits::TrainMode;
    use std::path::Path;

    /// Returns a fixed prediction matrix regardless of input.
    struct FixedModel {
        sizes: Vec<usize>,
        prediction: Matrix<f32>,
    }

    impl TrainableModel for FixedModel {
        fn layer_sizes(&self) -> &[usize] {
            &self.sizes
        }
        fn train(&mut self, _: &TrainingTable, _: TrainMode) -> Result<()> {
            Ok(())
        }
        fn predict_raw(&self, _: &Matrix<f32>) -> Result<Matrix<f32>> {
            Ok(self.prediction.clone())
        }
        fn serialize(&self, _: &Path) -> Result<()> {
            Ok(())
        }
    }

    fn table(targets: Vec<f32>) -> TrainingTable {
        let n = targets.len();
        TrainingTable::new(
            Matrix::zeros(n, 2),
            Matrix::from_flat(targets, n, 1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_score_is_l1_sum() {
        let model = FixedModel {
            sizes: vec![2, 1],
            prediction: Matrix::from_flat(vec![0.5, 1.0, -1.0, 0.25], 4, 1).unwrap(),
        };
        let total = score(&model, &table(vec![0.0, 1.0, 1.0, 0.0])).unwrap();
        // 0.5 + 0 + 2 + 0.25
        assert!((total - 2.75).abs() < 1e-9);
        assert!((mean_score(total, 4) - 0.6875).abs() < 1e-9);
    }

    #[test]
    fn test_perfect_prediction_scores_zero() {
        let model = FixedModel {
            sizes: vec![2, 1],
            prediction: Matrix::from_flat(vec![0.0, 1.0], 2, 1).unwrap(),
        };
        assert_eq!(score(&model, &table(vec![0.0, 1.0])).unwrap(), 0.0);
    }

    #[test]
    fn test_shape_mismatch_is_model_error() {
        let model = FixedModel {
            sizes: vec![2, 1],
            prediction: Matrix::zeros(3, 1),
        };
        assert!(matches!(
            score(&model, &table(vec![0.0, 1.0])),
            Err(TrainerError::Model(_))
        ));
    }

    #[test]
    fn test_mean_of_empty_table() {
        assert_eq!(mean_score(0.0, 0), 0.0);
    }
}
