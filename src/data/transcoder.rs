// ============================================================
// Layer 4 — Matrix Transcoder
// ============================================================
// Splits a Dataset into the two matrices the network consumes:
//
//   record:  [ x0, x1, ..., x(n-1), y ]
//                 │                 │
//                 ▼                 ▼
//   inputs:  row i = [x0 .. x(n-1)]   (rows x n, f32)
//   outputs: row i = [y]              (rows x 1, f32)
//
// Values are narrowed to f32 and copied as-is: no scaling,
// no normalisation.

use crate::domain::dataset::Dataset;
use crate::domain::error::Result;
use crate::domain::matrix::{Matrix, TrainingTable};

/// Build the input/output matrices for `dataset`.
pub fn to_training_table(dataset: &Dataset) -> Result<TrainingTable> {
    let rows = dataset.len();
    let cols = dataset.attribute_count();

    let mut inputs = Matrix::<f32>::zeros(rows, cols);
    let mut outputs = Matrix::<f32>::zeros(rows, 1);

    for (r, record) in dataset.records().iter().enumerate() {
        for (c, &value) in record.inputs().iter().enumerate() {
            inputs.set(r, c, value as f32);
        }
        // Dataset guarantees every record has the trailing target
        if let Some(target) = record.target() {
            outputs.set(r, 0, target as f32);
        }
    }

    tracing::debug!("Transcoded {} rows: {} inputs, 1 output", rows, cols);

    TrainingTable::new(inputs, outputs)
}

/// All record values (inputs followed by target) as one f64 matrix,
/// in the shape the Dataset Writer expects.
pub fn to_relation_matrix(dataset: &Dataset) -> Matrix<f64> {
    let rows = dataset.len();
    let cols = dataset.attribute_count() + 1;

    let mut matrix = Matrix::<f64>::zeros(rows, cols);
    for (r, record) in dataset.records().iter().enumerate() {
        for (c, &value) in record.fields().iter().enumerate() {
            matrix.set(r, c, value);
        }
    }
    matrix
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::{AttributeSet, RelationRecord};

    fn xor() -> Dataset {
        let rows = [[0.0, 0.0, 0.0], [0.0, 1.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 0.0]];
        Dataset::new(
            AttributeSet::new(["p0", "p1"]),
            rows.iter().map(|r| RelationRecord::new(r.to_vec())).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_xor_layout() {
        let table = to_training_table(&xor()).unwrap();

        assert_eq!(
            table.inputs().as_slice(),
            &[0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0]
        );
        assert_eq!(table.outputs().as_slice(), &[0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_shape_invariant() {
        let ds = xor();
        let table = to_training_table(&ds).unwrap();
        assert_eq!(table.inputs().rows(), ds.len());
        assert_eq!(table.outputs().rows(), ds.len());
        assert_eq!(table.inputs().cols(), ds.attribute_count());
        assert_eq!(table.outputs().cols(), 1);
    }

    #[test]
    fn test_values_are_narrowed_not_scaled() {
        let ds = Dataset::new(
            AttributeSet::new(["a"]),
            vec![RelationRecord::new(vec![123.456_789_012_3, -0.1])],
        )
        .unwrap();
        let table = to_training_table(&ds).unwrap();
        assert_eq!(table.inputs().get(0, 0), 123.456_789_012_3_f64 as f32);
        assert_eq!(table.outputs().get(0, 0), -0.1_f64 as f32);
    }

    #[test]
    fn test_target_only_dataset() {
        let ds = Dataset::new(
            AttributeSet::default(),
            vec![RelationRecord::new(vec![2.0]), RelationRecord::new(vec![3.0])],
        )
        .unwrap();
        let table = to_training_table(&ds).unwrap();
        assert_eq!(table.inputs().rows(), 2);
        assert_eq!(table.inputs().cols(), 0);
        assert_eq!(table.outputs().as_slice(), &[2.0, 3.0]);
    }

    #[test]
    fn test_relation_matrix_keeps_full_records() {
        let m = to_relation_matrix(&xor());
        assert_eq!(m.rows(), 4);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.row(1), &[0.0, 1.0, 1.0]);
    }
}
