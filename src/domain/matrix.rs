// ============================================================
// Layer 3 — Matrix and TrainingTable
// ============================================================
// Matrix<T> owns a flat buffer in row-major order:
//
//   index(row, col) = row * cols + col
//
// That arithmetic lives only here. Everything else goes
// through get / set / row, so the layout cannot drift.
//
// The row count is stored explicitly so a matrix with zero
// columns (a target-only relation has no inputs) still knows
// how many rows it has.

use crate::domain::error::{Result, TrainerError};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy + Default> Matrix<T> {
    /// A `rows x cols` matrix filled with `T::default()`.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::default(); rows * cols],
            rows,
            cols,
        }
    }

    /// Wrap a flat row-major buffer, checking it holds exactly `rows * cols` values.
    pub fn from_flat(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(TrainerError::Format(format!(
                "buffer of {} values cannot form a {rows}x{cols} matrix",
                data.len()
            )));
        }
        Ok(Self { data, rows, cols })
    }

    /// Copy per-row vectors into contiguous storage. All rows must share one length.
    #[cfg(test)]
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(TrainerError::Format(format!(
                    "row {i} has {} values, expected {cols}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Panics if `row >= rows` or `col >= cols`.
    #[cfg(test)]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[self.index(row, col)]
    }

    /// Panics if `row >= rows` or `col >= cols`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        let idx = self.index(row, col);
        self.data[idx] = value;
    }

    /// The `row`-th row as a slice of length `cols`.
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        assert!(row < self.rows, "row {row} out of bounds ({} rows)", self.rows);
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// The whole buffer in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.rows).map(move |r| self.row(r))
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }
}

/// Inputs and targets ready for the network: one row per record.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingTable {
    inputs: Matrix<f32>,
    outputs: Matrix<f32>,
}

impl TrainingTable {
    /// Pair an input matrix with its output matrix. Row counts must agree.
    pub fn new(inputs: Matrix<f32>, outputs: Matrix<f32>) -> Result<Self> {
        if inputs.rows() != outputs.rows() {
            return Err(TrainerError::Format(format!(
                "inputs have {} rows but outputs have {}",
                inputs.rows(),
                outputs.rows()
            )));
        }
        Ok(Self { inputs, outputs })
    }

    pub fn inputs(&self) -> &Matrix<f32> {
        &self.inputs
    }

    pub fn outputs(&self) -> &Matrix<f32> {
        &self.outputs
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.inputs.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.rows() == 0
    }
}
