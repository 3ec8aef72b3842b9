// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The orchestrator and scorer never touch weights directly.
// They drive any network through the TrainableModel trait:
//
//   - BurnNetwork  → the real backend (Layer 5, ml::network)
//   - test stubs   → scripted predictions for loop tests
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::path::Path;

use crate::domain::error::Result;
use crate::domain::matrix::{Matrix, TrainingTable};

/// How a training pass treats the existing weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainMode {
    /// Re-initialise the weights, then train.
    Full,
    /// Keep the current weights and keep training from there.
    Incremental,
}

// ─── TrainableModel ───────────────────────────────────────────────────────────
/// A network the orchestrator can train, score and checkpoint.
pub trait TrainableModel {
    /// Layer widths, input layer first and output layer last.
    fn layer_sizes(&self) -> &[usize];

    /// Run one training pass over the whole table.
    fn train(&mut self, table: &TrainingTable, mode: TrainMode) -> Result<()>;

    /// Batch prediction before any output squashing.
    /// Returns one row per input row, `layer_sizes().last()` columns.
    fn predict_raw(&self, inputs: &Matrix<f32>) -> Result<Matrix<f32>>;

    /// Write the model to `path`, replacing whatever was there.
    fn serialize(&self, path: &Path) -> Result<()>;
}
