// ============================================================
// Layer 2 — EvaluateUseCase
// ============================================================
// Scores a saved checkpoint against a relation file:
//
//   Step 1: Read the run config next to the checkpoint
//   Step 2: Load and transcode the relation file
//   Step 3: Rebuild the trained topology and load its weights
//   Step 4: Score raw predictions against the targets
//
// The network is rebuilt from the layer sizes saved at training
// time, never from the width of the file being evaluated, so a
// file with the wrong number of attributes is a Model error.
// Nothing is created on disk.

use anyhow::{bail, Context, Result};

use crate::data::{parser, transcoder};
use crate::domain::matrix::Matrix;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::{
    network::{BurnNetwork, CpuBackend},
    scorer,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub rows:        usize,
    pub total:       f64,
    pub mean:        f64,
    /// tanh-squashed network output, one row per record
    pub predictions: Matrix<f32>,
}

pub struct EvaluateUseCase {
    checkpoint: CheckpointManager,
    input:      String,
}

impl EvaluateUseCase {
    pub fn new(checkpoint_path: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            checkpoint: CheckpointManager::open(checkpoint_path.into()),
            input:      input.into(),
        }
    }

    pub fn execute(&self) -> Result<Evaluation> {
        // ── Step 1: Run config ────────────────────────────────────────────────
        let cfg = self.checkpoint.load_config().with_context(|| {
            format!(
                "Cannot read run config for '{}'. Have you run 'train' first?",
                self.checkpoint.model_path().display()
            )
        })?;
        if cfg.layer_sizes.is_empty() {
            bail!(
                "Run config '{}' does not record the network layer sizes",
                self.checkpoint.config_path().display()
            );
        }

        // ── Step 2: Relation file ─────────────────────────────────────────────
        let dataset = parser::load(&self.input)
            .with_context(|| format!("Cannot load data '{}'", self.input))?;
        let table = transcoder::to_training_table(&dataset)?;
        if table.is_empty() {
            bail!("'{}' has no data rows", self.input);
        }

        // ── Step 3: Trained network ───────────────────────────────────────────
        let mut network = BurnNetwork::<CpuBackend>::new(
            cfg.layer_sizes.clone(),
            cfg.pass_config(),
            Default::default(),
        )?;
        network
            .load(self.checkpoint.model_path())
            .context("Cannot load checkpoint weights")?;

        // ── Step 4: Score ─────────────────────────────────────────────────────
        let total = scorer::score(&network, &table)?;
        let evaluation = Evaluation {
            rows: table.len(),
            total,
            mean: scorer::mean_score(total, table.len()),
            predictions: network.predict(table.inputs())?,
        };
        tracing::info!(
            "Evaluated {} rows: total={:.6} mean={:.6}",
            evaluation.rows,
            evaluation.total,
            evaluation.mean
        );
        Ok(evaluation)
    }
}
