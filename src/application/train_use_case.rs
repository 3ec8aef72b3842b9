// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the relation file        (Layer 4 - data)
//   Step 2: Transcode to matrices         (Layer 4 - data)
//   Step 3: Build the network             (Layer 5 - ml)
//   Step 4: Save config for evaluation    (Layer 6 - infra)
//   Step 5: Run the training loop         (Layer 5 - ml)
//
// Reference: Burn Book §5 (Training)

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{parser, transcoder};
use crate::infra::{checkpoint::CheckpointManager, metrics::MetricsLogger};
use crate::domain::traits::TrainableModel;
use crate::ml::{
    model::HiddenLayers,
    network::{BurnNetwork, CpuBackend, PassConfig},
    orchestrator::{EarlyStop, OrchestratorConfig, TrainingOrchestrator, TrainingReport},
};

// ─── Training Configuration ──────────────────────────────────────────────────
// All parameters for a training run.
// Serialisable so it can be saved next to the checkpoint and
// reloaded by `evaluate` to rebuild the same network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub input:           String,
    pub network:         String,
    pub learn_rate:      f64,
    pub iterations:      usize,
    pub output:          String,
    pub epochs_per_pass: usize,
    pub early_stop:      EarlyStop,
    pub metrics_csv:     Option<String>,
    /// Full topology `[inputs, hidden..., outputs]`, filled in once the
    /// training data has been read.
    #[serde(default)]
    pub layer_sizes:     Vec<usize>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            input:           "data/train.arff".to_string(),
            network:         "8".to_string(),
            learn_rate:      0.1,
            iterations:      100,
            output:          "models/mlp".to_string(),
            epochs_per_pass: 100,
            early_stop:      EarlyStop::LogOnly,
            metrics_csv:     None,
            layer_sizes:     Vec::new(),
        }
    }
}

impl TrainConfig {
    pub fn pass_config(&self) -> PassConfig {
        PassConfig {
            learning_rate:   self.learn_rate,
            epochs_per_pass: self.epochs_per_pass,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<TrainingReport> {
        let cfg = &self.config;

        // ── Step 1: Load the relation file ───────────────────────────────────
        tracing::info!("Loading training data from '{}'", cfg.input);
        let dataset = parser::load(&cfg.input)
            .with_context(|| format!("Cannot load training data '{}'", cfg.input))?;
        if dataset.is_empty() {
            bail!("'{}' has no data rows", cfg.input);
        }
        tracing::info!(
            "Loaded {} records with {} attributes {:?}",
            dataset.len(),
            dataset.attribute_count(),
            dataset.attributes().names()
        );

        // ── Step 2: Transcode into input / output matrices ────────────────────
        // The Dataset is not needed after this point.
        let table = transcoder::to_training_table(&dataset)?;
        drop(dataset);

        // ── Step 3: Build the network ─────────────────────────────────────────
        let hidden: HiddenLayers = cfg
            .network
            .parse()
            .with_context(|| format!("Invalid network '{}'", cfg.network))?;
        tracing::info!("Setup the network: hidden layers {:?}", hidden.widths());
        let layer_sizes = hidden.layer_sizes(table.inputs().cols(), table.outputs().cols());
        let network = BurnNetwork::<CpuBackend>::new(
            layer_sizes.clone(),
            cfg.pass_config(),
            Default::default(),
        )
        .context("Cannot build network")?;

        // ── Step 4: Save config (with the resolved topology) for evaluation ──
        let checkpoint = CheckpointManager::new(&cfg.output)?;
        checkpoint.save_config(&TrainConfig {
            layer_sizes,
            ..cfg.clone()
        })?;

        // ── Step 5: Run the training loop (Layer 5) ───────────────────────────
        let loop_cfg = OrchestratorConfig {
            iterations: cfg.iterations,
            early_stop: cfg.early_stop,
        };
        let mut orchestrator = TrainingOrchestrator::new(network, table, loop_cfg, checkpoint);
        if let Some(csv) = &cfg.metrics_csv {
            let metrics = MetricsLogger::new(csv)?;
            tracing::info!("Appending metrics to '{}'", metrics.csv_path().display());
            orchestrator = orchestrator.with_metrics(metrics);
        }

        let report = orchestrator.run().context("Training run failed")?;
        tracing::info!(
            "Training complete ({:?}): layers {:?}, best score {:.6} after {} iterations ({} checkpoints)",
            orchestrator.state(),
            orchestrator.model().layer_sizes(),
            report.best_score,
            report.iterations_run,
            report.checkpoints.len()
        );
        Ok(report)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::writer;
    use crate::domain::matrix::Matrix;

    #[test]
    fn test_train_end_to_end_on_xor() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("xor.arff");
        let data = Matrix::from_rows(&[
            vec![0.0, 0.0, 0.0],
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.0, 1.0],
            vec![1.0, 1.0, 0.0],
        ])
        .unwrap();
        writer::save(&input, "xor", "xor fixture", &data).unwrap();

        let cfg = TrainConfig {
            input:           input.display().to_string(),
            network:         "4".to_string(),
            learn_rate:      0.1,
            iterations:      5,
            output:          dir.path().join("out/xor").display().to_string(),
            epochs_per_pass: 10,
            early_stop:      EarlyStop::LogOnly,
            metrics_csv:     Some(dir.path().join("metrics.csv").display().to_string()),
            layer_sizes:     Vec::new(),
        };
        let report = TrainUseCase::new(cfg).execute().unwrap();

        assert!(report.initial_score.is_finite());
        assert!(report.best_score <= report.initial_score);
        assert_eq!(report.iterations_run, 5);
        assert!(dir.path().join("metrics.csv").exists());

        let saved = CheckpointManager::open(dir.path().join("out/xor"))
            .load_config()
            .unwrap();
        assert_eq!(saved.layer_sizes, vec![2, 4, 1]);
    }

    #[test]
    fn test_relation_without_rows_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.arff");
        std::fs::write(&input, "@ATTRIBUTE a REAL\n@DATA\n").unwrap();
        let cfg = TrainConfig {
            input: input.display().to_string(),
            output: dir.path().join("model").display().to_string(),
            ..TrainConfig::default()
        };
        let err = TrainUseCase::new(cfg).execute().unwrap_err();
        assert!(err.to_string().contains("no data rows"));
    }

    #[test]
    fn test_missing_input_fails() {
        let cfg = TrainConfig {
            input: "/no/such/file.arff".to_string(),
            ..TrainConfig::default()
        };
        assert!(TrainUseCase::new(cfg).execute().is_err());
    }
}
