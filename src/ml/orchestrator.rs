// ============================================================
// Layer 5 — Training Orchestrator
// ============================================================
// Drives a TrainableModel through the score/checkpoint loop:
//
//   Initializing   train(Full), score → baseline best score
//        │
//        ▼
//   Training       train(Incremental), score
//        │
//        ├── score <  best → Improved:      checkpoint, best = score
//        └── score >= best → NoImprovement: nothing
//        │
//        ▼
//   ... repeated `iterations` times ...
//        │
//        ▼
//   Terminated
//
// Ties are not improvements. Once the best score drops below
// LOW_SCORE_THRESHOLD the run either just logs it (LogOnly) or
// stops (Break), depending on EarlyStop.
//
// Any error from training, scoring, checkpointing or metrics
// aborts the run; checkpoints already written stay on disk.

use serde::{Deserialize, Serialize};

use crate::domain::error::Result;
use crate::domain::matrix::TrainingTable;
use crate::domain::traits::{TrainMode, TrainableModel};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{IterationMetrics, MetricsLogger};
use crate::ml::scorer;

/// Best score below which the run counts as converged.
pub const LOW_SCORE_THRESHOLD: f64 = 1e-4;

/// What to do once the best score falls below `LOW_SCORE_THRESHOLD`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarlyStop {
    /// Log the condition and keep iterating.
    #[default]
    LogOnly,
    /// Stop the loop right after the checkpoint that crossed the threshold.
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorConfig {
    pub iterations: usize,
    pub early_stop: EarlyStop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingState {
    Initializing,
    Training,
    Improved,
    NoImprovement,
    Terminated,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub initial_score: f64,
    pub best_score: f64,
    /// Incremental passes actually executed.
    pub iterations_run: usize,
    /// Iteration indices that wrote a checkpoint.
    pub checkpoints: Vec<usize>,
    pub stopped_early: bool,
}

struct ScoreHistory {
    best: f64,
    iteration: usize,
}

pub struct TrainingOrchestrator<M: TrainableModel> {
    model: M,
    table: TrainingTable,
    config: OrchestratorConfig,
    checkpoint: CheckpointManager,
    metrics: Option<MetricsLogger>,
    state: TrainingState,
}

impl<M: TrainableModel> TrainingOrchestrator<M> {
    pub fn new(
        model: M,
        table: TrainingTable,
        config: OrchestratorConfig,
        checkpoint: CheckpointManager,
    ) -> Self {
        Self {
            model,
            table,
            config,
            checkpoint,
            metrics: None,
            state: TrainingState::Initializing,
        }
    }

    /// Also append every iteration's score to a metrics CSV.
    pub fn with_metrics(mut self, metrics: MetricsLogger) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn state(&self) -> TrainingState {
        self.state
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the full loop. See the module header for the state machine.
    pub fn run(&mut self) -> Result<TrainingReport> {
        self.transition(TrainingState::Initializing);
        tracing::info!(
            "Initialize training: layers {:?}, {} rows",
            self.model.layer_sizes(),
            self.table.len()
        );
        self.model.train(&self.table, TrainMode::Full)?;

        let initial_score = scorer::score(&self.model, &self.table)?;
        tracing::info!("Initial score: {:.6}", initial_score);

        let mut history = ScoreHistory {
            best: initial_score,
            iteration: 0,
        };
        let mut checkpoints = Vec::new();
        let mut stopped_early = false;

        for i in 0..self.config.iterations {
            self.transition(TrainingState::Training);
            self.model.train(&self.table, TrainMode::Incremental)?;
            let current = scorer::score(&self.model, &self.table)?;
            history.iteration = i + 1;

            tracing::info!(
                "Iteration {}: {:.6} (mean {:.6})",
                i,
                current,
                scorer::mean_score(current, self.table.len())
            );

            let improved = current < history.best;
            if improved {
                self.transition(TrainingState::Improved);
                tracing::info!("Best result so far, saving");
                self.checkpoint.save_model(&self.model)?;
                history.best = current;
                checkpoints.push(i);
            } else {
                self.transition(TrainingState::NoImprovement);
            }

            if let Some(metrics) = &self.metrics {
                metrics.log(&IterationMetrics::new(i, current, history.best, improved))?;
            }

            if improved && history.best < LOW_SCORE_THRESHOLD {
                match self.config.early_stop {
                    EarlyStop::LogOnly => {
                        tracing::info!("Low score found ({:.3e})", history.best);
                    }
                    EarlyStop::Break => {
                        tracing::info!("Low score found ({:.3e}), terminating!", history.best);
                        stopped_early = true;
                        break;
                    }
                }
            }
        }

        self.transition(TrainingState::Terminated);
        if checkpoints.is_empty() {
            tracing::warn!(
                "No iteration beat the initial score; nothing written to '{}'",
                self.checkpoint.model_path().display()
            );
        }

        Ok(TrainingReport {
            initial_score,
            best_score: history.best,
            iterations_run: history.iteration,
            checkpoints,
            stopped_early,
        })
    }

    fn transition(&mut self, next: TrainingState) {
        tracing::debug!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::TrainerError;
    use crate::domain::matrix::Matrix;
    use std::cell::RefCell;
    use std::path::Path;

    /// Each training pass moves to the next scripted score; predictions
    /// are chosen so the L1 score against a zero target equals that score.
    struct ScriptedModel {
        sizes: Vec<usize>,
        scores: Vec<f64>,
        passes: Vec<TrainMode>,
        saved: RefCell<Vec<f64>>,
        fail_on_pass: Option<usize>,
    }

    impl ScriptedModel {
        fn new(scores: &[f64]) -> Self {
            Self {
                sizes: vec![1, 1],
                scores: scores.to_vec(),
                passes: Vec::new(),
                saved: RefCell::new(Vec::new()),
                fail_on_pass: None,
            }
        }

        fn current(&self) -> f64 {
            self.scores[self.passes.len() - 1]
        }
    }

    impl TrainableModel for ScriptedModel {
        fn layer_sizes(&self) -> &[usize] {
            &self.sizes
        }

        fn train(&mut self, _: &TrainingTable, mode: TrainMode) -> Result<()> {
            if self.fail_on_pass == Some(self.passes.len()) {
                return Err(TrainerError::Model("scripted failure".to_owned()));
            }
            self.passes.push(mode);
            Ok(())
        }

        fn predict_raw(&self, _: &Matrix<f32>) -> Result<Matrix<f32>> {
            Matrix::from_flat(vec![self.current() as f32], 1, 1)
        }

        fn serialize(&self, _: &Path) -> Result<()> {
            self.saved.borrow_mut().push(self.current());
            Ok(())
        }
    }

    fn table() -> TrainingTable {
        TrainingTable::new(Matrix::zeros(1, 1), Matrix::zeros(1, 1)).unwrap()
    }

    fn orchestrator(
        model: ScriptedModel,
        early_stop: EarlyStop,
        dir: &Path,
    ) -> TrainingOrchestrator<ScriptedModel> {
        let iterations = model.scores.len() - 1;
        TrainingOrchestrator::new(
            model,
            table(),
            OrchestratorConfig {
                iterations,
                early_stop,
            },
            CheckpointManager::new(dir.join("model")).unwrap(),
        )
    }

    #[test]
    fn test_checkpoints_only_on_strict_improvement() {
        let dir = tempfile::tempdir().unwrap();
        let model = ScriptedModel::new(&[5.0, 3.0, 3.0, 1.0, 4.0]);
        let mut orch = orchestrator(model, EarlyStop::LogOnly, dir.path());

        let report = orch.run().unwrap();

        assert_eq!(report.initial_score, 5.0);
        assert_eq!(report.best_score, 1.0);
        assert_eq!(report.iterations_run, 4);
        // iteration 0 → 3.0 saves, 1 → 3.0 tie, 2 → 1.0 saves, 3 → 4.0 worse
        assert_eq!(report.checkpoints, vec![0, 2]);
        assert!(!report.stopped_early);
        assert_eq!(*orch.model().saved.borrow(), vec![3.0, 1.0]);
        assert_eq!(orch.state(), TrainingState::Terminated);
    }

    #[test]
    fn test_first_pass_is_full_then_incremental() {
        let dir = tempfile::tempdir().unwrap();
        let model = ScriptedModel::new(&[2.0, 1.0, 0.5]);
        let mut orch = orchestrator(model, EarlyStop::LogOnly, dir.path());
        orch.run().unwrap();

        assert_eq!(
            orch.model().passes,
            vec![TrainMode::Full, TrainMode::Incremental, TrainMode::Incremental]
        );
    }

    #[test]
    fn test_no_improvement_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let model = ScriptedModel::new(&[1.0, 1.0, 2.0, 1.5]);
        let mut orch = orchestrator(model, EarlyStop::LogOnly, dir.path());

        let report = orch.run().unwrap();
        assert!(report.checkpoints.is_empty());
        assert_eq!(report.best_score, 1.0);
        assert!(orch.model().saved.borrow().is_empty());
    }

    #[test]
    fn test_log_only_keeps_iterating_below_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let model = ScriptedModel::new(&[1.0, 0.5, 5e-5, 1e-5, 1e-6]);
        let mut orch = orchestrator(model, EarlyStop::LogOnly, dir.path());

        let report = orch.run().unwrap();
        assert_eq!(report.iterations_run, 4);
        assert_eq!(report.checkpoints, vec![0, 1, 2, 3]);
        assert!(!report.stopped_early);
    }

    #[test]
    fn test_break_stops_once_below_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let model = ScriptedModel::new(&[1.0, 0.5, 5e-5, 1e-5, 1e-6]);
        let mut orch = orchestrator(model, EarlyStop::Break, dir.path());

        let report = orch.run().unwrap();
        assert_eq!(report.iterations_run, 2);
        assert_eq!(report.checkpoints, vec![0, 1]);
        assert!(report.stopped_early);
        assert!(report.best_score < LOW_SCORE_THRESHOLD);
    }

    #[test]
    fn test_model_error_aborts_but_keeps_earlier_checkpoints() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = ScriptedModel::new(&[3.0, 2.0, 1.0, 0.5]);
        model.fail_on_pass = Some(3);
        let mut orch = orchestrator(model, EarlyStop::LogOnly, dir.path());

        let err = orch.run().unwrap_err();
        assert!(matches!(err, TrainerError::Model(_)));
        assert_eq!(*orch.model().saved.borrow(), vec![2.0, 1.0]);
    }

    #[test]
    fn test_metrics_rows_follow_iterations() {
        let dir = tempfile::tempdir().unwrap();
        let metrics = MetricsLogger::new(dir.path().join("metrics.csv")).unwrap();
        let model = ScriptedModel::new(&[5.0, 3.0, 3.0, 1.0, 4.0]);
        let mut orch = orchestrator(model, EarlyStop::LogOnly, dir.path()).with_metrics(metrics);
        orch.run().unwrap();

        let text = std::fs::read_to_string(dir.path().join("metrics.csv")).unwrap();
        let improved: Vec<&str> = text
            .lines()
            .skip(1)
            .map(|l| l.rsplit(',').next().unwrap())
            .collect();
        assert_eq!(improved, vec!["true", "false", "true", "false"]);
    }
}
