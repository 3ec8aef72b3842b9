// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records the score of every training iteration to a CSV file.
//
// Metrics recorded per iteration:
//   - iteration:  0-based index of the incremental pass
//   - score:      L1 score after that pass
//   - best_score: best score so far (including this one)
//   - improved:   whether this pass produced a checkpoint
//
// Example CSV output:
//   iteration,score,best_score,improved
//   0,1.873412,1.873412,true
//   1,1.901220,1.873412,false
//
// Reference: Rust Book §12 (I/O and File Handling)

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::error::{Result, TrainerError};

const HEADER: &str = "iteration,score,best_score,improved";

/// One row of metrics for a single iteration
#[derive(Debug, Clone, PartialEq)]
pub struct IterationMetrics {
    pub iteration: usize,
    pub score: f64,
    pub best_score: f64,
    pub improved: bool,
}

impl IterationMetrics {
    pub fn new(iteration: usize, score: f64, best_score: f64, improved: bool) -> Self {
        Self {
            iteration,
            score,
            best_score,
            improved,
        }
    }
}

/// Appends iteration metrics to a CSV file.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a logger writing to `csv_path`.
    /// The header is written only if the file does not exist yet,
    /// so several runs can append to one log.
    pub fn new(csv_path: impl Into<PathBuf>) -> Result<Self> {
        let csv_path = csv_path.into();

        if let Some(dir) = csv_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(TrainerError::io(dir))?;
        }

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path).map_err(TrainerError::io(&csv_path))?;
            writeln!(f, "{HEADER}").map_err(TrainerError::io(&csv_path))?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one iteration's metrics as a new row.
    pub fn log(&self, m: &IterationMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .map_err(TrainerError::io(&self.csv_path))?;

        writeln!(
            f,
            "{},{:.6},{:.6},{}",
            m.iteration, m.score, m.best_score, m.improved
        )
        .map_err(TrainerError::io(&self.csv_path))?;
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
