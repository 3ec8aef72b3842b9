// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every failure the core can produce falls in one of four
// buckets. None of them are retried: they propagate up to the
// use case, which adds context with anyhow and aborts the run.
//
//   Io      — a file could not be opened, read or written
//   Format  — the relation file (or a matrix to be written)
//             does not have the expected structure
//   Model   — the network backend rejected a train/predict call
//   Config  — a network layout or training parameter is invalid

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Format error: {0}")]
    Format(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TrainerError>;

impl TrainerError {
    /// Build a `map_err` adapter that tags an `io::Error` with the file it concerns.
    pub fn io(path: &Path) -> impl FnOnce(std::io::Error) -> TrainerError + '_ {
        move |source| TrainerError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
