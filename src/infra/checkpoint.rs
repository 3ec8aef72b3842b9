// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Owns the on-disk location of the best model.
//
// What gets saved:
//   1. Model weights — written through the model's own
//      serialize(); every improvement overwrites the last one
//   2. <output>.config.json — the TrainConfig of the run with
//      the full layer sizes, so `evaluate` can rebuild the same
//      topology before loading the weights into it
//
// File naming convention (output = "models/xor"):
//   models/
//     xor.mpk.gz         ← weights (the recorder adds the extension)
//     xor.config.json    ← run configuration
//
// Reference: Burn Book §5 (Records and Checkpointing)
//            Rust Book §9 (Error Handling)

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::application::train_use_case::TrainConfig;
use crate::domain::error::{Result, TrainerError};
use crate::domain::traits::TrainableModel;

pub struct CheckpointManager {
    /// Path handed to the model's serializer
    model_path: PathBuf,
}

impl CheckpointManager {
    /// Create a manager for `model_path`, creating its parent directory.
    pub fn new(model_path: impl Into<PathBuf>) -> Result<Self> {
        let model_path = model_path.into();
        if let Some(dir) = model_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(TrainerError::io(dir))?;
        }
        Ok(Self { model_path })
    }

    /// Refer to an existing checkpoint without touching the filesystem.
    pub fn open(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
        }
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Sidecar JSON holding the run configuration.
    pub fn config_path(&self) -> PathBuf {
        self.model_path.with_extension("config.json")
    }

    /// Overwrite the checkpoint with the current model.
    pub fn save_model<M: TrainableModel + ?Sized>(&self, model: &M) -> Result<()> {
        model.serialize(&self.model_path)?;
        tracing::debug!("Saved checkpoint to '{}'", self.model_path.display());
        Ok(())
    }

    /// Save the training configuration to JSON.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.config_path();
        let json = serde_json::to_string_pretty(cfg)
            .map_err(|e| TrainerError::Config(format!("cannot encode config: {e}")))?;
        fs::write(&path, json).map_err(TrainerError::io(&path))?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    /// Load the configuration written by `save_config`.
    pub fn load_config(&self) -> Result<TrainConfig> {
        let path = self.config_path();
        let json = fs::read_to_string(&path).map_err(TrainerError::io(&path))?;
        serde_json::from_str(&json).map_err(|e| {
            TrainerError::Config(format!("cannot decode '{}': {e}", path.display()))
        })
    }
}
