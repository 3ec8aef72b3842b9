// ============================================================
// Layer 5 — BurnNetwork (TrainableModel backend)
// ============================================================
// Wraps the Burn Mlp so the orchestrator can drive it through
// the TrainableModel trait without seeing any tensors.
//
//   train(Full)        → re-initialise weights, then SGD
//   train(Incremental) → SGD from the current weights
//   predict_raw        → forward pass on the inner backend
//   serialize / load   → MessagePack + gzip checkpoint
//
// A training pass is `epochs_per_pass` full-batch SGD steps
// on mean squared error against the raw output.
//
// Key Burn insight:
//   - Training runs on an AutodiffBackend for gradients
//   - model.valid() returns the model on B::InnerBackend,
//     so prediction carries no autodiff overhead
//
// Reference: Burn Book §5 (Training, Records)

use std::path::Path;

use burn::{
    module::{AutodiffModule, Module},
    optim::{GradientsParams, Optimizer, SgdConfig},
    record::{FullPrecisionSettings, NamedMpkGzFileRecorder, Recorder},
    tensor::{
        backend::{AutodiffBackend, Backend},
        ElementConversion, Tensor,
    },
};

use crate::domain::error::{Result, TrainerError};
use crate::domain::matrix::{Matrix, TrainingTable};
use crate::domain::traits::{TrainMode, TrainableModel};
use crate::ml::model::{Mlp, MlpConfig};

/// CPU backend used by the CLI.
pub type CpuBackend = burn::backend::Autodiff<burn::backend::NdArray>;

/// Checkpoint format: named MessagePack, gzip'd, full precision.
pub type CheckpointRecorder = NamedMpkGzFileRecorder<FullPrecisionSettings>;

/// Optimisation settings shared by every training pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassConfig {
    pub learning_rate: f64,
    pub epochs_per_pass: usize,
}

pub struct BurnNetwork<B: AutodiffBackend> {
    model: Mlp<B>,
    config: MlpConfig,
    pass: PassConfig,
    device: B::Device,
}

impl<B: AutodiffBackend> BurnNetwork<B> {
    /// Build a freshly initialised network with the given layer sizes.
    pub fn new(layer_sizes: Vec<usize>, pass: PassConfig, device: B::Device) -> Result<Self> {
        if layer_sizes.len() < 2 {
            return Err(TrainerError::Config(format!(
                "a network needs at least an input and an output layer, got {layer_sizes:?}"
            )));
        }
        if layer_sizes.contains(&0) {
            return Err(TrainerError::Config(format!(
                "layer sizes must all be > 0, got {layer_sizes:?}"
            )));
        }
        if !(pass.learning_rate.is_finite() && pass.learning_rate > 0.0) {
            return Err(TrainerError::Config(format!(
                "learning rate must be finite and > 0, got {}",
                pass.learning_rate
            )));
        }
        if pass.epochs_per_pass == 0 {
            return Err(TrainerError::Config(
                "epochs per pass must be > 0".to_owned(),
            ));
        }

        let config = MlpConfig::new(layer_sizes);
        let model = config.init(&device);
        tracing::debug!("Initialised network with layer sizes {:?}", config.layer_sizes);

        Ok(Self {
            model,
            config,
            pass,
            device,
        })
    }

    /// Restore weights written by `serialize`. The topology must match.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let record = CheckpointRecorder::new()
            .load(path.to_path_buf(), &self.device)
            .map_err(|e| TrainerError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::other(e.to_string()),
            })?;
        self.model = self.model.clone().load_record(record);
        tracing::info!("Loaded network weights from '{}'", path.display());
        Ok(())
    }

    /// Batch prediction with the output squashed by tanh.
    pub fn predict(&self, inputs: &Matrix<f32>) -> Result<Matrix<f32>> {
        self.check_inputs(inputs)?;
        let model = self.model.valid();
        let output = model.predict(to_tensor::<B::InnerBackend>(inputs, &self.device));
        from_tensor(output)
    }

    fn check_inputs(&self, inputs: &Matrix<f32>) -> Result<()> {
        let expected = self.config.layer_sizes[0];
        if inputs.cols() != expected {
            return Err(TrainerError::Model(format!(
                "network expects {expected} inputs, table has {}",
                inputs.cols()
            )));
        }
        if inputs.rows() == 0 {
            return Err(TrainerError::Model("no rows to process".to_owned()));
        }
        Ok(())
    }
}

impl<B: AutodiffBackend> TrainableModel for BurnNetwork<B> {
    fn layer_sizes(&self) -> &[usize] {
        &self.config.layer_sizes
    }

    fn train(&mut self, table: &TrainingTable, mode: TrainMode) -> Result<()> {
        self.check_inputs(table.inputs())?;
        let expected_out = self.config.layer_sizes[self.config.layer_sizes.len() - 1];
        if table.outputs().cols() != expected_out {
            return Err(TrainerError::Model(format!(
                "network produces {expected_out} outputs, table has {}",
                table.outputs().cols()
            )));
        }

        if mode == TrainMode::Full {
            self.model = self.config.init(&self.device);
        }

        let inputs = to_tensor::<B>(table.inputs(), &self.device);
        let targets = to_tensor::<B>(table.outputs(), &self.device);

        // Plain SGD keeps no state, so a fresh optimiser per pass
        // continues exactly where the previous pass stopped.
        let mut optim = SgdConfig::new().init::<B, Mlp<B>>();
        let mut model = self.model.clone();
        let mut last_loss = f64::NAN;

        for epoch in 0..self.pass.epochs_per_pass {
            let output = model.forward(inputs.clone());
            let diff = output - targets.clone();
            let loss = (diff.clone() * diff).mean();

            if epoch + 1 == self.pass.epochs_per_pass {
                last_loss = loss.clone().into_scalar().elem::<f64>();
            }

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(self.pass.learning_rate, model, grads);
        }

        self.model = model;
        tracing::debug!(
            "{:?} pass: {} epochs, final mse={:.6}",
            mode,
            self.pass.epochs_per_pass,
            last_loss
        );
        Ok(())
    }

    fn predict_raw(&self, inputs: &Matrix<f32>) -> Result<Matrix<f32>> {
        self.check_inputs(inputs)?;
        let model = self.model.valid();
        let output = model.forward(to_tensor::<B::InnerBackend>(inputs, &self.device));
        from_tensor(output)
    }

    fn serialize(&self, path: &Path) -> Result<()> {
        CheckpointRecorder::new()
            .record(self.model.clone().into_record(), path.to_path_buf())
            .map_err(|e| TrainerError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::other(e.to_string()),
            })
    }
}

fn to_tensor<BK: Backend>(matrix: &Matrix<f32>, device: &BK::Device) -> Tensor<BK, 2> {
    Tensor::<BK, 1>::from_floats(matrix.as_slice(), device).reshape([matrix.rows(), matrix.cols()])
}

fn from_tensor<BK: Backend>(tensor: Tensor<BK, 2>) -> Result<Matrix<f32>> {
    let [rows, cols] = tensor.dims();
    let values = tensor
        .into_data()
        .to_vec::<f32>()
        .map_err(|e| TrainerError::Model(format!("cannot read network output: {e:?}")))?;
    Matrix::from_flat(values, rows, cols).map_err(|e| TrainerError::Model(e.to_string()))
}
