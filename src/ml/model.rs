// ============================================================
// Layer 5 — MLP Architecture (Burn)
// ============================================================
// A plain feed-forward network:
//
//   input ─► Linear ─► tanh ─► Linear ─► tanh ─► ... ─► Linear ─► raw output
//
// Hidden layers are squashed with tanh. The last layer stays
// linear: that raw output is what gets scored. `predict`
// applies the same tanh squash to the output layer.
//
// Topology comes from a comma-separated hidden layer list,
// e.g. "3,3" for two hidden layers of width 3. The input and
// output widths are taken from the training table, so "3,3"
// on a 2-input relation gives layer sizes [2, 3, 3, 1].
//
// Reference: Burn Book §3 (Building Blocks)

use std::str::FromStr;

use burn::{
    config::Config,
    module::Module,
    nn::{Linear, LinearConfig},
    tensor::{activation, backend::Backend, Tensor},
};

use crate::domain::error::TrainerError;

// ─── HiddenLayers ─────────────────────────────────────────────────────────────
/// Hidden layer widths parsed from a string like `"8,4"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HiddenLayers {
    widths: Vec<usize>,
}

impl HiddenLayers {
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Full layer sizes: `[inputs, hidden..., outputs]`.
    pub fn layer_sizes(&self, inputs: usize, outputs: usize) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.widths.len() + 2);
        sizes.push(inputs);
        sizes.extend_from_slice(&self.widths);
        sizes.push(outputs);
        sizes
    }
}

impl FromStr for HiddenLayers {
    type Err = TrainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::default());
        }

        let widths = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                match part.parse::<usize>() {
                    Ok(0) => Err(TrainerError::Config(format!(
                        "hidden layer width must be > 0 in '{s}'"
                    ))),
                    Ok(w) => Ok(w),
                    Err(e) => Err(TrainerError::Config(format!(
                        "invalid hidden layer width '{part}' in '{s}': {e}"
                    ))),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { widths })
    }
}

// ─── MlpConfig ────────────────────────────────────────────────────────────────
// #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct MlpConfig {
    /// Layer widths, input first, output last.
    pub layer_sizes: Vec<usize>,
}

impl MlpConfig {
    /// Fresh, randomly initialised network.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Mlp<B> {
        let layers = self
            .layer_sizes
            .windows(2)
            .map(|w| LinearConfig::new(w[0], w[1]).init(device))
            .collect();
        Mlp { layers }
    }
}

// ─── Mlp ──────────────────────────────────────────────────────────────────────
#[derive(Module, Debug)]
pub struct Mlp<B: Backend> {
    pub layers: Vec<Linear<B>>,
}

impl<B: Backend> Mlp<B> {
    /// [batch, inputs] → [batch, outputs], no squash on the output layer.
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let last = self.layers.len().saturating_sub(1);
        let mut x = input;
        for (i, layer) in self.layers.iter().enumerate() {
            x = layer.forward(x);
            if i < last {
                x = activation::tanh(x);
            }
        }
        x
    }

    /// Forward pass with the output layer squashed into (-1, 1).
    pub fn predict(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        activation::tanh(self.forward(input))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_hidden_layers_from_network_string() {
        let hidden: HiddenLayers = "3,3".parse().unwrap();
        assert_eq!(hidden.widths(), &[3, 3]);
        assert_eq!(hidden.layer_sizes(2, 1), vec![2, 3, 3, 1]);
    }

    #[test]
    fn test_hidden_layers_tolerates_spaces_and_empty() {
        let hidden: HiddenLayers = " 8, 4 ".parse().unwrap();
        assert_eq!(hidden.widths(), &[8, 4]);

        let none: HiddenLayers = "".parse().unwrap();
        assert_eq!(none.layer_sizes(5, 1), vec![5, 1]);
    }

    #[test]
    fn test_hidden_layers_rejects_bad_widths() {
        assert!(matches!(
            "3,x".parse::<HiddenLayers>(),
            Err(TrainerError::Config(_))
        ));
        assert!(matches!(
            "3,0".parse::<HiddenLayers>(),
            Err(TrainerError::Config(_))
        ));
        assert!("3,,3".parse::<HiddenLayers>().is_err());
    }

    #[test]
    fn test_forward_shape() {
        let device = <TestBackend as Backend>::Device::default();
        let model: Mlp<TestBackend> = MlpConfig::new(vec![2, 3, 3, 1]).init(&device);
        assert_eq!(model.layers.len(), 3);

        let input = Tensor::<TestBackend, 2>::from_floats([[0.0, 1.0], [1.0, 0.0]], &device);
        let output = model.forward(input.clone());
        assert_eq!(output.dims(), [2, 1]);

        let squashed: Vec<f32> = model.predict(input).into_data().to_vec().unwrap();
        assert!(squashed.iter().all(|v| v.abs() < 1.0));
    }
}
