// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a relation file on disk and the numeric
// matrices handed to the network:
//
//   relation file (.arff)
//       │
//       ▼
//   parser       → validated Dataset (attributes + records)
//       │
//       ▼
//   transcoder   → TrainingTable (f32 inputs, f32 outputs)
//
// and back again:
//
//   Matrix<f64>  → writer → relation file (.arff)
//
// Each module is responsible for exactly one step.
//
// Reference: Rust Book §7 (Modules)

/// Reads relation files into a Dataset
pub mod parser;

/// Splits a Dataset into input and output matrices
pub mod transcoder;

/// Writes a matrix back out as a relation file
pub mod writer;
