// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn framework code lives in model.rs and network.rs.
// The scorer and orchestrator only see the TrainableModel
// trait from the domain layer, so they are testable with stub
// models and no tensors at all.
//
//   model.rs        — Mlp architecture, hidden layer parsing
//
//   network.rs      — BurnNetwork: the TrainableModel backend
//                     (SGD passes, raw prediction, checkpoints)
//
//   scorer.rs       — L1 score of raw predictions vs targets
//
//   orchestrator.rs — the train / score / checkpoint loop
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Feed-forward network architecture
pub mod model;

/// Burn-backed TrainableModel
pub mod network;

/// Training loop with checkpoint-on-improvement
pub mod orchestrator;

/// Absolute-error scoring
pub mod scorer;
