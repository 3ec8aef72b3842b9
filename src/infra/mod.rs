// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence used by the training loop:
//
//   checkpoint.rs — where the best model and the run
//                   configuration live on disk
//
//   metrics.rs    — per-iteration scores appended to a CSV
//                   file for later analysis and plotting
//
// Reference: Rust Book §7 (Modules)

/// Model checkpoint and config sidecar
pub mod checkpoint;

/// Per-iteration metrics CSV logger
pub mod metrics;
