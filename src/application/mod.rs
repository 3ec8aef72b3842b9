// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish a
// specific goal (training, evaluating, or converting).
//
// Rules for this layer:
//   - No ML math or tensor code here
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The training workflow
pub mod train_use_case;

// Score a saved checkpoint against a relation file
pub mod evaluate_use_case;

// Rewrite a relation file through the Dataset Writer
pub mod convert_use_case;
