// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits that define the core concepts:
// the loaded relation (attributes + records), the numeric
// matrices handed to the network, the error taxonomy, and the
// capability interface a trainable network must provide.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Attribute names, records and the validated Dataset
pub mod dataset;

// Error taxonomy shared by every layer below the CLI
pub mod error;

// Row-major matrix and the derived TrainingTable
pub mod matrix;

// Core abstractions (traits) that other layers implement
pub mod traits;
