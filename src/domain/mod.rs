// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits describing what the system is
// about: characters, windows of indices, losses and the
// predictor contract.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Typed errors shared by every layer
pub mod error;

// Character ↔ index bijection
pub mod vocabulary;

// Sliding-window (input, label) samples
pub mod window;

// Rolling window, argmax and per-iteration report
pub mod generation;

// Per-model loss sequence
pub mod loss_history;

// Core abstractions (traits) that other layers implement
pub mod traits;
