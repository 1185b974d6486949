// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to get something done:
// compare the three models, or inspect a corpus.
//
// Rules for this layer:
//   - No ML math or model code here
//   - No printing here (that's Layer 1)
//   - No direct file access (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Per-model train → seed → generate cycle
pub mod train_generate;

// The full comparison workflow
pub mod compare_use_case;

// Corpus statistics without training
pub mod inspect_use_case;
