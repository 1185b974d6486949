// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the raw text file to Burn tensor batches.
//
//   corpus .txt file
//       │
//       ▼
//   TextFileLoader    → reads the file bytes
//       │
//       ▼
//   Preprocessor      → lower-case, ASCII-only, blank lines
//       │               dropped, lines joined with spaces
//       ▼
//   Vocabulary        → (domain layer) char ↔ index
//       │
//       ▼
//   WindowDataset     → (domain layer) (window, next char)
//       │               pairs; Burn's Dataset impl lives here
//       ▼
//   WindowBatcher     → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader        → feeds batches to train_one_pass
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads the corpus file
pub mod loader;

/// Normalises raw bytes into the corpus string
pub mod preprocessor;

/// Burn Dataset impl for WindowDataset
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
