// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Concerns that sit outside the comparison itself:
//
//   metrics.rs — LossLogger
//                Writes every model's loss history to a CSV
//                file and a JSON run report so the curves can
//                be plotted after the run.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Loss history CSV / JSON writer
pub mod metrics;
