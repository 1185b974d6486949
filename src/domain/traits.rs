// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams between layers:
//
//   CorpusSource      — where the training text comes from
//                       (TextFileLoader in the data layer)
//   SequencePredictor — the next-symbol contract shared by the
//                       RNN, GRU and transformer predictors in
//                       the ml layer
//   GenerationSink    — where progress and generated characters
//                       go (ConsoleSink in the CLI layer)
//
// The comparison loop in the application layer only ever sees
// these traits, so the same loop drives all three models and
// can be tested with a fake predictor and a recording sink.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Trait Objects)

use anyhow::Result;
use std::io;

use crate::domain::window::WindowDataset;
use crate::domain::error;
use crate::domain::generation::IterationReport;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can produce the cleaned corpus string.
pub trait CorpusSource {
    fn load_corpus(&self) -> Result<String>;
}

// ─── SequencePredictor ────────────────────────────────────────────────────────
/// A trainable model mapping a window of `seq_len` symbol indices
/// to a probability distribution over the next symbol.
///
/// Implementations own their parameters exclusively; only
/// `train_one_pass` mutates them.
pub trait SequencePredictor {
    /// Display name used in banners and loss reports
    fn name(&self) -> &str;

    /// Window length fixed at construction
    fn seq_len(&self) -> usize;

    fn vocab_size(&self) -> usize;

    /// One full sweep over `dataset`; returns the mean loss of the sweep.
    fn train_one_pass(&mut self, dataset: &WindowDataset) -> error::Result<f64>;

    /// Distribution of length `vocab_size`, non-negative, summing to 1.
    fn predict_next(&self, window: &[usize]) -> error::Result<Vec<f32>>;
}

// ─── GenerationSink ───────────────────────────────────────────────────────────
/// Receives progress from the train/generate loop as it happens.
/// Every method defaults to doing nothing. A write error aborts
/// the run like any other error.
pub trait GenerationSink {
    fn iteration_started(&mut self, _model: &str, _iteration: usize) -> io::Result<()> {
        Ok(())
    }

    fn seeded(&mut self, _seed: &str) -> io::Result<()> {
        Ok(())
    }

    /// Called once per generated character, in order
    fn symbol(&mut self, _c: char) -> io::Result<()> {
        Ok(())
    }

    fn iteration_finished(&mut self, _report: &IterationReport) -> io::Result<()> {
        Ok(())
    }
}

/// A sink that discards everything
pub struct NullSink;

impl GenerationSink for NullSink {}
