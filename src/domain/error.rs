// ============================================================
// Layer 3 — Domain Errors
// ============================================================
// Every failure the modeling pipeline can raise. None of them
// are retried: the run is an offline batch job, so each one
// surfaces to main() and halts the program.
//
// The application and CLI layers work in anyhow::Result;
// CharModelError implements std::error::Error (via thiserror)
// so `?` converts it automatically at that boundary.
//
// Reference: Rust Book §9 (Recoverable Errors with Result)

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CharModelError {
    /// No usable text was left after cleaning the corpus
    #[error("corpus is empty after preprocessing")]
    EmptyCorpus,

    /// A character that the vocabulary was not built from
    #[error("unknown symbol {0:?}: not in the vocabulary")]
    UnknownSymbol(char),

    /// An index outside `0..vocab_size` was handed to a predictor or decoder
    #[error("unknown symbol index {index}: vocabulary has {vocab_size} symbols")]
    UnknownIndex { index: usize, vocab_size: usize },

    /// A model produced a NaN or infinite value
    #[error("numeric instability during {stage}: model produced a non-finite value")]
    NumericInstability { stage: &'static str },

    /// A window whose length differs from the configured seq_len
    #[error("window length mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    /// Seeding generation needs at least one training window
    #[error("dataset has no windows: corpus must be longer than seq_len")]
    EmptyDataset,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading a tensor back from the backend failed
    #[error("tensor backend error: {0}")]
    Backend(String),

    /// Progress output could not be written
    #[error("output error: {0}")]
    Output(String),
}

impl From<std::io::Error> for CharModelError {
    fn from(e: std::io::Error) -> Self {
        CharModelError::Output(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CharModelError>;

/// Fail with `NumericInstability` if any value is NaN or infinite.
pub fn ensure_finite<I>(values: I, stage: &'static str) -> Result<()>
where
    I: IntoIterator<Item = f64>,
{
    if values.into_iter().all(f64::is_finite) {
        Ok(())
    } else {
        Err(CharModelError::NumericInstability { stage })
    }
}
