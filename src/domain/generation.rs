// ============================================================
// Layer 3 — Autoregressive Generation State
// ============================================================
// The rolling input window used while sampling from a model.
//
//   seed:   [t h e   c a t]        (copied from the dataset)
//   step 1: predict 's' → [h e   c a t s]
//   step 2: predict ' ' → [e   c a t s  ]
//
// The oldest index is dropped and the prediction appended,
// so the window length never changes.

use std::collections::VecDeque;

use crate::domain::error::{CharModelError, Result};

#[derive(Debug, Clone)]
pub struct GenerationState {
    window: VecDeque<usize>,
}

impl GenerationState {
    /// Start from a copy of one dataset window
    pub fn seed(window: &[usize]) -> Result<Self> {
        if window.is_empty() {
            return Err(CharModelError::ShapeMismatch { expected: 1, got: 0 });
        }
        Ok(Self { window: window.iter().copied().collect() })
    }

    /// Current window, oldest index first
    pub fn window(&self) -> Vec<usize> {
        self.window.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Drop the oldest index and append `next`
    pub fn slide(&mut self, next: usize) {
        self.window.pop_front();
        self.window.push_back(next);
    }
}

/// What one outer iteration produced for one model
#[derive(Debug, Clone, PartialEq)]
pub struct IterationReport {
    pub model:     String,
    pub iteration: usize,
    pub loss:      f64,
    /// The dataset window generation started from
    pub seed:      String,
    /// Exactly `preds_per_iteration` generated characters
    pub generated: String,
}

/// Index of the largest probability. Ties go to the lowest index;
/// an empty slice gives None.
pub fn argmax(probs: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &p) in probs.iter().enumerate() {
        match best {
            Some((_, b)) if p <= b => {}
            _ => best = Some((i, p)),
        }
    }
    best.map(|(i, _)| i)
}
