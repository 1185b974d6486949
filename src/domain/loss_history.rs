// ============================================================
// Layer 3 — LossHistory Domain Type
// ============================================================
// One model's training losses, one entry per outer iteration,
// in the order they were produced. The comparison loop owns
// and appends to it; nothing reads it until the run is over,
// when the metrics logger hands it to the plotting step.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossHistory {
    /// Display name of the model the losses belong to
    pub model: String,
    losses: Vec<f64>,
}

impl LossHistory {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model:  model.into(),
            losses: Vec::new(),
        }
    }

    pub fn record(&mut self, loss: f64) {
        self.losses.push(loss);
    }

    pub fn losses(&self) -> &[f64] {
        &self.losses
    }

    pub fn len(&self) -> usize {
        self.losses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.losses.is_empty()
    }

    /// Loss after the most recent iteration
    pub fn last(&self) -> Option<f64> {
        self.losses.last().copied()
    }

    /// Lowest loss seen over the whole run
    pub fn best(&self) -> Option<f64> {
        self.losses.iter().copied().reduce(f64::min)
    }
}
