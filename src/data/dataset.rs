// ============================================================
// Layer 4 — Burn Dataset Glue
// ============================================================
// Lets Burn's DataLoader read the domain WindowDataset
// directly: get(i) hands out a copy of sample i, in corpus
// order.
//
// Reference: Burn Book §4 (Datasets)

use burn::data::dataset::Dataset;

use crate::domain::window::{WindowDataset, WindowSample};

impl Dataset<WindowSample> for WindowDataset {
    fn get(&self, index: usize) -> Option<WindowSample> {
        self.samples().get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples().len()
    }
}
