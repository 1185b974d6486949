// ============================================================
// Layer 4 — Window Batcher
// ============================================================
// Implements Burn's Batcher trait to turn a Vec<WindowSample>
// into tensors the predictors can consume.
//
// How batching works here:
//   Input:  Vec of N WindowSamples, each window of length S
//   Output: WindowBatch { windows: [N, S] Int, labels: [N] Int }
//
//   All windows in a dataset share the same length, so the
//   flatten-then-reshape trick needs no padding:
//   [w1_c1, w1_c2, ..., w1_cS, w2_c1, ..., wN_cS] → [N, S]
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::domain::window::WindowSample;

// ─── WindowBatch ──────────────────────────────────────────────────────────────
/// A batch of windows ready for a forward pass.
#[derive(Debug, Clone)]
pub struct WindowBatch<B: Backend> {
    /// Symbol indices — shape: [batch_size, seq_len]
    pub windows: Tensor<B, 2, Int>,

    /// Index of the character after each window — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

// ─── WindowBatcher ────────────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct WindowBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> WindowBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    /// Build a [1, seq_len] tensor for a single window
    pub fn single(&self, window: &[usize]) -> Tensor<B, 2, Int> {
        let flat: Vec<i32> = window.iter().map(|&x| x as i32).collect();
        Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([1, window.len()])
    }
}

impl<B: Backend> Batcher<WindowSample, WindowBatch<B>> for WindowBatcher<B> {
    fn batch(&self, items: Vec<WindowSample>) -> WindowBatch<B> {
        let batch_size = items.len();
        let seq_len    = items[0].input.len();

        // Vec<Vec<usize>> → Vec<i32> (Burn Int tensors are built from i32 here)
        let window_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.input.iter().map(|&x| x as i32))
            .collect();

        let labels: Vec<i32> = items
            .iter()
            .map(|s| s.label as i32)
            .collect();

        let windows = Tensor::<B, 1, Int>::from_ints(
            window_flat.as_slice(), &self.device
        ).reshape([batch_size, seq_len]);

        let labels = Tensor::<B, 1, Int>::from_ints(
            labels.as_slice(), &self.device
        );

        WindowBatch { windows, labels }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    fn sample(input: &[usize], label: usize) -> WindowSample {
        WindowSample { input: input.to_vec(), label }
    }

    #[test]
    fn test_batch_shapes_and_values() {
        let batcher = WindowBatcher::<TestBackend>::new(Default::default());
        let batch   = batcher.batch(vec![
            sample(&[0, 1, 2], 3),
            sample(&[1, 2, 3], 0),
        ]);

        assert_eq!(batch.windows.dims(), [2, 3]);
        assert_eq!(batch.labels.dims(), [2]);

        let windows: Vec<i64> = batch.windows.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(windows, vec![0, 1, 2, 1, 2, 3]);
        let labels: Vec<i64> = batch.labels.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(labels, vec![3, 0]);
    }

    #[test]
    fn test_single_window() {
        let batcher = WindowBatcher::<TestBackend>::new(Default::default());
        let t       = batcher.single(&[4, 2, 7, 1]);
        assert_eq!(t.dims(), [1, 4]);
    }
}
