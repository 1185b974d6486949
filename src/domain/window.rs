// ============================================================
// Layer 3 — Sliding-Window Dataset
// ============================================================
// Slides a window of `seq_len` characters across the corpus,
// `step` characters at a time. Each window becomes one sample
// whose label is the character right after it.
//
// Example with seq_len=3, step=2, corpus "abcdefg":
//   offset 0: "abc" → 'd'
//   offset 2: "cde" → 'f'
//   count = floor((7 - 3) / 2) = 2
//
// Samples are produced left to right and never shuffled, so
// neighbouring samples overlap by seq_len - step characters.
//
// The sample Vec sits behind an Arc: the same dataset is handed
// to all three predictors, and Burn's DataLoader wants to own
// its dataset, so cloning must be cheap. The Burn Dataset impl
// lives in the data layer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::error::{CharModelError, Result};
use crate::domain::vocabulary::Vocabulary;

/// One training pair: a window of indices and the index that follows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSample {
    pub input: Vec<usize>,
    pub label: usize,
}

#[derive(Debug, Clone)]
pub struct WindowDataset {
    samples: Arc<Vec<WindowSample>>,
    seq_len: usize,
    step:    usize,
}

impl WindowDataset {
    /// Build every (window, next-char) pair from `corpus`.
    ///
    /// # Errors
    /// - `InvalidConfig` when `seq_len` or `step` is zero
    /// - `UnknownSymbol` when the corpus holds a character the
    ///   vocabulary was not built from
    pub fn build(
        corpus:  &str,
        vocab:   &Vocabulary,
        seq_len: usize,
        step:    usize,
    ) -> Result<Self> {
        if seq_len == 0 {
            return Err(CharModelError::InvalidConfig("seq_len must be at least 1".into()));
        }
        if step == 0 {
            return Err(CharModelError::InvalidConfig("step must be at least 1".into()));
        }

        let indices = vocab.encode(corpus)?;
        let count   = indices.len().saturating_sub(seq_len) / step;

        let samples: Vec<WindowSample> = (0..count)
            .map(|i| {
                let offset = i * step;
                WindowSample {
                    input: indices[offset..offset + seq_len].to_vec(),
                    label: indices[offset + seq_len],
                }
            })
            .collect();

        tracing::debug!(
            "Built {} windows (seq_len={}, step={}) from {} chars",
            samples.len(),
            seq_len,
            step,
            indices.len()
        );

        Ok(Self {
            samples: Arc::new(samples),
            seq_len,
            step,
        })
    }

    pub fn seq_len(&self) -> usize {
        self.seq_len
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Number of windows
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[WindowSample] {
        &self.samples
    }

    /// All input windows, in corpus order
    pub fn inputs(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.samples.iter().map(|s| s.input.as_slice())
    }

    /// All labels, in corpus order
    pub fn labels(&self) -> impl Iterator<Item = usize> + '_ {
        self.samples.iter().map(|s| s.label)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn build(corpus: &str, seq_len: usize, step: usize) -> (Vocabulary, WindowDataset) {
        let vocab = Vocabulary::from_corpus(corpus).unwrap();
        let ds    = WindowDataset::build(corpus, &vocab, seq_len, step).unwrap();
        (vocab, ds)
    }

    #[test]
    fn test_first_two_windows_of_small_corpus() {
        let (vocab, ds) = build("ab ab ab ab", 2, 1);

        let first = &ds.samples()[0];
        assert_eq!(vocab.decode(&first.input).unwrap(), "ab");
        assert_eq!(vocab.char_at(first.label).unwrap(), ' ');

        let second = &ds.samples()[1];
        assert_eq!(vocab.decode(&second.input).unwrap(), "b ");
        assert_eq!(vocab.char_at(second.label).unwrap(), 'a');
    }

    #[test]
    fn test_count_matches_floor_formula() {
        let corpus = "the quick brown fox jumps over the lazy dog";
        for seq_len in 1..6 {
            for step in 1..5 {
                let (_, ds) = build(corpus, seq_len, step);
                let expected = (corpus.len() - seq_len) / step;
                assert_eq!(ds.len(), expected, "seq_len={seq_len} step={step}");
                assert_eq!(ds.inputs().count(), ds.labels().count());
            }
        }
    }

    #[test]
    fn test_label_follows_window() {
        let corpus      = "curiouser and curiouser";
        let (vocab, ds) = build(corpus, 4, 3);
        let chars: Vec<char> = corpus.chars().collect();

        for (i, sample) in ds.samples().iter().enumerate() {
            let offset = i * 3;
            assert_eq!(sample.input.len(), 4);
            assert_eq!(vocab.char_at(sample.label).unwrap(), chars[offset + 4]);
            assert_eq!(
                vocab.decode(&sample.input).unwrap(),
                chars[offset..offset + 4].iter().collect::<String>()
            );
        }
    }

    #[test]
    fn test_neighbours_overlap() {
        let (_, ds) = build("abcdefghij", 4, 1);
        let a = &ds.samples()[0].input;
        let b = &ds.samples()[1].input;
        assert_eq!(a[1..], b[..3]);
    }

    #[test]
    fn test_short_corpus_gives_empty_dataset() {
        let (_, ds) = build("abc", 3, 1);
        assert!(ds.is_empty());
        let (_, ds) = build("ab", 5, 1);
        assert!(ds.is_empty());
    }

    #[test]
    fn test_zero_seq_len_or_step_is_rejected() {
        let vocab = Vocabulary::from_corpus("abc").unwrap();
        assert!(matches!(
            WindowDataset::build("abc", &vocab, 0, 1),
            Err(CharModelError::InvalidConfig(_))
        ));
        assert!(matches!(
            WindowDataset::build("abc", &vocab, 1, 0),
            Err(CharModelError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_foreign_corpus_symbol_is_rejected() {
        let vocab = Vocabulary::from_corpus("abc").unwrap();
        assert_eq!(
            WindowDataset::build("abcz", &vocab, 2, 1).unwrap_err(),
            CharModelError::UnknownSymbol('z')
        );
    }

    #[test]
    fn test_clone_shares_samples() {
        let (_, ds) = build("hello world", 3, 1);
        let copy    = ds.clone();
        assert!(Arc::ptr_eq(&ds.samples, &copy.samples));
    }
}
