// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Loads and cleans a corpus without training anything, and
// reports what a comparison run would see: its length, its
// vocabulary and how many windows a given seq_len/step yields.

use anyhow::Result;
use serde::Serialize;

use crate::data::loader::TextFileLoader;
use crate::domain::window::WindowDataset;
use crate::domain::{traits::CorpusSource, vocabulary::Vocabulary};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusStats {
    pub chars:      usize,
    pub vocabulary: Vec<char>,
    pub seq_len:    usize,
    pub step:       usize,
    pub windows:    usize,
}

pub struct InspectUseCase {
    corpus_path: String,
    seq_len:     usize,
    step:        usize,
}

impl InspectUseCase {
    pub fn new(corpus_path: impl Into<String>, seq_len: usize, step: usize) -> Self {
        Self { corpus_path: corpus_path.into(), seq_len, step }
    }

    pub fn execute(&self) -> Result<CorpusStats> {
        let source = TextFileLoader::new(&self.corpus_path);
        self.inspect(&source)
    }

    fn inspect(&self, source: &dyn CorpusSource) -> Result<CorpusStats> {
        let corpus  = source.load_corpus()?;
        let vocab   = Vocabulary::from_corpus(&corpus)?;
        let dataset = WindowDataset::build(&corpus, &vocab, self.seq_len, self.step)?;

        Ok(CorpusStats {
            chars:      corpus.chars().count(),
            vocabulary: vocab.chars().to_vec(),
            seq_len:    self.seq_len,
            step:       self.step,
            windows:    dataset.len(),
        })
    }
}
