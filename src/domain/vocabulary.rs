// ============================================================
// Layer 3 — Character Vocabulary
// ============================================================
// The bijection between corpus characters and dense integer
// indices 0..N-1. Built once from the full corpus and then
// shared read-only by the dataset builder, every predictor
// and the generation loop.
//
// Characters are sorted before numbering so the same corpus
// always produces the same indices (a HashSet would not).
//
// Example: "ab ab" → chars [' ', 'a', 'b']
//                    ' ' → 0, 'a' → 1, 'b' → 2
//
// Reference: Rust Book §8 (Hash Maps)

use std::collections::{BTreeSet, HashMap};

use crate::domain::error::{CharModelError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    /// Index → character. Position in this Vec is the index.
    chars: Vec<char>,
    /// Character → index. Exact inverse of `chars`.
    char_to_index: HashMap<char, usize>,
}

impl Vocabulary {
    /// Build the vocabulary from every distinct character in `corpus`.
    ///
    /// # Errors
    /// `EmptyCorpus` when the corpus has no characters, since a
    /// zero-sized vocabulary leaves every later layer undefined.
    pub fn from_corpus(corpus: &str) -> Result<Self> {
        let distinct: BTreeSet<char> = corpus.chars().collect();
        if distinct.is_empty() {
            return Err(CharModelError::EmptyCorpus);
        }

        let chars: Vec<char> = distinct.into_iter().collect();
        let char_to_index = chars
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, i))
            .collect();

        tracing::debug!("Built vocabulary of {} symbols", chars.len());
        Ok(Self { chars, char_to_index })
    }

    /// Number of distinct symbols
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// All symbols in index order
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn index_of(&self, c: char) -> Result<usize> {
        self.char_to_index
            .get(&c)
            .copied()
            .ok_or(CharModelError::UnknownSymbol(c))
    }

    pub fn char_at(&self, index: usize) -> Result<char> {
        self.chars
            .get(index)
            .copied()
            .ok_or(CharModelError::UnknownIndex {
                index,
                vocab_size: self.chars.len(),
            })
    }

    /// Map every character of `text` to its index
    pub fn encode(&self, text: &str) -> Result<Vec<usize>> {
        text.chars().map(|c| self.index_of(c)).collect()
    }

    /// Map indices back to a String
    pub fn decode(&self, indices: &[usize]) -> Result<String> {
        indices.iter().map(|&i| self.char_at(i)).collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_corpus_has_three_symbols() {
        let v = Vocabulary::from_corpus("ab ab ab ab").unwrap();
        assert_eq!(v.len(), 3);
        assert_eq!(v.chars(), &[' ', 'a', 'b']);
    }

    #[test]
    fn test_index_round_trip_for_every_corpus_symbol() {
        let corpus = "alice was beginning to get very tired of sitting by her sister";
        let v      = Vocabulary::from_corpus(corpus).unwrap();
        for c in corpus.chars() {
            let i = v.index_of(c).unwrap();
            assert_eq!(v.char_at(i).unwrap(), c);
        }
    }

    #[test]
    fn test_indices_are_dense() {
        let v = Vocabulary::from_corpus("zyx zyx!").unwrap();
        let mut seen: Vec<usize> = v.chars().iter().map(|&c| v.index_of(c).unwrap()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..v.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        assert_eq!(Vocabulary::from_corpus(""), Err(CharModelError::EmptyCorpus));
    }

    #[test]
    fn test_unknown_symbol_and_index() {
        let v = Vocabulary::from_corpus("abc").unwrap();
        assert_eq!(v.index_of('q'), Err(CharModelError::UnknownSymbol('q')));
        assert_eq!(
            v.char_at(3),
            Err(CharModelError::UnknownIndex { index: 3, vocab_size: 3 })
        );
    }

    #[test]
    fn test_encode_decode() {
        let v   = Vocabulary::from_corpus("hello world").unwrap();
        let ids = v.encode("low").unwrap();
        assert_eq!(v.decode(&ids).unwrap(), "low");
        assert!(v.encode("hex").is_err());
    }
}
