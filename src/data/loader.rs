// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Reads the training text file and runs it through the
// Preprocessor. Implements the CorpusSource trait from
// Layer 3 so the application layer never touches the file
// system itself.
//
// A missing file, or a file with nothing left after cleaning,
// aborts the run.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (Reading a File)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::data::preprocessor::Preprocessor;
use crate::domain::error::CharModelError;
use crate::domain::traits::CorpusSource;

/// Loads one plain-text corpus file
pub struct TextFileLoader {
    path: PathBuf,
}

impl TextFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CorpusSource for TextFileLoader {
    fn load_corpus(&self) -> Result<String> {
        let raw = fs::read(&self.path)
            .with_context(|| format!("Cannot read corpus '{}'", self.path.display()))?;

        let corpus = Preprocessor::new().clean(&raw);
        if corpus.is_empty() {
            return Err(CharModelError::EmptyCorpus)
                .with_context(|| format!("'{}' has no usable text", self.path.display()));
        }

        tracing::info!(
            "Loaded corpus '{}' ({} bytes → {} chars)",
            self.path.display(),
            raw.len(),
            corpus.len()
        );
        Ok(corpus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_loads_and_cleans_file() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "Alice's Adventures").unwrap();
        writeln!(f).unwrap();
        writeln!(f, "  in WONDERLAND  ").unwrap();

        let corpus = TextFileLoader::new(f.path()).load_corpus().unwrap();
        assert_eq!(corpus, "alice's adventures in wonderland");
    }

    #[test]
    fn test_blank_file_is_empty_corpus() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "   \n\n").unwrap();

        let err = TextFileLoader::new(f.path()).load_corpus().unwrap_err();
        assert_eq!(
            err.downcast_ref::<CharModelError>(),
            Some(&CharModelError::EmptyCorpus)
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let loader = TextFileLoader::new("/definitely/not/here.txt");
        assert!(loader.load_corpus().is_err());
    }
}
