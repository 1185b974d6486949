// ============================================================
// Layer 2 — CompareUseCase
// ============================================================
// Runs the full model comparison in order:
//
//   Step 1: Load and clean the corpus       (Layer 4 - data)
//   Step 2: Build the vocabulary            (Layer 3 - domain)
//   Step 3: Build the window dataset        (Layer 4 - data)
//   Step 4: For each selected model:
//             build the predictor           (Layer 5 - ml)
//             run the train/generate loop   (Layer 2)
//   Step 5: Write the loss histories        (Layer 6 - infra)
//
// Models run one after another. The vocabulary and dataset are
// built once and shared read-only; every model gets its own
// parameters and optimizer state.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::train_generate::{LoopOutcome, TrainGenerateLoop};
use crate::data::loader::TextFileLoader;
use crate::domain::window::WindowDataset;
use crate::domain::{
    loss_history::LossHistory,
    traits::{CorpusSource, GenerationSink},
    vocabulary::Vocabulary,
};
use crate::infra::metrics::LossLogger;
use crate::ml::predictor::{build_predictor, ModelKind, OptimizerKind, PredictorConfig};

// ─── Comparison Configuration ────────────────────────────────────────────────
// Every knob of a run. Serialised into the JSON report so a
// loss curve can always be traced back to its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonConfig {
    pub corpus_path:         String,
    pub output_dir:          String,
    pub models:              Vec<ModelKind>,
    pub seq_len:             usize,
    pub step:                usize,
    pub embed_dim:           usize,
    pub hidden_size:         usize,
    pub num_heads:           usize,
    pub ff_dim:              usize,
    pub dropout:             f64,
    pub batch_size:          usize,
    pub learning_rate:       f64,
    /// None → RMSprop for the recurrent models, Adam for the transformer
    pub optimizer:           Option<OptimizerKind>,
    pub iterations:          usize,
    pub preds_per_iteration: usize,
    pub seed:                u64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            corpus_path:         "corpus.txt".to_string(),
            output_dir:          "runs".to_string(),
            models:              ModelKind::ALL.to_vec(),
            seq_len:             10,
            step:                1,
            embed_dim:           64,
            hidden_size:         128,
            num_heads:           2,
            ff_dim:              128,
            dropout:             0.1,
            batch_size:          128,
            learning_rate:       1e-3,
            optimizer:           None,
            iterations:          25,
            preds_per_iteration: 100,
            seed:                42,
        }
    }
}

impl ComparisonConfig {
    fn predictor_config(&self, vocab_size: usize) -> PredictorConfig {
        PredictorConfig {
            vocab_size,
            seq_len:       self.seq_len,
            embed_dim:     self.embed_dim,
            hidden_size:   self.hidden_size,
            num_heads:     self.num_heads,
            ff_dim:        self.ff_dim,
            dropout:       self.dropout,
            batch_size:    self.batch_size,
            learning_rate: self.learning_rate,
            optimizer:     self.optimizer,
            seed:          self.seed,
        }
    }
}

/// What a finished comparison hands back to the CLI
#[derive(Debug, Clone)]
pub struct ComparisonSummary {
    pub vocab_size:   usize,
    pub corpus_chars: usize,
    pub windows:      usize,
    pub outcomes:     Vec<LoopOutcome>,
}

impl ComparisonSummary {
    pub fn histories(&self) -> Vec<LossHistory> {
        self.outcomes.iter().map(|o| o.history.clone()).collect()
    }
}

// ─── CompareUseCase ───────────────────────────────────────────────────────────
pub struct CompareUseCase {
    config: ComparisonConfig,
}

impl CompareUseCase {
    pub fn new(config: ComparisonConfig) -> Self {
        Self { config }
    }

    /// Execute the comparison end to end, streaming progress to `sink`
    pub fn execute(&self, sink: &mut dyn GenerationSink) -> Result<ComparisonSummary> {
        let cfg = &self.config;

        if cfg.models.is_empty() {
            anyhow::bail!("No models selected");
        }

        // ── Step 1: Load and clean the corpus ────────────────────────────────
        let corpus = TextFileLoader::new(&cfg.corpus_path).load_corpus()?;

        // ── Step 2: Vocabulary ────────────────────────────────────────────────
        let vocab = Vocabulary::from_corpus(&corpus)?;
        tracing::info!("Corpus: {} chars, {} distinct", corpus.len(), vocab.len());

        // ── Step 3: Window dataset ────────────────────────────────────────────
        let dataset = WindowDataset::build(&corpus, &vocab, cfg.seq_len, cfg.step)
            .context("Failed to build window dataset")?;
        tracing::info!("Dataset: {} windows of {} chars", dataset.len(), cfg.seq_len);
        if dataset.is_empty() {
            tracing::warn!("Corpus is not longer than seq_len; training has nothing to learn from");
        }

        // ── Step 4: Train and sample every selected model ─────────────────────
        let predictor_cfg = cfg.predictor_config(vocab.len());
        let mut outcomes  = Vec::with_capacity(cfg.models.len());

        for &kind in &cfg.models {
            let mut predictor = build_predictor(kind, &predictor_cfg)?;
            let outcome = TrainGenerateLoop::new(
                &vocab,
                &dataset,
                cfg.iterations,
                cfg.preds_per_iteration,
                cfg.seed,
            )
            .run(predictor.as_mut(), sink)
            .with_context(|| format!("{} run failed", kind.display_name()))?;

            if let (Some(last), Some(best)) = (outcome.history.last(), outcome.history.best()) {
                tracing::info!(
                    "{} finished: final loss={:.4}, best={:.4}",
                    kind.display_name(),
                    last,
                    best
                );
            }
            outcomes.push(outcome);
        }

        let summary = ComparisonSummary {
            vocab_size:   vocab.len(),
            corpus_chars: corpus.chars().count(),
            windows:      dataset.len(),
            outcomes,
        };

        // ── Step 5: Persist loss histories ────────────────────────────────────
        LossLogger::new(&cfg.output_dir)?.write(cfg, &summary.histories())?;

        Ok(summary)
    }
}
