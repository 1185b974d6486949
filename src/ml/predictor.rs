// ============================================================
// Layer 5 — Burn-backed SequencePredictor
// ============================================================
// Glues a Burn model and its optimizer to the domain-level
// SequencePredictor contract.
//
// Each predictor keeps two copies of its parameters:
//   model     — on the autodiff backend, updated by training
//   inference — model.valid(), refreshed after every pass;
//               dropout is inactive here, so predictions for a
//               given window are deterministic
//
// The set of architectures is closed: ModelKind picks one of
// three and build_predictor() returns it boxed, so the
// comparison loop treats all of them identically.

use burn::{
    backend::ndarray::NdArrayDevice,
    module::AutodiffModule,
    optim::{AdamConfig, Optimizer, RmsPropConfig},
    prelude::*,
    tensor::activation::softmax,
};
use serde::{Deserialize, Serialize};

use crate::data::batcher::WindowBatcher;
use crate::domain::window::WindowDataset;
use crate::domain::error::{ensure_finite, CharModelError, Result};
use crate::domain::traits::SequencePredictor;
use crate::ml::model::{
    AttentionModelConfig, GatedRecurrentModelConfig, NextSymbolModel, RecurrentModelConfig,
};
use crate::ml::{trainer, InferBackend, TrainBackend};

// ─── Model and optimizer choice ───────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Recurrent,
    GatedRecurrent,
    Attention,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [
        ModelKind::Recurrent,
        ModelKind::GatedRecurrent,
        ModelKind::Attention,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Recurrent      => "SimpleRNN",
            ModelKind::GatedRecurrent => "GRU",
            ModelKind::Attention      => "Transformer",
        }
    }

    /// RMSprop for the recurrent models, Adam for the transformer
    pub fn default_optimizer(self) -> OptimizerKind {
        match self {
            ModelKind::Recurrent | ModelKind::GatedRecurrent => OptimizerKind::RmsProp,
            ModelKind::Attention => OptimizerKind::Adam,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerKind {
    Adam,
    RmsProp,
}

/// Everything needed to build any of the three predictors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictorConfig {
    pub vocab_size:    usize,
    pub seq_len:       usize,
    pub embed_dim:     usize,
    /// Recurrent hidden state width (RNN and GRU)
    pub hidden_size:   usize,
    /// Attention heads (transformer only)
    pub num_heads:     usize,
    /// Feed-forward width (transformer only)
    pub ff_dim:        usize,
    pub dropout:       f64,
    pub batch_size:    usize,
    pub learning_rate: f64,
    /// None → each model's default optimizer
    pub optimizer:     Option<OptimizerKind>,
    /// Backend seed applied before parameter initialisation
    pub seed:          u64,
}

impl PredictorConfig {
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(CharModelError::InvalidConfig(msg.to_string()));
        if self.vocab_size == 0 { return invalid("vocab_size must be at least 1"); }
        if self.seq_len == 0    { return invalid("seq_len must be at least 1"); }
        if self.batch_size == 0 { return invalid("batch_size must be at least 1"); }
        if self.embed_dim == 0 || self.hidden_size == 0 || self.ff_dim == 0 {
            return invalid("layer widths must be at least 1");
        }
        if self.num_heads == 0 || self.embed_dim % self.num_heads != 0 {
            return Err(CharModelError::InvalidConfig(format!(
                "embed_dim ({}) must be divisible by num_heads ({})",
                self.embed_dim, self.num_heads
            )));
        }
        if !(0.0..1.0).contains(&self.dropout) {
            return invalid("dropout must be in [0, 1)");
        }
        if !(self.learning_rate > 0.0) {
            return invalid("learning_rate must be positive");
        }
        Ok(())
    }
}

// ─── Factory ──────────────────────────────────────────────────────────────────
/// Build a freshly initialised predictor of the given architecture.
pub fn build_predictor(kind: ModelKind, cfg: &PredictorConfig) -> Result<Box<dyn SequencePredictor>> {
    cfg.validate()?;

    let device = NdArrayDevice::default();
    TrainBackend::seed(cfg.seed);

    let optimizer = cfg.optimizer.unwrap_or_else(|| kind.default_optimizer());
    tracing::info!(
        "Building {} (vocab={}, seq_len={}, optimizer={:?})",
        kind.display_name(),
        cfg.vocab_size,
        cfg.seq_len,
        optimizer
    );

    let predictor = match kind {
        ModelKind::Recurrent => {
            let model = RecurrentModelConfig::new(cfg.vocab_size)
                .with_embed_dim(cfg.embed_dim)
                .with_hidden_size(cfg.hidden_size)
                .init::<TrainBackend>(&device);
            with_optimizer(kind, model, optimizer, cfg, device)
        }
        ModelKind::GatedRecurrent => {
            let model = GatedRecurrentModelConfig::new(cfg.vocab_size)
                .with_embed_dim(cfg.embed_dim)
                .with_hidden_size(cfg.hidden_size)
                .init::<TrainBackend>(&device);
            with_optimizer(kind, model, optimizer, cfg, device)
        }
        ModelKind::Attention => {
            let model = AttentionModelConfig::new(cfg.vocab_size, cfg.seq_len)
                .with_embed_dim(cfg.embed_dim)
                .with_num_heads(cfg.num_heads)
                .with_ff_dim(cfg.ff_dim)
                .with_dropout(cfg.dropout)
                .init::<TrainBackend>(&device);
            with_optimizer(kind, model, optimizer, cfg, device)
        }
    };
    Ok(predictor)
}

fn with_optimizer<M>(
    kind:      ModelKind,
    model:     M,
    optimizer: OptimizerKind,
    cfg:       &PredictorConfig,
    device:    NdArrayDevice,
) -> Box<dyn SequencePredictor>
where
    M: AutodiffModule<TrainBackend> + NextSymbolModel<TrainBackend> + 'static,
    M::InnerModule: NextSymbolModel<InferBackend>,
{
    match optimizer {
        OptimizerKind::Adam => {
            let optim = AdamConfig::new()
                .with_epsilon(1e-7)
                .init::<TrainBackend, M>();
            Box::new(BurnPredictor::new(kind, model, optim, cfg, device))
        }
        OptimizerKind::RmsProp => {
            // rho = 0.9
            let optim = RmsPropConfig::new()
                .with_alpha(0.9)
                .with_epsilon(1e-7)
                .init::<TrainBackend, M>();
            Box::new(BurnPredictor::new(kind, model, optim, cfg, device))
        }
    }
}

// ─── BurnPredictor ────────────────────────────────────────────────────────────
pub struct BurnPredictor<M, O>
where
    M: AutodiffModule<TrainBackend>,
{
    kind:          ModelKind,
    model:         M,
    inference:     M::InnerModule,
    optim:         O,
    seq_len:       usize,
    vocab_size:    usize,
    batch_size:    usize,
    learning_rate: f64,
    device:        NdArrayDevice,
}

impl<M, O> BurnPredictor<M, O>
where
    M: AutodiffModule<TrainBackend> + NextSymbolModel<TrainBackend>,
    M::InnerModule: NextSymbolModel<InferBackend>,
    O: Optimizer<M, TrainBackend>,
{
    pub fn new(
        kind:   ModelKind,
        model:  M,
        optim:  O,
        cfg:    &PredictorConfig,
        device: NdArrayDevice,
    ) -> Self {
        let inference = model.valid();
        Self {
            kind,
            model,
            inference,
            optim,
            seq_len:       cfg.seq_len,
            vocab_size:    cfg.vocab_size,
            batch_size:    cfg.batch_size,
            learning_rate: cfg.learning_rate,
            device,
        }
    }

    fn check_window(&self, window: &[usize]) -> Result<()> {
        if window.len() != self.seq_len {
            return Err(CharModelError::ShapeMismatch {
                expected: self.seq_len,
                got:      window.len(),
            });
        }
        if let Some(&index) = window.iter().find(|&&i| i >= self.vocab_size) {
            return Err(CharModelError::UnknownIndex { index, vocab_size: self.vocab_size });
        }
        Ok(())
    }
}

impl<M, O> SequencePredictor for BurnPredictor<M, O>
where
    M: AutodiffModule<TrainBackend> + NextSymbolModel<TrainBackend>,
    M::InnerModule: NextSymbolModel<InferBackend>,
    O: Optimizer<M, TrainBackend>,
{
    fn name(&self) -> &str {
        self.kind.display_name()
    }

    fn seq_len(&self) -> usize {
        self.seq_len
    }

    fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    fn train_one_pass(&mut self, dataset: &WindowDataset) -> Result<f64> {
        if dataset.seq_len() != self.seq_len {
            return Err(CharModelError::ShapeMismatch {
                expected: self.seq_len,
                got:      dataset.seq_len(),
            });
        }

        // A failed pass keeps the old parameters, but the optimizer
        // state has already seen the batches before the failure
        let (model, loss) = trainer::train_pass(
            self.model.clone(),
            &mut self.optim,
            dataset,
            self.batch_size,
            self.learning_rate,
            &self.device,
        )?;
        self.model     = model;
        self.inference = self.model.valid();
        Ok(loss)
    }

    fn predict_next(&self, window: &[usize]) -> Result<Vec<f32>> {
        self.check_window(window)?;

        let input  = WindowBatcher::<InferBackend>::new(self.device.clone()).single(window);
        let logits = self.inference.forward(input); // [1, vocab_size]
        let probs: Vec<f32> = softmax(logits, 1)
            .into_data()
            .convert::<f32>()
            .to_vec()
            .map_err(|e| CharModelError::Backend(format!("{e:?}")))?;

        ensure_finite(probs.iter().map(|&p| f64::from(p)), "prediction")?;
        Ok(probs)
    }
}
