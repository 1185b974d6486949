use burn::{
    nn::{
        loss::CrossEntropyLossConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
};

use crate::ml::embedding::{PositionalTokenEmbedding, PositionalTokenEmbeddingConfig};
use crate::ml::recurrent::{Gru, GruConfig, SimpleRnn, SimpleRnnConfig};
use crate::ml::transformer::{TransformerBlock, TransformerBlockConfig};

/// A Burn module mapping windows of symbol indices to next-symbol logits.
pub trait NextSymbolModel<B: Backend>: Module<B> {
    /// windows: [batch, seq_len] → logits: [batch, vocab_size]
    fn forward(&self, windows: Tensor<B, 2, Int>) -> Tensor<B, 2>;

    /// Sparse categorical cross-entropy against the true next symbols,
    /// averaged over the batch.
    fn forward_loss(&self, windows: Tensor<B, 2, Int>, labels: Tensor<B, 1, Int>) -> Tensor<B, 1> {
        let logits = self.forward(windows);
        let ce = CrossEntropyLossConfig::new().init(&logits.device());
        ce.forward(logits, labels)
    }
}

// ─── SimpleRNN ────────────────────────────────────────────────────────────────
#[derive(Config, Debug)]
pub struct RecurrentModelConfig {
    pub vocab_size:  usize,
    #[config(default = 64)]
    pub embed_dim:   usize,
    #[config(default = 128)]
    pub hidden_size: usize,
}

impl RecurrentModelConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> RecurrentModel<B> {
        RecurrentModel {
            embedding: EmbeddingConfig::new(self.vocab_size, self.embed_dim).init(device),
            rnn:       SimpleRnnConfig::new(self.embed_dim, self.hidden_size).init(device),
            output:    LinearConfig::new(self.hidden_size, self.vocab_size).init(device),
        }
    }
}

#[derive(Module, Debug)]
pub struct RecurrentModel<B: Backend> {
    pub embedding: Embedding<B>,
    pub rnn:       SimpleRnn<B>,
    pub output:    Linear<B>,
}

impl<B: Backend> NextSymbolModel<B> for RecurrentModel<B> {
    fn forward(&self, windows: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let x = self.embedding.forward(windows); // [batch, seq_len, embed_dim]
        self.output.forward(self.rnn.forward(x))
    }
}

// ─── GRU ──────────────────────────────────────────────────────────────────────
#[derive(Config, Debug)]
pub struct GatedRecurrentModelConfig {
    pub vocab_size:  usize,
    #[config(default = 64)]
    pub embed_dim:   usize,
    #[config(default = 128)]
    pub hidden_size: usize,
}

impl GatedRecurrentModelConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> GatedRecurrentModel<B> {
        GatedRecurrentModel {
            embedding: EmbeddingConfig::new(self.vocab_size, self.embed_dim).init(device),
            gru:       GruConfig::new(self.embed_dim, self.hidden_size).init(device),
            output:    LinearConfig::new(self.hidden_size, self.vocab_size).init(device),
        }
    }
}

#[derive(Module, Debug)]
pub struct GatedRecurrentModel<B: Backend> {
    pub embedding: Embedding<B>,
    pub gru:       Gru<B>,
    pub output:    Linear<B>,
}

impl<B: Backend> NextSymbolModel<B> for GatedRecurrentModel<B> {
    fn forward(&self, windows: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let x = self.embedding.forward(windows);
        self.output.forward(self.gru.forward(x))
    }
}

// ─── Transformer ──────────────────────────────────────────────────────────────
#[derive(Config, Debug)]
pub struct AttentionModelConfig {
    pub vocab_size: usize,
    pub seq_len:    usize,
    #[config(default = 64)]
    pub embed_dim:  usize,
    #[config(default = 2)]
    pub num_heads:  usize,
    #[config(default = 128)]
    pub ff_dim:     usize,
    #[config(default = 0.1)]
    pub dropout:    f64,
}

impl AttentionModelConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> AttentionModel<B> {
        AttentionModel {
            embedding: PositionalTokenEmbeddingConfig::new(self.vocab_size, self.seq_len, self.embed_dim)
                .init(device),
            block: TransformerBlockConfig::new(self.embed_dim, self.num_heads, self.ff_dim)
                .with_dropout(self.dropout)
                .init(device),
            output: LinearConfig::new(self.embed_dim, self.vocab_size).init(device),
        }
    }
}

/// Embedding → one encoder block → last position → projection.
#[derive(Module, Debug)]
pub struct AttentionModel<B: Backend> {
    pub embedding: PositionalTokenEmbedding<B>,
    pub block:     TransformerBlock<B>,
    pub output:    Linear<B>,
}

impl<B: Backend> NextSymbolModel<B> for AttentionModel<B> {
    fn forward(&self, windows: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let [batch_size, seq_len] = windows.dims();

        let x = self.block.forward(self.embedding.forward(windows));
        let [_, _, embed_dim] = x.dims();

        // Only the last position predicts the character after the window
        let last = x
            .slice([0..batch_size, seq_len - 1..seq_len, 0..embed_dim])
            .reshape([batch_size, embed_dim]);
        self.output.forward(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    fn windows(rows: &[&[i32]]) -> Tensor<TestBackend, 2, Int> {
        let seq_len = rows[0].len();
        let flat: Vec<i32> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Tensor::<TestBackend, 1, Int>::from_ints(flat.as_slice(), &Default::default())
            .reshape([rows.len(), seq_len])
    }

    fn labels(values: &[i32]) -> Tensor<TestBackend, 1, Int> {
        Tensor::<TestBackend, 1, Int>::from_ints(values, &Default::default())
    }

    #[test]
    fn test_every_architecture_emits_vocab_sized_logits() {
        let device = Default::default();
        let input  = windows(&[&[0, 1, 2, 3], &[3, 2, 1, 0], &[6, 6, 6, 6]]);

        let rnn = RecurrentModelConfig::new(7).with_embed_dim(8).with_hidden_size(12)
            .init::<TestBackend>(&device);
        let gru = GatedRecurrentModelConfig::new(7).with_embed_dim(8).with_hidden_size(12)
            .init::<TestBackend>(&device);
        let attn = AttentionModelConfig::new(7, 4).with_embed_dim(8).with_ff_dim(16)
            .init::<TestBackend>(&device);

        assert_eq!(rnn.forward(input.clone()).dims(), [3, 7]);
        assert_eq!(gru.forward(input.clone()).dims(), [3, 7]);
        assert_eq!(attn.forward(input).dims(), [3, 7]);
    }

    #[test]
    fn test_untrained_loss_is_near_uniform_guess() {
        // Small random init → logits near zero → loss near ln(vocab_size)
        let device = Default::default();
        let model  = GatedRecurrentModelConfig::new(5).with_embed_dim(4).with_hidden_size(4)
            .init::<TestBackend>(&device);
        let loss: f32 = model
            .forward_loss(windows(&[&[0, 1], &[2, 3]]), labels(&[4, 0]))
            .into_scalar()
            .elem();
        assert!(loss.is_finite());
        assert!((loss - (5.0f32).ln()).abs() < 1.5, "loss {loss}");
    }
}
