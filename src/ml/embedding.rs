use burn::{
    nn::{Embedding, EmbeddingConfig},
    prelude::*,
};

#[derive(Config, Debug)]
pub struct PositionalTokenEmbeddingConfig {
    pub vocab_size: usize,
    /// Number of positions the position table covers
    pub seq_len:    usize,
    pub embed_dim:  usize,
}

impl PositionalTokenEmbeddingConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> PositionalTokenEmbedding<B> {
        PositionalTokenEmbedding {
            token_embedding:    EmbeddingConfig::new(self.vocab_size, self.embed_dim).init(device),
            position_embedding: EmbeddingConfig::new(self.seq_len, self.embed_dim).init(device),
        }
    }
}

/// Learned token vector + learned position vector, summed elementwise.
#[derive(Module, Debug)]
pub struct PositionalTokenEmbedding<B: Backend> {
    pub token_embedding:    Embedding<B>,
    pub position_embedding: Embedding<B>,
}

impl<B: Backend> PositionalTokenEmbedding<B> {
    /// windows: [batch, seq_len] → [batch, seq_len, embed_dim]
    pub fn forward(&self, windows: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let [batch_size, seq_len] = windows.dims();

        let tok_emb = self.token_embedding.forward(windows);

        // Self-attention is permutation-invariant, so position must be injected explicitly.
        let positions = Tensor::<B, 1, Int>::arange(0..seq_len as i64, &tok_emb.device())
            .unsqueeze::<2>()
            .expand([batch_size, seq_len]);
        let pos_emb = self.position_embedding.forward(positions);

        tok_emb + pos_emb
    }
}
