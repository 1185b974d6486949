use burn::{
    nn::{
        attention::{MhaInput, MultiHeadAttention, MultiHeadAttentionConfig},
        Dropout, DropoutConfig,
        LayerNorm, LayerNormConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::relu,
};

#[derive(Config, Debug)]
pub struct TransformerBlockConfig {
    pub embed_dim: usize,
    pub num_heads: usize,
    /// Width of the feed-forward hidden layer
    pub ff_dim:    usize,
    #[config(default = 0.1)]
    pub dropout:   f64,
    #[config(default = 1e-6)]
    pub norm_epsilon: f64,
}

impl TransformerBlockConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> TransformerBlock<B> {
        // Dropout applies to sublayer outputs only, never to the attention weights
        let self_attn = MultiHeadAttentionConfig::new(self.embed_dim, self.num_heads)
            .with_dropout(0.0)
            .init(device);
        let ffn_linear1 = LinearConfig::new(self.embed_dim, self.ff_dim).init(device);
        let ffn_linear2 = LinearConfig::new(self.ff_dim, self.embed_dim).init(device);
        let norm1 = LayerNormConfig::new(self.embed_dim).with_epsilon(self.norm_epsilon).init(device);
        let norm2 = LayerNormConfig::new(self.embed_dim).with_epsilon(self.norm_epsilon).init(device);
        let dropout = DropoutConfig::new(self.dropout).init();
        TransformerBlock { self_attn, ffn_linear1, ffn_linear2, norm1, norm2, dropout }
    }
}

/// One post-norm encoder block. Attention is unmasked: every position
/// sees the whole window, including positions after it.
#[derive(Module, Debug)]
pub struct TransformerBlock<B: Backend> {
    pub self_attn:   MultiHeadAttention<B>,
    pub ffn_linear1: Linear<B>,
    pub ffn_linear2: Linear<B>,
    pub norm1:       LayerNorm<B>,
    pub norm2:       LayerNorm<B>,
    pub dropout:     Dropout,
}

impl<B: Backend> TransformerBlock<B> {
    /// x: [batch, seq_len, embed_dim] → same shape
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        let attn_output = self.self_attn.forward(MhaInput::self_attn(x.clone())).context;
        let x = self.norm1.forward(x + self.dropout.forward(attn_output));
        let ffn_out = self.ffn_linear2.forward(relu(self.ffn_linear1.forward(x.clone())));
        self.norm2.forward(x + self.dropout.forward(ffn_out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::Distribution;

    type TestBackend = NdArray<f32>;

    fn block(dropout: f64) -> TransformerBlock<TestBackend> {
        TransformerBlockConfig::new(8, 2, 16)
            .with_dropout(dropout)
            .init(&Default::default())
    }

    fn random_input(shape: [usize; 3]) -> Tensor<TestBackend, 3> {
        Tensor::random(shape, Distribution::Normal(0.0, 1.0), &Default::default())
    }

    #[test]
    fn test_preserves_shape() {
        let out = block(0.1).forward(random_input([3, 5, 8]));
        assert_eq!(out.dims(), [3, 5, 8]);
    }

    #[test]
    fn test_output_is_layer_normalised_per_position() {
        // Fresh LayerNorm has gamma = 1 and beta = 0
        let out = block(0.0).forward(random_input([2, 4, 8]));
        let means: Vec<f32> = out
            .mean_dim(2)
            .into_data()
            .convert::<f32>()
            .to_vec()
            .unwrap();
        for m in means {
            assert!(m.abs() < 1e-4, "mean {m} should be ~0");
        }
    }

    #[test]
    fn test_attention_weights_are_never_dropped() {
        let b = block(0.3);
        assert_eq!(b.self_attn.dropout.prob, 0.0);
        assert_eq!(b.dropout.prob, 0.3);
    }

    #[test]
    fn test_dropout_is_inactive_without_autodiff() {
        let b     = block(0.5);
        let input = random_input([1, 4, 8]);
        let first: Vec<f32>  = b.forward(input.clone()).into_data().convert::<f32>().to_vec().unwrap();
        let second: Vec<f32> = b.forward(input).into_data().convert::<f32>().to_vec().unwrap();
        assert_eq!(first, second);
    }
}
