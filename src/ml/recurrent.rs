// ============================================================
// Layer 5 — Recurrent Layers
// ============================================================
// Two left-to-right recurrences built from Linear projections.
// Both consume [batch, seq_len, d_input] and return only the
// final hidden state [batch, d_hidden]; the caller never needs
// the intermediate states.
//
// SimpleRnn (Elman):
//   h_t = tanh(W x_t + U h_{t-1} + b)
//
// Gru (reset gate applied after the hidden projection):
//   z_t = σ(W_z x_t + U_z h_{t-1} + b_z)          update gate
//   r_t = σ(W_r x_t + U_r h_{t-1} + b_r)          reset gate
//   n_t = tanh(W_n x_t + r_t ⊙ (U_n h_{t-1} + b_n)) candidate
//   h_t = z_t ⊙ h_{t-1} + (1 - z_t) ⊙ n_t
//
// z_t close to 1 keeps the previous state; close to 0 replaces
// it with the candidate. r_t decides how much of the previous
// state the candidate may look at.
//
// Both start from h_0 = 0.
//
// Reference: Elman (1990) Finding Structure in Time
//            Cho et al. (2014) GRU

use burn::{
    nn::{Linear, LinearConfig},
    prelude::*,
    tensor::activation::{sigmoid, tanh},
};

/// Timestep `t` of x: [batch, seq_len, d] → [batch, d]
fn timestep<B: Backend>(x: &Tensor<B, 3>, t: usize) -> Tensor<B, 2> {
    let [batch_size, _, d] = x.dims();
    x.clone()
        .slice([0..batch_size, t..t + 1, 0..d])
        .reshape([batch_size, d])
}

// ─── SimpleRnn ────────────────────────────────────────────────────────────────
#[derive(Config, Debug)]
pub struct SimpleRnnConfig {
    pub d_input:  usize,
    pub d_hidden: usize,
}

impl SimpleRnnConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> SimpleRnn<B> {
        SimpleRnn {
            input_proj:     LinearConfig::new(self.d_input, self.d_hidden).init(device),
            recurrent_proj: LinearConfig::new(self.d_hidden, self.d_hidden)
                .with_bias(false)
                .init(device),
            d_hidden: self.d_hidden,
        }
    }
}

#[derive(Module, Debug)]
pub struct SimpleRnn<B: Backend> {
    pub input_proj:     Linear<B>,
    pub recurrent_proj: Linear<B>,
    pub d_hidden:       usize,
}

impl<B: Backend> SimpleRnn<B> {
    /// x: [batch, seq_len, d_input] → final hidden state [batch, d_hidden]
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 2> {
        let [batch_size, seq_len, _] = x.dims();
        let mut h = Tensor::zeros([batch_size, self.d_hidden], &x.device());

        for t in 0..seq_len {
            let x_t = timestep(&x, t);
            h = tanh(self.input_proj.forward(x_t) + self.recurrent_proj.forward(h));
        }
        h
    }
}

// ─── Gru ──────────────────────────────────────────────────────────────────────
#[derive(Config, Debug)]
pub struct GruConfig {
    pub d_input:  usize,
    pub d_hidden: usize,
}

impl GruConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Gru<B> {
        let gate = || GateProjections {
            input:  LinearConfig::new(self.d_input, self.d_hidden).init(device),
            hidden: LinearConfig::new(self.d_hidden, self.d_hidden).init(device),
        };
        Gru {
            update_gate: gate(),
            reset_gate:  gate(),
            candidate:   gate(),
            d_hidden:    self.d_hidden,
        }
    }
}

/// The input-side and hidden-side projections feeding one gate
#[derive(Module, Debug)]
pub struct GateProjections<B: Backend> {
    pub input:  Linear<B>,
    pub hidden: Linear<B>,
}

#[derive(Module, Debug)]
pub struct Gru<B: Backend> {
    pub update_gate: GateProjections<B>,
    pub reset_gate:  GateProjections<B>,
    pub candidate:   GateProjections<B>,
    pub d_hidden:    usize,
}

impl<B: Backend> Gru<B> {
    /// x: [batch, seq_len, d_input] → final hidden state [batch, d_hidden]
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 2> {
        let [batch_size, seq_len, _] = x.dims();
        let mut h = Tensor::zeros([batch_size, self.d_hidden], &x.device());

        for t in 0..seq_len {
            let x_t = timestep(&x, t);
            h = self.step(x_t, h);
        }
        h
    }

    fn step(&self, x_t: Tensor<B, 2>, h: Tensor<B, 2>) -> Tensor<B, 2> {
        let z = sigmoid(
            self.update_gate.input.forward(x_t.clone()) + self.update_gate.hidden.forward(h.clone()),
        );
        let r = sigmoid(
            self.reset_gate.input.forward(x_t.clone()) + self.reset_gate.hidden.forward(h.clone()),
        );
        let n = tanh(
            self.candidate.input.forward(x_t) + r * self.candidate.hidden.forward(h.clone()),
        );

        z.clone() * h + z.neg().add_scalar(1.0) * n
    }
}
