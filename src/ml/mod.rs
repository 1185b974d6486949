// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All neural-network code lives here. The application layer
// only sees the SequencePredictor trait and build_predictor();
// Burn types do not leak past this layer except through the
// data layer's Dataset/Batcher glue.
//
// What's in this layer:
//
//   embedding.rs   — token + learned position embedding
//   recurrent.rs   — SimpleRnn and Gru cells, final state only
//   transformer.rs — one post-norm encoder block
//                    (multi-head attention, ReLU feed-forward,
//                    residual connections, layer normalisation)
//   model.rs       — the three next-symbol architectures
//                    sharing the NextSymbolModel trait
//   trainer.rs     — one pass of forward / loss / backward /
//                    optimizer step over the window dataset
//   predictor.rs   — Burn model + optimizer behind the
//                    SequencePredictor contract
//
// Everything runs on the NdArray CPU backend; training wraps
// it in Autodiff, inference uses the plain backend.
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Vaswani et al. (2017) Attention Is All You Need

/// Backend used for training (gradients tracked)
pub type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;

/// Backend used for prediction
pub type InferBackend = burn::backend::NdArray;

/// Token + position embedding for the transformer
pub mod embedding;

/// Hand-built SimpleRNN and GRU recurrences
pub mod recurrent;

/// Single encoder block
pub mod transformer;

/// Next-symbol architectures
pub mod model;

/// One training pass
pub mod trainer;

/// SequencePredictor implementations and factory
pub mod predictor;
