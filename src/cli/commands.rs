// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `compare` and `inspect`, and
// all their configurable flags.
//
// clap's derive macros generate the help text, the error
// messages for missing args and the string → number/enum
// conversions.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::compare_use_case::ComparisonConfig;
use crate::ml::predictor::{ModelKind, OptimizerKind};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train SimpleRNN, GRU and Transformer on a corpus and sample from each
    Compare(CompareArgs),

    /// Print corpus statistics without training
    Inspect(InspectArgs),
}

/// Model names accepted by --models
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelArg {
    Rnn,
    Gru,
    Transformer,
}

impl From<ModelArg> for ModelKind {
    fn from(m: ModelArg) -> Self {
        match m {
            ModelArg::Rnn         => ModelKind::Recurrent,
            ModelArg::Gru         => ModelKind::GatedRecurrent,
            ModelArg::Transformer => ModelKind::Attention,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptimizerArg {
    Adam,
    RmsProp,
}

impl From<OptimizerArg> for OptimizerKind {
    fn from(o: OptimizerArg) -> Self {
        match o {
            OptimizerArg::Adam    => OptimizerKind::Adam,
            OptimizerArg::RmsProp => OptimizerKind::RmsProp,
        }
    }
}

/// All arguments for the `compare` command
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Plain-text corpus file
    #[arg(long)]
    pub corpus: String,

    /// Which models to run, in order
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [ModelArg::Rnn, ModelArg::Gru, ModelArg::Transformer]
    )]
    pub models: Vec<ModelArg>,

    /// Characters per input window
    #[arg(long, default_value_t = 10)]
    pub seq_len: usize,

    /// Offset between consecutive windows
    #[arg(long, default_value_t = 1)]
    pub step: usize,

    #[arg(long, default_value_t = 64)]
    pub embed_dim: usize,

    /// Recurrent hidden state width (RNN and GRU)
    #[arg(long, default_value_t = 128)]
    pub hidden_size: usize,

    /// Attention heads; embed_dim must be divisible by it
    #[arg(long, default_value_t = 2)]
    pub num_heads: usize,

    /// Transformer feed-forward width
    #[arg(long, default_value_t = 128)]
    pub ff_dim: usize,

    /// Transformer dropout rate, training only
    #[arg(long, default_value_t = 0.1)]
    pub dropout: f64,

    #[arg(long, default_value_t = 128)]
    pub batch_size: usize,

    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Use one optimizer for every model instead of each model's default
    #[arg(long, value_enum)]
    pub optimizer: Option<OptimizerArg>,

    /// Outer train-then-generate cycles per model
    #[arg(long, default_value_t = 25)]
    pub iterations: usize,

    /// Characters generated after each training pass
    #[arg(long, default_value_t = 100)]
    pub preds: usize,

    /// Seeds parameter initialisation and seed-window sampling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Where loss_history.csv and loss_history.json are written
    #[arg(long, default_value = "runs")]
    pub output_dir: String,
}

/// Convert CLI CompareArgs into the application-layer ComparisonConfig.
/// The application layer never sees clap types.
impl From<CompareArgs> for ComparisonConfig {
    fn from(a: CompareArgs) -> Self {
        ComparisonConfig {
            corpus_path:         a.corpus,
            output_dir:          a.output_dir,
            models:              a.models.into_iter().map(ModelKind::from).collect(),
            seq_len:             a.seq_len,
            step:                a.step,
            embed_dim:           a.embed_dim,
            hidden_size:         a.hidden_size,
            num_heads:           a.num_heads,
            ff_dim:              a.ff_dim,
            dropout:             a.dropout,
            batch_size:          a.batch_size,
            learning_rate:       a.lr,
            optimizer:           a.optimizer.map(OptimizerKind::from),
            iterations:          a.iterations,
            preds_per_iteration: a.preds,
            seed:                a.seed,
        }
    }
}

/// All arguments for the `inspect` command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Plain-text corpus file
    #[arg(long)]
    pub corpus: String,

    #[arg(long, default_value_t = 10)]
    pub seq_len: usize,

    #[arg(long, default_value_t = 1)]
    pub step: usize,
}
