// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and hands the work to Layer 2 (application).
//
// Two commands are supported:
//   1. `compare` — trains the three models on a corpus and
//                  streams generated text after every pass
//   2. `inspect` — prints corpus statistics
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;
pub mod console;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, CompareArgs, InspectArgs};
use console::ConsoleSink;

#[derive(Parser, Debug)]
#[command(
    name = "char-model-compare",
    version = "0.1.0",
    about = "Compare SimpleRNN, GRU and Transformer next-character models on a text corpus."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching use case; the CLI layer only routes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Compare(args) => run_compare(args),
            Commands::Inspect(args) => run_inspect(args),
        }
    }
}

fn run_compare(args: CompareArgs) -> Result<()> {
    use crate::application::compare_use_case::CompareUseCase;

    tracing::info!("Comparing models on corpus: {}", args.corpus);

    let output_dir = args.output_dir.clone();
    let mut sink   = ConsoleSink::stdout();
    let summary    = CompareUseCase::new(args.into()).execute(&mut sink)?;

    println!("{}", "=".repeat(50));
    println!(
        "Corpus: {} chars, vocabulary {}, {} windows",
        summary.corpus_chars, summary.vocab_size, summary.windows
    );
    for outcome in &summary.outcomes {
        let h = &outcome.history;
        match (h.last(), h.best()) {
            (Some(last), Some(best)) => {
                println!("{:<12} final loss {:.4}  best {:.4}", h.model, last, best)
            }
            _ => println!("{:<12} no iterations run", h.model),
        }
    }
    println!("Loss histories written to '{}'", output_dir);
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    use crate::application::inspect_use_case::InspectUseCase;

    let stats = InspectUseCase::new(args.corpus, args.seq_len, args.step).execute()?;
    let vocabulary: String = stats.vocabulary.iter().collect();

    println!("Characters:  {}", stats.chars);
    println!("Vocabulary:  {} {:?}", stats.vocabulary.len(), vocabulary);
    println!("Windows:     {} (seq_len={}, step={})", stats.windows, stats.seq_len, stats.step);
    Ok(())
}
