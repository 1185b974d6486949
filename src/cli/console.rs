// ============================================================
// Layer 1 — Console Progress Output
// ============================================================
// Prints what the train/generate loop reports, as it happens:
//
//   ==================================================
//   GRU Iteration #: 3
//
//   Generating from seed: "the cat sa"
//   the cat sat on the mat...
//
// Generated characters are flushed one at a time so they
// stream while the model is still predicting.

use std::io::{self, Write};

use crate::domain::{generation::IterationReport, traits::GenerationSink};

pub struct ConsoleSink<W: Write> {
    out: W,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

}

impl<W: Write> GenerationSink for ConsoleSink<W> {
    fn iteration_started(&mut self, model: &str, iteration: usize) -> io::Result<()> {
        writeln!(self.out, "{}\n{} Iteration #: {}", "=".repeat(50), model, iteration)?;
        self.out.flush()
    }

    fn seeded(&mut self, seed: &str) -> io::Result<()> {
        write!(self.out, "\nGenerating from seed: \"{}\"\n{}", seed, seed)?;
        self.out.flush()
    }

    fn symbol(&mut self, c: char) -> io::Result<()> {
        write!(self.out, "{}", c)?;
        self.out.flush()
    }

    fn iteration_finished(&mut self, _report: &IterationReport) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.flush()
    }
}
