// ============================================================
// Layer 6 — Loss Logger
// ============================================================
// Writes the per-model loss histories to disk once a run is
// over, for plotting outside this program.
//
// Two files in the output directory:
//
//   loss_history.csv   one row per (model, iteration)
//     model,iteration,loss
//     SimpleRNN,0,2.981234
//     SimpleRNN,1,2.504410
//     GRU,0,3.012871
//     ...
//
//   loss_history.json  the run configuration plus every history
//     { "config": {...}, "histories": [{ "model": ..., "losses": [...] }] }
//
// Both files are rewritten on every run.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::loss_history::LossHistory;

pub const CSV_FILE:  &str = "loss_history.csv";
pub const JSON_FILE: &str = "loss_history.json";

#[derive(Serialize)]
struct RunReport<'a, C: Serialize> {
    config:    &'a C,
    histories: &'a [LossHistory],
}

pub struct LossLogger {
    dir: PathBuf,
}

impl LossLogger {
    /// Create the output directory if it does not exist yet
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn csv_path(&self) -> PathBuf {
        self.dir.join(CSV_FILE)
    }

    pub fn json_path(&self) -> PathBuf {
        self.dir.join(JSON_FILE)
    }

    /// Write both files for a finished run
    pub fn write<C: Serialize>(&self, config: &C, histories: &[LossHistory]) -> Result<()> {
        self.write_csv(histories)?;
        self.write_json(config, histories)?;
        tracing::info!(
            "Loss histories written to '{}' and '{}'",
            self.csv_path().display(),
            self.json_path().display()
        );
        Ok(())
    }

    fn write_csv(&self, histories: &[LossHistory]) -> Result<()> {
        let path = self.csv_path();
        let mut f = BufWriter::new(create(&path)?);

        writeln!(f, "model,iteration,loss")?;
        for h in histories {
            for (iteration, loss) in h.losses().iter().enumerate() {
                writeln!(f, "{},{},{:.6}", h.model, iteration, loss)?;
            }
        }
        f.flush()?;

        tracing::debug!("Wrote CSV: '{}'", path.display());
        Ok(())
    }

    fn write_json<C: Serialize>(&self, config: &C, histories: &[LossHistory]) -> Result<()> {
        let path   = self.json_path();
        let report = RunReport { config, histories };
        let json   = serde_json::to_string_pretty(&report)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;

        tracing::debug!("Wrote JSON: '{}'", path.display());
        Ok(())
    }
}

fn create(path: &Path) -> Result<fs::File> {
    fs::File::create(path).with_context(|| format!("Failed to create '{}'", path.display()))
}
