// ============================================================
// Layer 2 — TrainGenerateLoop
// ============================================================
// Drives one predictor through the outer iterations:
//
//   TRAIN    → one pass over the dataset, loss appended
//   SEED     → a random dataset window becomes the start state
//   GENERATE → predict, argmax, decode, emit, slide
//              (preds_per_iteration times)
//   RECORD   → repeat until the iteration budget is used up
//
// The loop knows nothing about Burn or the console: it talks to
// a SequencePredictor and reports through a GenerationSink.
//
// Reference: Rust Book §17 (Trait Objects)

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::domain::window::WindowDataset;
use crate::domain::{
    error::{CharModelError, Result},
    generation::{argmax, GenerationState, IterationReport},
    loss_history::LossHistory,
    traits::{GenerationSink, SequencePredictor},
    vocabulary::Vocabulary,
};

/// Everything one model produced over a full run
#[derive(Debug, Clone)]
pub struct LoopOutcome {
    pub history: LossHistory,
    pub reports: Vec<IterationReport>,
}

pub struct TrainGenerateLoop<'a> {
    vocab:               &'a Vocabulary,
    dataset:             &'a WindowDataset,
    iterations:          usize,
    preds_per_iteration: usize,
    rng:                 StdRng,
}

impl<'a> TrainGenerateLoop<'a> {
    pub fn new(
        vocab:               &'a Vocabulary,
        dataset:             &'a WindowDataset,
        iterations:          usize,
        preds_per_iteration: usize,
        seed:                u64,
    ) -> Self {
        Self {
            vocab,
            dataset,
            iterations,
            preds_per_iteration,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Run every outer iteration for `predictor`.
    /// Any error aborts the run; losses recorded so far are dropped.
    pub fn run(
        &mut self,
        predictor: &mut dyn SequencePredictor,
        sink:      &mut dyn GenerationSink,
    ) -> Result<LoopOutcome> {
        let mut history = LossHistory::new(predictor.name());
        let mut reports = Vec::with_capacity(self.iterations);

        for iteration in 0..self.iterations {
            sink.iteration_started(predictor.name(), iteration)?;

            // ── TRAIN ────────────────────────────────────────────────────────
            let loss = predictor.train_one_pass(self.dataset)?;
            history.record(loss);
            tracing::info!("{} iteration {}: loss={:.4}", predictor.name(), iteration, loss);

            // ── SEED ─────────────────────────────────────────────────────────
            let seed_window = self.sample_window()?;
            let seed_text   = self.vocab.decode(&seed_window)?;
            sink.seeded(&seed_text)?;

            // ── GENERATE ─────────────────────────────────────────────────────
            let generated = self.generate(&*predictor, &seed_window, sink)?;

            // ── RECORD ───────────────────────────────────────────────────────
            let report = IterationReport {
                model: predictor.name().to_string(),
                iteration,
                loss,
                seed: seed_text,
                generated,
            };
            sink.iteration_finished(&report)?;
            reports.push(report);
        }

        Ok(LoopOutcome { history, reports })
    }

    /// Uniformly pick one dataset window
    fn sample_window(&mut self) -> Result<Vec<usize>> {
        let samples = self.dataset.samples();
        if samples.is_empty() {
            return Err(CharModelError::EmptyDataset);
        }
        let i = self.rng.gen_range(0..samples.len());
        Ok(samples[i].input.clone())
    }

    /// Greedy autoregressive generation from `seed`
    fn generate(
        &self,
        predictor: &dyn SequencePredictor,
        seed:      &[usize],
        sink:      &mut dyn GenerationSink,
    ) -> Result<String> {
        let mut state     = GenerationState::seed(seed)?;
        let mut generated = String::with_capacity(self.preds_per_iteration);

        for _ in 0..self.preds_per_iteration {
            let probs = predictor.predict_next(&state.window())?;
            let next  = argmax(&probs).ok_or(CharModelError::ShapeMismatch {
                expected: self.vocab.len(),
                got:      0,
            })?;
            let c = self.vocab.char_at(next)?;

            sink.symbol(c)?;
            generated.push(c);
            state.slide(next);
        }
        Ok(generated)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::NullSink;

    const CORPUS: &str = "hello world hello world";

    /// Reports a fixed loss and always predicts `favourite`
    struct FakePredictor {
        seq_len:    usize,
        vocab_size: usize,
        loss:       f64,
        favourite:  usize,
        passes:     usize,
    }

    impl FakePredictor {
        fn new(seq_len: usize, vocab_size: usize, loss: f64, favourite: usize) -> Self {
            Self { seq_len, vocab_size, loss, favourite, passes: 0 }
        }
    }

    impl SequencePredictor for FakePredictor {
        fn name(&self) -> &str { "fake" }
        fn seq_len(&self) -> usize { self.seq_len }
        fn vocab_size(&self) -> usize { self.vocab_size }

        fn train_one_pass(&mut self, _dataset: &WindowDataset) -> Result<f64> {
            self.passes += 1;
            Ok(self.loss)
        }

        fn predict_next(&self, window: &[usize]) -> Result<Vec<f32>> {
            assert_eq!(window.len(), self.seq_len, "window length drifted");
            let mut probs = vec![0.0; self.vocab_size];
            probs[self.favourite] = 1.0;
            Ok(probs)
        }
    }

    /// Keeps every window it is asked about
    struct RecordingPredictor(FakePredictor, std::cell::RefCell<Vec<Vec<usize>>>);

    impl SequencePredictor for RecordingPredictor {
        fn name(&self) -> &str { self.0.name() }
        fn seq_len(&self) -> usize { self.0.seq_len }
        fn vocab_size(&self) -> usize { self.0.vocab_size }
        fn train_one_pass(&mut self, d: &WindowDataset) -> Result<f64> { self.0.train_one_pass(d) }
        fn predict_next(&self, window: &[usize]) -> Result<Vec<f32>> {
            self.1.borrow_mut().push(window.to_vec());
            self.0.predict_next(window)
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        started:  Vec<usize>,
        seeds:    Vec<String>,
        symbols:  String,
        finished: usize,
    }

    impl GenerationSink for RecordingSink {
        fn iteration_started(&mut self, _model: &str, iteration: usize) -> std::io::Result<()> {
            self.started.push(iteration);
            Ok(())
        }
        fn seeded(&mut self, seed: &str) -> std::io::Result<()> {
            self.seeds.push(seed.to_string());
            Ok(())
        }
        fn symbol(&mut self, c: char) -> std::io::Result<()> {
            self.symbols.push(c);
            Ok(())
        }
        fn iteration_finished(&mut self, _report: &IterationReport) -> std::io::Result<()> {
            self.finished += 1;
            Ok(())
        }
    }

    /// Accepts the banner and seed, then fails on the first character
    struct BrokenSink;

    impl GenerationSink for BrokenSink {
        fn symbol(&mut self, _c: char) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    fn fixtures(seq_len: usize) -> (Vocabulary, WindowDataset) {
        let vocab = Vocabulary::from_corpus(CORPUS).unwrap();
        let ds    = WindowDataset::build(CORPUS, &vocab, seq_len, 1).unwrap();
        (vocab, ds)
    }

    #[test]
    fn test_constant_loss_fills_history() {
        let (vocab, ds) = fixtures(4);
        let mut fake    = FakePredictor::new(4, vocab.len(), 0.75, 0);
        let outcome     = TrainGenerateLoop::new(&vocab, &ds, 6, 3, 1)
            .run(&mut fake, &mut NullSink)
            .unwrap();

        assert_eq!(outcome.history.losses(), &[0.75; 6]);
        assert_eq!(outcome.history.model, "fake");
        assert_eq!(fake.passes, 6);
    }

    #[test]
    fn test_generates_exactly_k_chars_per_iteration() {
        let (vocab, ds) = fixtures(5);
        let o           = vocab.index_of('o').unwrap();
        let mut fake    = FakePredictor::new(5, vocab.len(), 1.0, o);
        let mut sink    = RecordingSink::default();

        let outcome = TrainGenerateLoop::new(&vocab, &ds, 3, 7, 42)
            .run(&mut fake, &mut sink)
            .unwrap();

        assert_eq!(outcome.reports.len(), 3);
        for report in &outcome.reports {
            assert_eq!(report.generated, "ooooooo");
            assert_eq!(report.seed.chars().count(), 5);
        }
        assert_eq!(sink.symbols.len(), 21);
        assert_eq!(sink.started, vec![0, 1, 2]);
        assert_eq!(sink.seeds.len(), 3);
        assert_eq!(sink.finished, 3);
    }

    #[test]
    fn test_seed_is_a_dataset_window() {
        let (vocab, ds) = fixtures(3);
        let mut fake    = FakePredictor::new(3, vocab.len(), 1.0, 0);
        let outcome     = TrainGenerateLoop::new(&vocab, &ds, 10, 1, 9)
            .run(&mut fake, &mut NullSink)
            .unwrap();

        let windows: Vec<String> = ds.inputs().map(|w| vocab.decode(w).unwrap()).collect();
        for report in outcome.reports {
            assert!(windows.contains(&report.seed), "{:?} is not a window", report.seed);
        }
    }

    #[test]
    fn test_window_slides_predictions_in() {
        let (vocab, ds) = fixtures(3);
        let w           = vocab.index_of('w').unwrap();
        let mut rec     = RecordingPredictor(FakePredictor::new(3, vocab.len(), 1.0, w), Default::default());

        TrainGenerateLoop::new(&vocab, &ds, 1, 4, 3)
            .run(&mut rec, &mut NullSink)
            .unwrap();

        let seen = rec.1.into_inner();
        assert_eq!(seen.len(), 4);
        assert!(seen.iter().all(|win| win.len() == 3));
        // After three predictions the window is made only of them
        assert_eq!(seen[3], vec![w, w, w]);
        assert_eq!(&seen[1][..2], &seen[0][1..]);
    }

    #[test]
    fn test_same_seed_picks_same_windows() {
        let (vocab, ds) = fixtures(4);
        let run = |seed| {
            let mut fake = FakePredictor::new(4, vocab.len(), 1.0, 0);
            TrainGenerateLoop::new(&vocab, &ds, 5, 2, seed)
                .run(&mut fake, &mut NullSink)
                .unwrap()
                .reports
                .into_iter()
                .map(|r| r.seed)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn test_empty_dataset_fails_at_seeding() {
        let vocab    = Vocabulary::from_corpus("abc").unwrap();
        let ds       = WindowDataset::build("abc", &vocab, 5, 1).unwrap();
        let mut fake = FakePredictor::new(5, vocab.len(), 1.0, 0);

        let err = TrainGenerateLoop::new(&vocab, &ds, 2, 2, 0)
            .run(&mut fake, &mut NullSink)
            .unwrap_err();
        assert_eq!(err, CharModelError::EmptyDataset);
    }

    #[test]
    fn test_sink_write_failure_aborts_the_run() {
        let (vocab, ds) = fixtures(3);
        let mut fake    = FakePredictor::new(3, vocab.len(), 1.0, 0);

        let err = TrainGenerateLoop::new(&vocab, &ds, 2, 4, 0)
            .run(&mut fake, &mut BrokenSink)
            .unwrap_err();
        assert_eq!(err, CharModelError::Output("pipe closed".to_string()));
        assert_eq!(fake.passes, 1);
    }

    #[test]
    fn test_zero_iterations_is_an_empty_history() {
        let (vocab, ds) = fixtures(2);
        let mut fake    = FakePredictor::new(2, vocab.len(), 1.0, 0);
        let outcome     = TrainGenerateLoop::new(&vocab, &ds, 0, 5, 0)
            .run(&mut fake, &mut NullSink)
            .unwrap();
        assert!(outcome.history.is_empty());
        assert!(outcome.reports.is_empty());
    }
}
