//! Run progress reporting
//!
//! Observers receive one snapshot per generation so callers can log,
//! plot, or record convergence without the engine knowing about any
//! particular sink.

use crate::team::Team;

/// One generation's worth of progress
#[derive(Clone, Copy, Debug)]
pub struct GenerationSnapshot<'a> {
    /// Generation index, starting at 0 for the initial population
    pub generation: usize,
    /// Fittest team of the current generation
    pub current_fittest: &'a Team,
    /// Best team seen across the whole run so far
    pub best_ever: &'a Team,
}

/// Callback invoked once per generation
pub trait ProgressObserver {
    fn on_generation(&mut self, snapshot: &GenerationSnapshot<'_>);
}

/// Observer that ignores all progress
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_generation(&mut self, _snapshot: &GenerationSnapshot<'_>) {}
}

/// Observer that logs each generation at info level
#[derive(Clone, Copy, Debug, Default)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_generation(&mut self, snapshot: &GenerationSnapshot<'_>) {
        log::info!(
            "Generation {}: current fittest {:.4}, best ever {:.4}",
            snapshot.generation,
            snapshot.current_fittest.fitness(),
            snapshot.best_ever.fitness()
        );
    }
}

/// Observer that records the best-ever fitness per generation
#[derive(Clone, Debug, Default)]
pub struct FitnessHistory {
    /// Best-ever fitness, indexed by generation
    pub best_per_generation: Vec<f64>,
}

impl FitnessHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressObserver for FitnessHistory {
    fn on_generation(&mut self, snapshot: &GenerationSnapshot<'_>) {
        self.best_per_generation.push(snapshot.best_ever.fitness());
    }
}
