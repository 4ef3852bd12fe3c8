//! Stagnation-based early termination
//!
//! Tracks the last significant fitness improvement and stops a run once
//! the population has gone quiet for longer than the patience window.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Early-stop policy for stalled searches
///
/// An improvement only counts when the best-ever fitness beats the
/// recorded value by more than `min_relative_gain`; smaller gains leave
/// the record where it is. Once more than `patience` generations pass
/// without the record advancing, the run is considered stagnant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagnationPolicy {
    /// Generations allowed since the last recorded improvement
    pub patience: usize,
    /// Relative gain required to count as an improvement
    pub min_relative_gain: f64,
}

impl Default for StagnationPolicy {
    fn default() -> Self {
        Self {
            patience: 10,
            min_relative_gain: 0.01,
        }
    }
}

impl StagnationPolicy {
    /// Create the default policy (10 generations, 1% gain)
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `fitness` improves enough on `recorded` to reset the clock
    pub fn is_significant_gain(&self, recorded: f64, fitness: f64) -> bool {
        fitness > recorded * (1.0 + self.min_relative_gain)
    }

    /// Whether the run has outlived its patience since `record`
    pub fn is_stagnant(&self, generation: usize, record: &ImprovementRecord) -> bool {
        generation.saturating_sub(record.generation) > self.patience
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.min_relative_gain.is_finite() || self.min_relative_gain < 0.0 {
            return Err(ConfigurationError::InvalidStagnationGain(
                self.min_relative_gain,
            ));
        }
        Ok(())
    }
}

/// Where and when the best-ever fitness last made a significant jump
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImprovementRecord {
    /// Generation index of the improvement
    pub generation: usize,
    /// Best-ever fitness at that point
    pub fitness: f64,
}

impl ImprovementRecord {
    /// Record the initial population's best as the baseline
    pub fn starting_at(fitness: f64) -> Self {
        Self {
            generation: 0,
            fitness,
        }
    }

    /// Advance the record to a new improvement point
    pub fn advance(&mut self, generation: usize, fitness: f64) {
        self.generation = generation;
        self.fitness = fitness;
    }
}
