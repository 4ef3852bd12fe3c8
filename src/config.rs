//! Run configuration
//!
//! Engine parameters plus the YAML file format the CLI loads them from.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::candidate::{AttributeWeights, TeamDefinition};
use crate::error::{ConfigFileError, ConfigurationError};
use crate::termination::StagnationPolicy;

/// Parameters steering one evolutionary run
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    /// Number of teams per generation
    pub population_size: usize,
    /// Probability that a selected pair recombines
    pub crossover_rate: f64,
    /// Per-member mutation probability
    pub mutation_rate: f64,
    /// Hard cap on evolution cycles
    pub max_generations: usize,
    /// Early-stop policy
    #[serde(default)]
    pub stagnation: StagnationPolicy,
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            population_size: 100,
            crossover_rate: 0.8,
            mutation_rate: 0.05,
            max_generations: 100,
            stagnation: StagnationPolicy::default(),
        }
    }
}

impl RunParameters {
    /// Reject parameter sets no run should start with
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.population_size == 0 {
            return Err(ConfigurationError::ZeroPopulationSize);
        }
        if self.max_generations == 0 {
            return Err(ConfigurationError::ZeroGenerationCap);
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(ConfigurationError::CrossoverRateOutOfRange(
                self.crossover_rate,
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigurationError::MutationRateOutOfRange(
                self.mutation_rate,
            ));
        }
        self.stagnation.validate()
    }
}

/// On-disk run configuration
///
/// Everything one run needs: where the roster lives, the team shape,
/// the attribute weighting, and the engine parameters (flattened to the
/// top level of the file).
#[derive(Clone, Debug, Deserialize)]
pub struct FileConfig {
    /// Path to the roster CSV, relative to the working directory
    pub roster: String,
    /// Roster columns to ignore when collecting attributes
    #[serde(default)]
    pub excluded_columns: Vec<String>,
    /// Required member count per category
    pub team: TeamDefinition,
    /// Weight per scored attribute
    pub weights: AttributeWeights,
    /// Engine parameters
    #[serde(flatten)]
    pub parameters: RunParameters,
    /// Fixed seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
}

impl FileConfig {
    /// Load and parse a YAML configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }
}
