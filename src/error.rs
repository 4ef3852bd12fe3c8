//! Error types for team-evo
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

use crate::candidate::CandidateId;

/// Error type for fail-fast validation of run context and parameters
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Population size of zero cannot host a generation
    #[error("Population size must be positive")]
    ZeroPopulationSize,

    /// Generation cap of zero would terminate before the first cycle
    #[error("Maximum generation count must be positive")]
    ZeroGenerationCap,

    /// Crossover rate outside the unit interval
    #[error("Crossover rate must be within [0, 1], got {0}")]
    CrossoverRateOutOfRange(f64),

    /// Mutation rate outside the unit interval
    #[error("Mutation rate must be within [0, 1], got {0}")]
    MutationRateOutOfRange(f64),

    /// Stagnation gain threshold rejected
    #[error("Minimum relative gain must be a non-negative finite number, got {0}")]
    InvalidStagnationGain(f64),

    /// Team definition with no member slots
    #[error("Team definition is empty")]
    EmptyTeamDefinition,

    /// Team definition names a category absent from the pool
    #[error("Team definition names category {0:?} which the pool does not contain")]
    UnknownCategory(String),

    /// A category cannot supply enough distinct members
    #[error("Category {category:?} requires {required} distinct members but only {available} are available")]
    CategoryPoolTooSmall {
        category: String,
        required: usize,
        available: usize,
    },

    /// Fitness would be undefined without any weighted attribute
    #[error("No attributes are weighted")]
    NoWeightedAttributes,

    /// Attribute weight rejected
    #[error("Weight for attribute {attribute:?} must be a non-negative finite number, got {weight}")]
    InvalidWeight { attribute: String, weight: f64 },

    /// Candidate ids must be unique across the whole pool
    #[error("Duplicate candidate id {0} in the pool")]
    DuplicateCandidateId(CandidateId),
}

/// Top-level error type for evolution runs
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvolutionError {
    /// Invalid run context or parameters
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Bounded resample spent its attempt budget without a usable draw
    #[error("No unused candidate found in category {category:?} after {attempts} attempts")]
    ExhaustedCandidatePool { category: String, attempts: usize },

    /// Roulette selection over a generation whose fitness sums to zero
    #[error("Generation has zero total fitness; roulette selection is undefined")]
    DegeneratePopulation,
}

/// Error type for roster ingestion
#[derive(Debug, Error)]
pub enum RosterError {
    /// IO error while reading the roster
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The parsed candidates do not form a valid pool
    #[error("Invalid roster: {0}")]
    Invalid(#[from] ConfigurationError),

    /// A reserved header column is absent
    #[error("Roster header is missing the required {0:?} column")]
    MissingColumn(&'static str),

    /// A row lacks a value for a known column
    #[error("Row {row} has no value for column {column:?}")]
    MissingValue { row: usize, column: String },

    /// The id cell is not an integer
    #[error("Row {row}: cannot parse {value:?} as a candidate id")]
    BadId { row: usize, value: String },

    /// An attribute cell is not a finite number
    #[error("Row {row}: cannot parse {value:?} as a number for column {column:?}")]
    BadNumber {
        row: usize,
        column: String,
        value: String,
    },

    /// The same id appears on more than one row
    #[error("Row {row}: candidate id {id} appears more than once")]
    DuplicateId { id: CandidateId, row: usize },

    /// A roster without candidates cannot seed a pool
    #[error("Roster contains no candidates")]
    Empty,
}

/// Error type for configuration-file loading
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// IO error while reading the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed YAML content
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for evolution operations
pub type EvoResult<T> = Result<T, EvolutionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let err = ConfigurationError::CrossoverRateOutOfRange(1.5);
        assert_eq!(err.to_string(), "Crossover rate must be within [0, 1], got 1.5");

        let err = ConfigurationError::CategoryPoolTooSmall {
            category: "backend".to_string(),
            required: 5,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "Category \"backend\" requires 5 distinct members but only 3 are available"
        );

        let err = ConfigurationError::DuplicateCandidateId(7);
        assert_eq!(err.to_string(), "Duplicate candidate id 7 in the pool");
    }

    #[test]
    fn test_evolution_error_display() {
        let err = EvolutionError::ExhaustedCandidatePool {
            category: "designer".to_string(),
            attempts: 100,
        };
        assert_eq!(
            err.to_string(),
            "No unused candidate found in category \"designer\" after 100 attempts"
        );

        let err = EvolutionError::DegeneratePopulation;
        assert_eq!(
            err.to_string(),
            "Generation has zero total fitness; roulette selection is undefined"
        );
    }

    #[test]
    fn test_evolution_error_from_configuration_error() {
        let config_err = ConfigurationError::ZeroPopulationSize;
        let evo_err: EvolutionError = config_err.into();
        assert!(matches!(evo_err, EvolutionError::Configuration(_)));
    }

    #[test]
    fn test_roster_error_display() {
        let err = RosterError::MissingColumn("id");
        assert_eq!(err.to_string(), "Roster header is missing the required \"id\" column");

        let err = RosterError::BadNumber {
            row: 4,
            column: "experience".to_string(),
            value: "n/a".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Row 4: cannot parse \"n/a\" as a number for column \"experience\""
        );
    }
}
