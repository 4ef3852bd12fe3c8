//! # team-evo
//!
//! A genetic-algorithm search for high-scoring team compositions.
//!
//! Given pools of typed candidates, a required member count per
//! category, and a weighting over numeric attributes, the engine
//! evolves a population of candidate teams toward one maximizing the
//! weight-scaled average of per-attribute team means.
//!
//! ## Core Concepts
//!
//! - **Team as Chromosome**: each member slot is a gene filled by a
//!   candidate of a required category
//! - **Lethal Genotypes**: teams with duplicate members score zero and
//!   are culled by the elitist merge instead of being rejected
//! - **Explicit Randomness**: a seedable generator is threaded through
//!   every operator, so identical seeds reproduce identical runs
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use team_evo::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let manager = PopulationManager::new(pool, definition, weights)?;
//! let outcome = Evolution::new(manager, RunParameters::default())?
//!     .run(&mut rng)?;
//! println!("best team scores {}", outcome.best_team.fitness());
//! ```

pub mod candidate;
pub mod config;
pub mod engine;
pub mod error;
pub mod fitness;
pub mod operators;
pub mod population;
pub mod progress;
pub mod roster;
pub mod team;
pub mod termination;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::candidate::{
        AttributeWeights, Candidate, CandidateId, CandidatePool, TeamDefinition,
    };
    pub use crate::config::{FileConfig, RunParameters};
    pub use crate::engine::{Evolution, RunOutcome, StopReason};
    pub use crate::error::*;
    pub use crate::fitness::FitnessEvaluator;
    pub use crate::operators::prelude::*;
    pub use crate::population::PopulationManager;
    pub use crate::progress::{
        FitnessHistory, GenerationSnapshot, LogProgress, NoProgress, ProgressObserver,
    };
    pub use crate::roster::{load_roster, Roster};
    pub use crate::team::{Team, TeamId};
    pub use crate::termination::{ImprovementRecord, StagnationPolicy};
}
