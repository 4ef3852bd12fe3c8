//! Population management
//!
//! The population manager owns the run context: the candidate pool, the
//! team definition, the attribute weights, and the team identity counter.
//! It is the only place teams are constructed and scored.

use std::collections::HashSet;
use std::sync::Arc;

use rand::seq::index;
use rand::Rng;

use crate::candidate::{AttributeWeights, Candidate, CandidateId, CandidatePool, TeamDefinition};
use crate::error::{ConfigurationError, EvolutionError};
use crate::fitness::FitnessEvaluator;
use crate::team::{unique_member_ids, Team, TeamId};

/// Attempt budget for the mutation resample before giving up
pub const MAX_RESAMPLE_ATTEMPTS: usize = 100;

/// Builds and scores teams against a fixed pool and definition
#[derive(Clone, Debug)]
pub struct PopulationManager {
    pool: CandidatePool,
    definition: TeamDefinition,
    evaluator: FitnessEvaluator,
    next_team_id: TeamId,
}

impl PopulationManager {
    /// Create a manager, validating the pool against the team definition
    ///
    /// Every fail-fast rule that could make a draw hang or a score
    /// undefined is checked here, so the generation operations themselves
    /// stay infallible apart from the bounded resample.
    pub fn new(
        pool: CandidatePool,
        definition: TeamDefinition,
        weights: AttributeWeights,
    ) -> Result<Self, ConfigurationError> {
        if definition.is_empty() || definition.team_size() == 0 {
            return Err(ConfigurationError::EmptyTeamDefinition);
        }
        weights.validate()?;
        for (category, required) in definition.iter() {
            if !pool.has_category(category) {
                return Err(ConfigurationError::UnknownCategory(category.to_string()));
            }
            let available = pool.category(category).len();
            if required > available {
                return Err(ConfigurationError::CategoryPoolTooSmall {
                    category: category.to_string(),
                    required,
                    available,
                });
            }
        }
        Ok(Self {
            pool,
            definition,
            evaluator: FitnessEvaluator::new(weights),
            next_team_id: 0,
        })
    }

    /// The pool this manager draws from
    pub fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    /// The definition every team follows
    pub fn definition(&self) -> &TeamDefinition {
        &self.definition
    }

    /// The evaluator scoring every team
    pub fn evaluator(&self) -> &FitnessEvaluator {
        &self.evaluator
    }

    /// Length of every team built by this manager
    pub fn team_size(&self) -> usize {
        self.definition.team_size()
    }

    fn next_id(&mut self) -> TeamId {
        let id = self.next_team_id;
        self.next_team_id += 1;
        id
    }

    /// Draw a fresh random team
    ///
    /// Per category the required count of distinct indices is sampled
    /// without replacement, so a random team is always duplicate-free and
    /// its fitness is always computed, never zeroed.
    pub fn random_team<R: Rng>(&mut self, rng: &mut R) -> Team {
        let mut members = Vec::with_capacity(self.team_size());
        for (category, count) in self.definition.iter() {
            let candidates = self.pool.category(category);
            for idx in index::sample(rng, candidates.len(), count) {
                members.push(Arc::clone(&candidates[idx]));
            }
        }
        self.build_scored(members)
    }

    /// Generate a full random generation
    pub fn random_generation<R: Rng>(&mut self, size: usize, rng: &mut R) -> Vec<Team> {
        (0..size).map(|_| self.random_team(rng)).collect()
    }

    /// Materialize a team from an explicit gene sequence
    ///
    /// Duplicate candidate ids are not an error here: the team is built
    /// anyway and its fitness forced to 0, the lethal score that keeps
    /// invalid recombinations out of the surviving generation.
    pub fn team_from_genes(&mut self, genes: Vec<Arc<Candidate>>) -> Team {
        self.build_scored(genes)
    }

    fn build_scored(&mut self, members: Vec<Arc<Candidate>>) -> Team {
        let fitness = if unique_member_ids(&members) {
            self.evaluator.evaluate(&members)
        } else {
            0.0
        };
        Team::new(self.next_id(), members, fitness)
    }

    /// Draw a same-category replacement whose id is not in `excluded`
    ///
    /// Collisions are retried with fresh uniform draws up to
    /// [`MAX_RESAMPLE_ATTEMPTS`]; spending the budget surfaces an error
    /// instead of looping forever.
    pub fn replacement_candidate<R: Rng>(
        &self,
        category: &str,
        excluded: &HashSet<CandidateId>,
        rng: &mut R,
    ) -> Result<Arc<Candidate>, EvolutionError> {
        let candidates = self.pool.category(category);
        if candidates.is_empty() {
            return Err(EvolutionError::ExhaustedCandidatePool {
                category: category.to_string(),
                attempts: 0,
            });
        }
        for _ in 0..MAX_RESAMPLE_ATTEMPTS {
            let pick = &candidates[rng.gen_range(0..candidates.len())];
            if !excluded.contains(&pick.id) {
                return Ok(Arc::clone(pick));
            }
        }
        Err(EvolutionError::ExhaustedCandidatePool {
            category: category.to_string(),
            attempts: MAX_RESAMPLE_ATTEMPTS,
        })
    }
}
