//! Roulette-wheel selection
//!
//! Fitness-proportionate sampling over the current generation.

use rand::Rng;

use crate::error::EvolutionError;
use crate::team::Team;

/// Roulette wheel selection (fitness proportionate)
///
/// Each draw lands in `[0, S)` where `S` is the summed fitness of the
/// generation; walking the teams with a running cumulative sum picks the
/// first team at or past the draw. A team therefore wins slots in
/// proportion to its share of the total fitness.
#[derive(Clone, Copy, Debug, Default)]
pub struct RouletteSelection;

impl RouletteSelection {
    /// Create a new roulette selection
    pub fn new() -> Self {
        Self
    }

    /// Sample a next generation of `count` teams with replacement
    ///
    /// Fails with [`EvolutionError::DegeneratePopulation`] when the
    /// generation is empty or its total fitness is not a positive finite
    /// number, which would leave the wheel undefined.
    pub fn select_generation<R: Rng>(
        &self,
        generation: &[Team],
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Team>, EvolutionError> {
        let total: f64 = generation.iter().map(Team::fitness).sum();
        if generation.is_empty() || !total.is_finite() || total <= 0.0 {
            return Err(EvolutionError::DegeneratePopulation);
        }

        Ok((0..count)
            .map(|_| generation[self.spin(generation, total, rng)].clone())
            .collect())
    }

    /// One spin of the wheel
    fn spin<R: Rng>(&self, generation: &[Team], total: f64, rng: &mut R) -> usize {
        let draw = rng.gen_range(0.0..total);
        let mut cumulative = 0.0;
        for (index, team) in generation.iter().enumerate() {
            cumulative += team.fitness();
            if cumulative >= draw {
                return index;
            }
        }
        // Accumulated rounding can leave the final sum a hair under the
        // draw; the last slot takes it.
        generation.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::candidate::{AttributeWeights, Candidate, CandidatePool, TeamDefinition};
    use crate::population::PopulationManager;
    use crate::team::TeamId;

    /// One single-member team per score, so team fitness equals the score
    fn generation_with_scores(scores: &[f64]) -> Vec<Team> {
        let candidates: Vec<Candidate> = scores
            .iter()
            .enumerate()
            .map(|(i, &score)| {
                Candidate::new(i as u32 + 1, format!("member-{i}"), "solo")
                    .with_attribute("score", score)
            })
            .collect();
        let pool = CandidatePool::from_candidates(candidates).unwrap();
        let definition = TeamDefinition::new().with_count("solo", 1);
        let weights = AttributeWeights::new().with_weight("score", 1.0);
        let mut manager = PopulationManager::new(pool, definition, weights).unwrap();

        (0..scores.len())
            .map(|i| {
                let gene = std::sync::Arc::clone(&manager.pool().category("solo")[i]);
                manager.team_from_genes(vec![gene])
            })
            .collect()
    }

    #[test]
    fn test_selection_preserves_size() {
        let mut rng = StdRng::seed_from_u64(5);
        let generation = generation_with_scores(&[1.0, 2.0, 3.0, 4.0]);
        let selection = RouletteSelection::new();

        let selected = selection.select_generation(&generation, 4, &mut rng).unwrap();
        assert_eq!(selected.len(), 4);
    }

    #[test]
    fn test_selection_frequencies_follow_fitness_share() {
        const DRAWS: usize = 100_000;
        const TOLERANCE: f64 = 0.02;

        let mut rng = StdRng::seed_from_u64(42);
        let generation = generation_with_scores(&[1.0, 2.0, 7.0]);
        let selection = RouletteSelection::new();

        let selected = selection
            .select_generation(&generation, DRAWS, &mut rng)
            .unwrap();

        let mut counts: HashMap<TeamId, usize> = HashMap::new();
        for team in &selected {
            *counts.entry(team.id()).or_default() += 1;
        }

        let expected = [0.1, 0.2, 0.7];
        for (team, share) in generation.iter().zip(expected) {
            let observed = counts.get(&team.id()).copied().unwrap_or(0) as f64 / DRAWS as f64;
            assert!(
                (observed - share).abs() < TOLERANCE,
                "team with fitness {} selected {:.3} of the time, expected {:.3}",
                team.fitness(),
                observed,
                share
            );
        }
    }

    #[test]
    fn test_zero_total_fitness_is_degenerate() {
        let mut rng = StdRng::seed_from_u64(5);
        let generation = generation_with_scores(&[0.0, 0.0, 0.0]);
        let selection = RouletteSelection::new();

        let result = selection.select_generation(&generation, 3, &mut rng);
        assert_eq!(result.unwrap_err(), EvolutionError::DegeneratePopulation);
    }

    #[test]
    fn test_non_finite_total_fitness_is_degenerate() {
        let mut rng = StdRng::seed_from_u64(5);
        let selection = RouletteSelection::new();

        // A NaN fitness poisons the sum; the wheel must refuse to spin
        // instead of panicking on an unusable range.
        let generation = generation_with_scores(&[f64::NAN, 1.0, 2.0]);
        let result = selection.select_generation(&generation, 3, &mut rng);
        assert_eq!(result.unwrap_err(), EvolutionError::DegeneratePopulation);

        let generation = generation_with_scores(&[f64::INFINITY, 1.0, 2.0]);
        let result = selection.select_generation(&generation, 3, &mut rng);
        assert_eq!(result.unwrap_err(), EvolutionError::DegeneratePopulation);
    }

    #[test]
    fn test_empty_generation_is_degenerate() {
        let mut rng = StdRng::seed_from_u64(5);
        let selection = RouletteSelection::new();

        let result = selection.select_generation(&[], 3, &mut rng);
        assert_eq!(result.unwrap_err(), EvolutionError::DegeneratePopulation);
    }

    #[test]
    fn test_zero_fitness_teams_are_never_picked() {
        let mut rng = StdRng::seed_from_u64(17);
        let generation = generation_with_scores(&[0.0, 5.0, 0.0]);
        let selection = RouletteSelection::new();

        let selected = selection
            .select_generation(&generation, 1_000, &mut rng)
            .unwrap();
        let strong = generation[1].id();
        assert!(selected.iter().all(|team| team.id() == strong));
    }
}
