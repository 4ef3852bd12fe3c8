//! Gene-resample mutation
//!
//! Replaces marked team members with unused candidates drawn from the
//! same category.

use std::collections::HashSet;

use rand::Rng;

use crate::candidate::CandidateId;
use crate::error::EvolutionError;
use crate::population::PopulationManager;
use crate::team::Team;

/// Per-member resample mutation
///
/// Each member position is marked independently with probability `rate`.
/// Marked positions are refilled from the member's own category, skipping
/// every candidate the team has already committed to, so mutation never
/// introduces a duplicate member. A team with no marked positions passes
/// through as a clone.
#[derive(Clone, Copy, Debug)]
pub struct GeneResampleMutation {
    /// Per-member mutation probability
    pub rate: f64,
}

impl GeneResampleMutation {
    /// Create a new resample mutation with the given rate
    pub fn new(rate: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&rate),
            "Mutation rate must be in [0, 1]"
        );
        Self { rate }
    }

    /// Mutate one team
    ///
    /// Marks positions by rate, then resamples the marked ones. Fails
    /// with [`EvolutionError::ExhaustedCandidatePool`] when a category
    /// has no unused candidate to offer within the resample budget.
    pub fn mutate_team<R: Rng>(
        &self,
        team: &Team,
        manager: &mut PopulationManager,
        rng: &mut R,
    ) -> Result<Team, EvolutionError> {
        let marked: Vec<usize> = (0..team.len())
            .filter(|_| rng.gen::<f64>() < self.rate)
            .collect();
        if marked.is_empty() {
            return Ok(team.clone());
        }
        self.replace_marked(team, &marked, manager, rng)
    }

    /// Resample the members at `marked` positions
    ///
    /// The exclusion set starts from every member the team keeps, then
    /// grows with each replacement as it commits.
    pub fn replace_marked<R: Rng>(
        &self,
        team: &Team,
        marked: &[usize],
        manager: &mut PopulationManager,
        rng: &mut R,
    ) -> Result<Team, EvolutionError> {
        let marked: HashSet<usize> = marked.iter().copied().collect();
        let mut excluded: HashSet<CandidateId> = team
            .members()
            .iter()
            .enumerate()
            .filter(|(position, _)| !marked.contains(position))
            .map(|(_, member)| member.id)
            .collect();

        let mut genes = Vec::with_capacity(team.len());
        for (position, member) in team.members().iter().enumerate() {
            if marked.contains(&position) {
                let replacement = manager.replacement_candidate(&member.category, &excluded, rng)?;
                excluded.insert(replacement.id);
                genes.push(replacement);
            } else {
                genes.push(std::sync::Arc::clone(member));
            }
        }

        Ok(manager.team_from_genes(genes))
    }

    /// Mutate a whole generation of offspring
    pub fn mutate_generation<R: Rng>(
        &self,
        offspring: Vec<Team>,
        manager: &mut PopulationManager,
        rng: &mut R,
    ) -> Result<Vec<Team>, EvolutionError> {
        offspring
            .into_iter()
            .map(|team| self.mutate_team(&team, manager, rng))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::candidate::{AttributeWeights, Candidate, CandidatePool, TeamDefinition};
    use crate::team::unique_member_ids;

    fn manager_with_pool(per_category: usize) -> PopulationManager {
        let mut candidates = Vec::new();
        for i in 0..per_category {
            candidates.push(
                Candidate::new(i as u32 + 1, format!("dev-{i}"), "developer")
                    .with_attribute("experience", i as f64 + 1.0),
            );
            candidates.push(
                Candidate::new(i as u32 + 101, format!("des-{i}"), "designer")
                    .with_attribute("experience", i as f64 + 1.0),
            );
        }
        let pool = CandidatePool::from_candidates(candidates).unwrap();
        let definition = TeamDefinition::new()
            .with_count("developer", 2)
            .with_count("designer", 1);
        let weights = AttributeWeights::new().with_weight("experience", 1.0);
        PopulationManager::new(pool, definition, weights).unwrap()
    }

    fn ids(team: &Team) -> Vec<u32> {
        team.members().iter().map(|member| member.id).collect()
    }

    #[test]
    fn test_zero_rate_clones_team() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut manager = manager_with_pool(6);
        let mutation = GeneResampleMutation::new(0.0);

        let team = manager.random_team(&mut rng);
        let mutated = mutation.mutate_team(&team, &mut manager, &mut rng).unwrap();

        assert_eq!(mutated.id(), team.id());
        assert_eq!(ids(&mutated), ids(&team));
    }

    #[test]
    fn test_full_rate_resamples_every_member() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut manager = manager_with_pool(8);
        let mutation = GeneResampleMutation::new(1.0);

        let team = manager.random_team(&mut rng);
        let mutated = mutation.mutate_team(&team, &mut manager, &mut rng).unwrap();

        assert_eq!(mutated.len(), team.len());
        assert!(unique_member_ids(mutated.members()));
        for (before, after) in team.members().iter().zip(mutated.members()) {
            assert_eq!(before.category, after.category);
        }
    }

    #[test]
    fn test_mutation_never_introduces_duplicates() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut manager = manager_with_pool(4);
        let mutation = GeneResampleMutation::new(0.5);

        for _ in 0..200 {
            let team = manager.random_team(&mut rng);
            let mutated = mutation.mutate_team(&team, &mut manager, &mut rng).unwrap();
            assert!(unique_member_ids(mutated.members()));
        }
    }

    #[test]
    fn test_replace_marked_keeps_unmarked_members() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut manager = manager_with_pool(6);
        let mutation = GeneResampleMutation::new(1.0);

        let team = manager.random_team(&mut rng);
        let mutated = mutation
            .replace_marked(&team, &[1], &mut manager, &mut rng)
            .unwrap();

        assert_eq!(mutated.members()[0].id, team.members()[0].id);
        assert_eq!(mutated.members()[2].id, team.members()[2].id);
        assert_eq!(mutated.members()[1].category, "developer");
        assert!(unique_member_ids(mutated.members()));
    }

    #[test]
    fn test_tight_pool_returns_the_marked_member() {
        let mut rng = StdRng::seed_from_u64(3);
        // Two developers, both on the team. Marking one drops it from the
        // in-progress team, so the resample's only legal draw is the
        // marked member itself.
        let candidates = vec![
            Candidate::new(1, "a", "developer").with_attribute("experience", 1.0),
            Candidate::new(2, "b", "developer").with_attribute("experience", 2.0),
        ];
        let pool = CandidatePool::from_candidates(candidates).unwrap();
        let definition = TeamDefinition::new().with_count("developer", 2);
        let weights = AttributeWeights::new().with_weight("experience", 1.0);
        let mut manager = PopulationManager::new(pool, definition, weights).unwrap();
        let mutation = GeneResampleMutation::new(1.0);

        let team = manager.random_team(&mut rng);
        let mutated = mutation
            .replace_marked(&team, &[0], &mut manager, &mut rng)
            .unwrap();

        assert_eq!(ids(&mutated), ids(&team));
        assert_ne!(mutated.id(), team.id());
        assert!(unique_member_ids(mutated.members()));
    }

    #[test]
    fn test_mutate_generation_preserves_count() {
        let mut rng = StdRng::seed_from_u64(31);
        let mut manager = manager_with_pool(8);
        let mutation = GeneResampleMutation::new(0.3);

        let offspring = manager.random_generation(10, &mut rng);
        let mutated = mutation
            .mutate_generation(offspring, &mut manager, &mut rng)
            .unwrap();
        assert_eq!(mutated.len(), 10);
    }

    #[test]
    #[should_panic(expected = "Mutation rate must be in [0, 1]")]
    fn test_negative_rate_panics() {
        GeneResampleMutation::new(-0.1);
    }
}
