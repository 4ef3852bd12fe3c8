//! Single-point crossover
//!
//! Recombines sequential pairs of selected teams by swapping member
//! tails at a random cut point.

use std::sync::Arc;

use rand::Rng;

use crate::candidate::Candidate;
use crate::population::PopulationManager;
use crate::team::Team;

/// Single-point crossover over team member sequences
///
/// Each sequential pair of parents recombines with probability `rate`.
/// A cut point is drawn from `[0, len)`; an interior cut swaps the
/// member tails of the two parents, while a cut of zero reproduces both
/// parents unchanged. Pairs that skip recombination pass through as
/// clones.
#[derive(Clone, Copy, Debug)]
pub struct SinglePointCrossover {
    /// Probability that a pair recombines
    pub rate: f64,
}

impl SinglePointCrossover {
    /// Create a new single-point crossover with the given rate
    pub fn new(rate: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&rate),
            "Crossover rate must be in [0, 1]"
        );
        Self { rate }
    }

    /// Swap the member tails of two parents at `point`
    ///
    /// A point of zero or past the end reproduces both parents as-is.
    /// Cutting both parents at the same position keeps every slot's
    /// category intact, so children always have a valid team shape.
    pub fn exchange_tails(
        parent1: &[Arc<Candidate>],
        parent2: &[Arc<Candidate>],
        point: usize,
    ) -> (Vec<Arc<Candidate>>, Vec<Arc<Candidate>>) {
        if point == 0 || point >= parent1.len() {
            return (parent1.to_vec(), parent2.to_vec());
        }

        let mut child1 = parent1[..point].to_vec();
        child1.extend_from_slice(&parent2[point..]);
        let mut child2 = parent2[..point].to_vec();
        child2.extend_from_slice(&parent1[point..]);
        (child1, child2)
    }

    /// Recombine one pair of parents into two offspring
    ///
    /// Recombined offspring are scored and issued fresh team ids by the
    /// manager; a skipped pair is returned as clones of the parents.
    pub fn recombine_pair<R: Rng>(
        &self,
        parent1: &Team,
        parent2: &Team,
        manager: &mut PopulationManager,
        rng: &mut R,
    ) -> (Team, Team) {
        let length = parent1.len();
        if length > 0 && rng.gen::<f64>() < self.rate {
            let point = rng.gen_range(0..length);
            if point > 0 {
                let (genes1, genes2) =
                    Self::exchange_tails(parent1.members(), parent2.members(), point);
                return (
                    manager.team_from_genes(genes1),
                    manager.team_from_genes(genes2),
                );
            }
        }
        (parent1.clone(), parent2.clone())
    }

    /// Recombine a selected generation pairwise
    ///
    /// Teams pair up in order; with an odd count the trailing team is
    /// carried over unchanged.
    pub fn recombine_generation<R: Rng>(
        &self,
        selected: &[Team],
        manager: &mut PopulationManager,
        rng: &mut R,
    ) -> Vec<Team> {
        let mut offspring = Vec::with_capacity(selected.len());
        let mut pairs = selected.chunks_exact(2);
        for pair in &mut pairs {
            let (first, second) = self.recombine_pair(&pair[0], &pair[1], manager, rng);
            offspring.push(first);
            offspring.push(second);
        }
        if let [last] = pairs.remainder() {
            offspring.push(last.clone());
        }
        offspring
    }
}
