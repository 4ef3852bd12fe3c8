//! Team chromosome
//!
//! A team is one candidate solution: an ordered gene sequence whose shape
//! follows the team definition, with the fitness computed once at
//! construction and cached.

use std::collections::HashSet;
use std::sync::Arc;

use crate::candidate::Candidate;

/// Identity assigned to a team by the population manager
pub type TeamId = u64;

/// A candidate solution
///
/// Teams never change after construction. A team whose members repeat a
/// candidate id is structurally valid but carries fitness 0, a lethal
/// score the elitist merge culls naturally.
#[derive(Clone, Debug)]
pub struct Team {
    id: TeamId,
    members: Vec<Arc<Candidate>>,
    fitness: f64,
}

impl Team {
    pub(crate) fn new(id: TeamId, members: Vec<Arc<Candidate>>, fitness: f64) -> Self {
        Self { id, members, fitness }
    }

    /// Identity of this team
    pub fn id(&self) -> TeamId {
        self.id
    }

    /// Ordered gene sequence
    pub fn members(&self) -> &[Arc<Candidate>] {
        &self.members
    }

    /// Cached fitness
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Number of genes
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the team has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// True when no candidate id repeats across the members
    pub fn has_unique_members(&self) -> bool {
        unique_member_ids(&self.members)
    }

    /// Strict fitness comparison used for best-ever tracking
    pub fn is_better_than(&self, other: &Team) -> bool {
        self.fitness > other.fitness
    }
}

/// True when every candidate id in the gene sequence is distinct
pub(crate) fn unique_member_ids(members: &[Arc<Candidate>]) -> bool {
    let mut seen = HashSet::with_capacity(members.len());
    members.iter().all(|member| seen.insert(member.id))
}
