//! Generation driver
//!
//! Runs the evolutionary loop: selection, crossover, mutation, elitist
//! merge, and refill, generation after generation until the cap or the
//! stagnation policy stops it.

use std::cmp::Ordering;

use rand::Rng;

use crate::config::RunParameters;
use crate::error::EvoResult;
use crate::operators::crossover::SinglePointCrossover;
use crate::operators::mutation::GeneResampleMutation;
use crate::operators::selection::RouletteSelection;
use crate::population::PopulationManager;
use crate::progress::{GenerationSnapshot, NoProgress, ProgressObserver};
use crate::team::Team;
use crate::termination::ImprovementRecord;

/// Share of the population carried over by the elitist merge
pub const SURVIVOR_FRACTION: f64 = 0.7;

/// Why a run stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The configured generation cap was reached
    GenerationCap,
    /// The stagnation policy called the run stalled
    Stagnation,
}

impl StopReason {
    /// Human-readable reason for the stop
    pub fn reason(&self) -> &'static str {
        match self {
            StopReason::GenerationCap => "Maximum generations reached",
            StopReason::Stagnation => "Fitness stagnation detected",
        }
    }
}

/// Result of a completed run
#[derive(Clone, Debug)]
pub struct RunOutcome {
    /// Best team found across all generations
    pub best_team: Team,
    /// Number of evolution cycles completed
    pub generations: usize,
    /// Generation index of the last recorded significant improvement
    pub last_improvement: usize,
    /// Why the run ended
    pub stop_reason: StopReason,
}

/// The evolutionary search engine
///
/// Owns the population manager and the three genetic operators, and
/// drives them through the generational loop. The random source is
/// passed into [`Evolution::run`] explicitly, so a seeded generator
/// reproduces a run exactly.
#[derive(Clone, Debug)]
pub struct Evolution {
    manager: PopulationManager,
    params: RunParameters,
    selection: RouletteSelection,
    crossover: SinglePointCrossover,
    mutation: GeneResampleMutation,
}

impl Evolution {
    /// Create an engine over a validated manager and parameter set
    pub fn new(manager: PopulationManager, params: RunParameters) -> EvoResult<Self> {
        params.validate()?;
        Ok(Self {
            manager,
            params,
            selection: RouletteSelection::new(),
            crossover: SinglePointCrossover::new(params.crossover_rate),
            mutation: GeneResampleMutation::new(params.mutation_rate),
        })
    }

    /// The parameters this engine runs with
    pub fn params(&self) -> &RunParameters {
        &self.params
    }

    /// Run to termination without progress reporting
    pub fn run<R: Rng>(&mut self, rng: &mut R) -> EvoResult<RunOutcome> {
        self.run_with(rng, &mut NoProgress)
    }

    /// Run to termination, reporting each generation to `observer`
    pub fn run_with<R: Rng>(
        &mut self,
        rng: &mut R,
        observer: &mut dyn ProgressObserver,
    ) -> EvoResult<RunOutcome> {
        let size = self.params.population_size;
        log::debug!(
            "Starting evolution: population {}, crossover rate {}, mutation rate {}, cap {}",
            size,
            self.params.crossover_rate,
            self.params.mutation_rate,
            self.params.max_generations
        );

        let mut generation = self.manager.random_generation(size, rng);
        let mut best_team = fittest_of(&generation).clone();
        let mut record = ImprovementRecord::starting_at(best_team.fitness());
        observer.on_generation(&GenerationSnapshot {
            generation: 0,
            current_fittest: &best_team,
            best_ever: &best_team,
        });

        let mut completed = 0;
        let mut stop_reason = StopReason::GenerationCap;
        for index in 1..=self.params.max_generations {
            let selected = self.selection.select_generation(&generation, size, rng)?;
            let offspring = self
                .crossover
                .recombine_generation(&selected, &mut self.manager, rng);
            let offspring = self.mutation.mutate_generation(offspring, &mut self.manager, rng)?;
            generation = self.merge_and_refill(generation, offspring, rng);
            completed = index;

            let current = fittest_of(&generation);
            if current.is_better_than(&best_team) {
                best_team = current.clone();
            }
            observer.on_generation(&GenerationSnapshot {
                generation: index,
                current_fittest: current,
                best_ever: &best_team,
            });

            if self
                .params
                .stagnation
                .is_significant_gain(record.fitness, best_team.fitness())
            {
                record.advance(index, best_team.fitness());
            }
            if self.params.stagnation.is_stagnant(index, &record) {
                stop_reason = StopReason::Stagnation;
                break;
            }
        }

        log::debug!(
            "Run stopped after {} generations: {}",
            completed,
            stop_reason.reason()
        );
        Ok(RunOutcome {
            best_team,
            generations: completed,
            last_improvement: record.generation,
            stop_reason,
        })
    }

    /// Elitist merge of survivors and offspring, refilled to size
    ///
    /// Keeps the top `ceil(0.7 * size)` strictly-positive teams from the
    /// combined pool, so zero-fitness teams are never propagated, then
    /// tops the generation back up with fresh random teams.
    fn merge_and_refill<R: Rng>(
        &mut self,
        survivors: Vec<Team>,
        offspring: Vec<Team>,
        rng: &mut R,
    ) -> Vec<Team> {
        let size = self.params.population_size;
        let keep = (SURVIVOR_FRACTION * size as f64).ceil() as usize;

        let mut combined = survivors;
        combined.extend(offspring);
        combined.sort_by(|a, b| {
            a.fitness()
                .partial_cmp(&b.fitness())
                .unwrap_or(Ordering::Equal)
        });

        let mut next: Vec<Team> = combined
            .into_iter()
            .rev()
            .filter(|team| team.fitness() > 0.0)
            .take(keep)
            .collect();
        while next.len() < size {
            next.push(self.manager.random_team(rng));
        }
        next
    }
}

/// Fittest team of a generation
fn fittest_of(generation: &[Team]) -> &Team {
    generation
        .iter()
        .max_by(|a, b| {
            a.fitness()
                .partial_cmp(&b.fitness())
                .unwrap_or(Ordering::Equal)
        })
        .expect("generation is never empty")
}
