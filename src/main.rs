use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use team_evo::candidate::CandidateId;
use team_evo::config::FileConfig;
use team_evo::engine::{Evolution, RunOutcome};
use team_evo::population::PopulationManager;
use team_evo::progress::LogProgress;
use team_evo::roster::load_roster;

/// Evolutionary search for a high-scoring team composition
#[derive(Debug, Parser)]
#[command(name = "team-evo", version, about)]
struct Cli {
    /// Path to the run configuration
    #[arg(short, long, default_value = "conf/config.yaml")]
    config: PathBuf,

    /// Override the configured random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match FileConfig::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Cannot load {}: {}", cli.config.display(), err);
            process::exit(1);
        }
    };

    let roster = match load_roster(Path::new(&config.roster), &config.excluded_columns) {
        Ok(roster) => roster,
        Err(err) => {
            log::error!("Cannot load roster {}: {}", config.roster, err);
            process::exit(1);
        }
    };
    log::info!(
        "Roster: {} candidates in {} categories, {} attribute columns",
        roster.pool.len(),
        roster.pool.category_names().count(),
        roster.attributes.len()
    );
    for (attribute, _) in config.weights.iter() {
        if !roster.attributes.iter().any(|column| column == attribute) {
            log::warn!("Weighted attribute {attribute:?} is not a roster column; it will score 0");
        }
    }

    let manager =
        match PopulationManager::new(roster.pool, config.team.clone(), config.weights.clone()) {
            Ok(manager) => manager,
            Err(err) => {
                log::error!("Invalid run context: {err}");
                process::exit(1);
            }
        };
    let mut engine = match Evolution::new(manager, config.parameters) {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("Invalid run parameters: {err}");
            process::exit(1);
        }
    };

    let run = match cli.seed.or(config.seed) {
        Some(seed) => {
            log::info!("Running with fixed seed {seed}");
            let mut rng = StdRng::seed_from_u64(seed);
            engine.run_with(&mut rng, &mut LogProgress)
        }
        None => {
            let mut rng = rand::thread_rng();
            engine.run_with(&mut rng, &mut LogProgress)
        }
    };
    let outcome = match run {
        Ok(outcome) => outcome,
        Err(err) => {
            log::error!("Evolution failed: {err}");
            process::exit(1);
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&TeamReport::from_outcome(&outcome)) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                log::error!("Cannot serialize report: {err}");
                process::exit(1);
            }
        }
    } else {
        print_table(&outcome);
    }
}

fn print_table(outcome: &RunOutcome) {
    println!("Best team (fitness {:.4}):", outcome.best_team.fitness());
    for member in outcome.best_team.members() {
        println!("  {:<12} {} (id {})", member.category, member.name, member.id);
    }
    println!(
        "Stopped after {} generations: {}",
        outcome.generations,
        outcome.stop_reason.reason()
    );
}

#[derive(Serialize)]
struct TeamReport<'a> {
    fitness: f64,
    stop_reason: &'static str,
    generations: usize,
    last_improvement: usize,
    members: Vec<MemberReport<'a>>,
}

#[derive(Serialize)]
struct MemberReport<'a> {
    id: CandidateId,
    name: &'a str,
    category: &'a str,
    attributes: &'a BTreeMap<String, f64>,
}

impl<'a> TeamReport<'a> {
    fn from_outcome(outcome: &'a RunOutcome) -> Self {
        Self {
            fitness: outcome.best_team.fitness(),
            stop_reason: outcome.stop_reason.reason(),
            generations: outcome.generations,
            last_improvement: outcome.last_improvement,
            members: outcome
                .best_team
                .members()
                .iter()
                .map(|member| MemberReport {
                    id: member.id,
                    name: &member.name,
                    category: &member.category,
                    attributes: &member.attributes,
                })
                .collect(),
        }
    }
}
