//! Command-line driver: load a coordinate file, run a colony, print the
//! best-cost snapshots.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use u_antcolony::colony::{
    AcsEvaporation, ColonyConfig, ColonyObserver, ColonyVariant, DepositPolicy,
};
use u_antcolony::trials::run_trials;
use u_antcolony::tsp::{tsplib, BestTour};

/// Ant Colony Optimization for Euclidean TSP instances
#[derive(Parser, Debug)]
#[command(about, version, author)]
struct Args {
    /// TSPLIB coordinate file (EUC_2D)
    file: PathBuf,

    /// Colony algorithm: acs or eas
    #[arg(short, long, default_value = "acs")]
    algorithm: ColonyVariant,

    /// Number of ants
    #[arg(short = 'm', long)]
    ants: Option<usize>,

    /// Number of iterations
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Pheromone exponent
    #[arg(long)]
    alpha: Option<f64>,

    /// Distance exponent
    #[arg(long)]
    beta: Option<f64>,

    /// Evaporation rate in [0, 1]
    #[arg(long)]
    rho: Option<f64>,

    /// ACS local decay coefficient in [0, 1]
    #[arg(long)]
    epsilon: Option<f64>,

    /// ACS greedy-branch probability in [0, 1]
    #[arg(short, long)]
    q: Option<f64>,

    /// EAS elitist weight (defaults to the number of ants)
    #[arg(short, long)]
    elitist_weight: Option<f64>,

    /// EAS: sum deposits of ants sharing an edge instead of overwriting
    #[arg(long)]
    accumulate: bool,

    /// ACS: evaporate every edge in the global update
    #[arg(long)]
    evaporate_all: bool,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run this many trials and print per-snapshot medians
    #[arg(short, long)]
    trials: Option<usize>,

    /// Use rayon where available (EAS construction, trials)
    #[arg(long)]
    parallel: bool,

    /// Report every improvement on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> ColonyConfig {
        let mut config = ColonyConfig::default().with_parallel(self.parallel);
        if let Some(n) = self.ants {
            config = config.with_num_ants(n);
        }
        if let Some(n) = self.iterations {
            config = config.with_iterations(n);
        }
        if let Some(v) = self.alpha {
            config = config.with_alpha(v);
        }
        if let Some(v) = self.beta {
            config = config.with_beta(v);
        }
        if let Some(v) = self.rho {
            config = config.with_rho(v);
        }
        if let Some(v) = self.epsilon {
            config = config.with_epsilon(v);
        }
        if let Some(v) = self.q {
            config = config.with_q(v);
        }
        if let Some(v) = self.elitist_weight {
            config = config.with_elitist_weight(v);
        }
        if self.accumulate {
            config = config.with_deposit_policy(DepositPolicy::Accumulate);
        }
        if self.evaporate_all {
            config = config.with_acs_evaporation(AcsEvaporation::AllEdges);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

struct Progress;

impl ColonyObserver for Progress {
    fn on_improvement(&mut self, iteration: usize, best: &BestTour) {
        eprintln!("iteration {iteration:>5}: new best {:.4}", best.cost);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let instance = tsplib::load(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let config = args.config();
    let interval = config.snapshot_interval;

    eprintln!(
        "{} ({} cities), {} with {} ants for {} iterations",
        instance.name.as_deref().unwrap_or("instance"),
        instance.cities.len(),
        args.algorithm,
        config.num_ants,
        config.iterations,
    );

    let values = match args.trials {
        Some(trials) => {
            let summary = run_trials(&instance.cities, args.algorithm, &config, trials)?;
            eprintln!("{trials} trials from seed {}", summary.base_seed);
            summary.medians
        }
        None if args.verbose => {
            args.algorithm
                .optimize_with_observer(&instance.cities, &config, &mut Progress)?
        }
        None => args.algorithm.optimize(&instance.cities, &config)?,
    };

    for (k, value) in values.iter().enumerate() {
        println!("{}\t{value:.4}", (k + 1) * interval);
    }
    Ok(())
}
