//! Elitist Ant System orchestrator.

use super::ant::{initial_pheromone, Ant};
use super::config::ColonyConfig;
use super::observer::{ColonyObserver, NoopObserver};
use super::pheromone::PheromoneStore;
use crate::error::AcoResult;
use crate::tsp::{BestTour, City, DistanceTable};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use u_numflow::random::create_rng;

/// Elitist Ant System (Dorigo, Maniezzo & Colorni, 1996).
///
/// Ants build tours with the pure roulette rule against a pheromone matrix
/// that stays fixed for the whole sweep. Their deposits are buffered and
/// folded in by one global update per iteration, together with an extra
/// reinforcement of the best tour so far weighted by the elitist weight.
///
/// Because the matrix is read-only during a sweep, tour construction can
/// run on rayon (feature `parallel`, [`ColonyConfig::parallel`]). Each ant
/// then draws from its own stream seeded from the run's stream in ant order,
/// and deposits are still applied one ant at a time in ant order.
///
/// # Examples
///
/// ```
/// use u_antcolony::colony::{ColonyConfig, ElitistAntSystem};
/// use u_antcolony::tsp::City;
///
/// let cities: Vec<City> = (0..8)
///     .map(|i| {
///         let a = i as f64 * std::f64::consts::TAU / 8.0;
///         City::new(i, a.cos(), a.sin())
///     })
///     .collect();
/// let config = ColonyConfig::default().with_num_ants(8).with_iterations(20).with_seed(1);
/// let mut eas = ElitistAntSystem::new(&cities, config).unwrap();
/// assert_eq!(eas.elitist_weight(), 8.0);
/// let snapshots = eas.optimize().unwrap();
/// assert_eq!(snapshots.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ElitistAntSystem {
    config: ColonyConfig,
    distances: DistanceTable,
    pheromone: PheromoneStore,
    tau_not: f64,
    ants: Vec<Ant>,
    best: Option<BestTour>,
    seed: u64,
}

impl ElitistAntSystem {
    /// Validates `config`, builds the distance table, seeds τ₀ from a
    /// greedy tour and creates the ant population.
    ///
    /// The elitist weight defaults to the population size when
    /// [`ColonyConfig::elitist_weight`] is `None`.
    pub fn new(cities: &[City], config: ColonyConfig) -> AcoResult<Self> {
        config.validate(cities.len())?;

        let distances = DistanceTable::build(cities);
        let tau_not = initial_pheromone(&distances)?;
        let mut pheromone = PheromoneStore::new(distances.size(), &config);
        pheromone.initialize_uniform(tau_not);
        let ants = (0..config.num_ants).map(Ant::new).collect();
        let seed = config.seed.unwrap_or_else(rand::random);

        Ok(Self {
            config,
            distances,
            pheromone,
            tau_not,
            ants,
            best: None,
            seed,
        })
    }

    /// Runs the configured number of iterations and returns the best cost
    /// recorded every `snapshot_interval` iterations.
    ///
    /// Each call restarts from the uniform τ₀ state with the same seed.
    pub fn optimize(&mut self) -> AcoResult<Vec<f64>> {
        self.optimize_with_observer(&mut NoopObserver)
    }

    /// [`optimize`](Self::optimize) reporting progress to `observer`.
    pub fn optimize_with_observer<O: ColonyObserver + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> AcoResult<Vec<f64>> {
        self.pheromone.initialize_uniform(self.tau_not);
        self.best = None;

        let mut rng = create_rng(self.seed);
        let interval = self.config.snapshot_interval;
        let mut snapshots = Vec::with_capacity(self.config.iterations / interval);

        for iteration in 1..=self.config.iterations {
            let costs = self.construct_tours(&mut rng)?;

            for (ant, cost) in self.ants.iter().zip(costs) {
                if let Some(tour) = ant.tour() {
                    self.pheromone.deposit_iteration(tour, cost)?;
                }
                if self.best.as_ref().is_none_or(|b| cost < b.cost) {
                    self.best = ant.snapshot();
                    if let Some(best) = &self.best {
                        observer.on_improvement(iteration, best);
                    }
                }
            }

            let best_cost = match &self.best {
                Some(best) => {
                    self.pheromone.global_update_eas(best)?;
                    best.cost
                }
                None => f64::INFINITY,
            };

            observer.on_iteration(iteration, best_cost);
            if iteration.is_multiple_of(interval) {
                snapshots.push(best_cost);
            }
        }

        Ok(snapshots)
    }

    /// One construction sweep; returns the tour cost of every ant in order.
    fn construct_tours<R: Rng>(&mut self, rng: &mut R) -> AcoResult<Vec<f64>> {
        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                let seeds: Vec<u64> = (0..self.ants.len()).map(|_| rng.random()).collect();
                let distances = &self.distances;
                let pheromone = &self.pheromone;
                return self
                    .ants
                    .par_iter_mut()
                    .zip(seeds.into_par_iter())
                    .map(|(ant, seed)| {
                        let mut ant_rng = create_rng(seed);
                        ant.construct_eas(distances, pheromone, &mut ant_rng)
                    })
                    .collect();
            }
        }

        self.ants
            .iter_mut()
            .map(|ant| ant.construct_eas(&self.distances, &self.pheromone, &mut *rng))
            .collect()
    }

    /// Elitist weight applied to the best tour's reinforcement.
    pub fn elitist_weight(&self) -> f64 {
        self.config.effective_elitist_weight()
    }

    /// Best tour found by the last run.
    pub fn best(&self) -> Option<BestTour> {
        self.best.clone()
    }

    /// City order of the best tour found by the last run.
    pub fn best_tour(&self) -> Option<Vec<usize>> {
        self.best.as_ref().map(|b| b.tour.order().to_vec())
    }

    /// Copy of the distance matrix.
    pub fn distance_matrix(&self) -> Vec<Vec<f64>> {
        self.distances.to_rows()
    }

    /// Copy of the current pheromone matrix.
    pub fn pheromone_matrix(&self) -> Vec<Vec<f64>> {
        self.pheromone.to_rows()
    }

    pub fn distances(&self) -> &DistanceTable {
        &self.distances
    }

    pub fn pheromone(&self) -> &PheromoneStore {
        &self.pheromone
    }

    pub fn tau_not(&self) -> f64 {
        self.tau_not
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &ColonyConfig {
        &self.config
    }
}
