//! Ant Colony System orchestrator.

use super::ant::{initial_pheromone, Ant};
use super::config::ColonyConfig;
use super::observer::{ColonyObserver, NoopObserver};
use super::pheromone::PheromoneStore;
use crate::error::AcoResult;
use crate::tsp::{BestTour, City, DistanceTable};
use u_numflow::random::create_rng;

/// Ant Colony System (Dorigo & Gambardella, 1997).
///
/// Ants build tours one after another with the pseudorandom proportional
/// rule, each step applying a local update, so an ant sees the decay left
/// by the ants before it in the same iteration. After every sweep the
/// best tour found so far is reinforced by the global update.
///
/// # Examples
///
/// ```
/// use u_antcolony::colony::{AntColonySystem, ColonyConfig};
/// use u_antcolony::tsp::City;
///
/// let cities: Vec<City> = (0..8)
///     .map(|i| {
///         let a = i as f64 * std::f64::consts::TAU / 8.0;
///         City::new(i, a.cos(), a.sin())
///     })
///     .collect();
/// let config = ColonyConfig::default().with_num_ants(8).with_iterations(30).with_seed(1);
/// let mut acs = AntColonySystem::new(&cities, config).unwrap();
/// let snapshots = acs.optimize().unwrap();
/// assert_eq!(snapshots.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct AntColonySystem {
    config: ColonyConfig,
    distances: DistanceTable,
    pheromone: PheromoneStore,
    tau_not: f64,
    ants: Vec<Ant>,
    best: Option<BestTour>,
    seed: u64,
}

impl AntColonySystem {
    /// Validates `config`, builds the distance table, seeds τ₀ from a
    /// greedy tour and creates the ant population.
    ///
    /// # Errors
    ///
    /// - [`AcoError::Configuration`](crate::AcoError::Configuration) before
    ///   anything is allocated
    /// - [`AcoError::NonFiniteDeposit`](crate::AcoError::NonFiniteDeposit)
    ///   if the greedy tour has zero length
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
    /// Each call restarts from the uniform τ₀ state with the same seed, so
    /// repeated calls return identical results.
    pub fn optimize(&mut self) -> AcoResult<Vec<f64>> {
        self.optimize_with_observer(&mut NoopObserver)
    }

    /// [`optimize`](Self::optimize) reporting progress to `observer`.
    ///
    /// # Errors
    ///
    /// Aborts with [`AcoError::InvalidTour`](crate::AcoError::InvalidTour) or
    /// [`AcoError::NonFiniteDeposit`](crate::AcoError::NonFiniteDeposit) on a
    /// violated invariant.
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
            // Sequential on purpose: each ant's local updates steer the next.
            for ant in &mut self.ants {
                let cost = ant.construct_acs(
                    &self.distances,
                    &mut self.pheromone,
                    self.config.q,
                    &mut rng,
                )?;
                if self.best.as_ref().is_none_or(|b| cost < b.cost) {
                    self.best = ant.snapshot();
                    if let Some(best) = &self.best {
                        observer.on_improvement(iteration, best);
                    }
                }
            }

            let best_cost = match &self.best {
                Some(best) => {
                    self.pheromone.global_update_acs(best)?;
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

    /// τ₀ derived from the greedy tour.
    pub fn tau_not(&self) -> f64 {
        self.tau_not
    }

    /// Seed of the run's random stream.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &ColonyConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::{AcsEvaporation, CostHistory};
    use crate::error::AcoError;

    fn pentagon() -> Vec<City> {
        (0..5)
            .map(|i| {
                let a = 2.0 * std::f64::consts::PI * i as f64 / 5.0;
                City::new(i + 1, a.cos(), a.sin())
            })
            .collect()
    }

    /// Perimeter of the unit-circumradius regular pentagon.
    fn pentagon_optimum() -> f64 {
        10.0 * (std::f64::consts::PI / 5.0).sin()
    }

    fn random_cities(n: usize, seed: u64) -> Vec<City> {
        use rand::Rng;
        let mut rng = create_rng(seed);
        (0..n)
            .map(|i| City::new(i as i64, rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect()
    }

    #[test]
    fn test_pentagon_end_to_end() {
        let config = ColonyConfig::default()
            .with_num_ants(5)
            .with_iterations(20)
            .with_seed(42);
        let mut acs = AntColonySystem::new(&pentagon(), config).unwrap();
        let snapshots = acs.optimize().unwrap();

        assert_eq!(snapshots.len(), 2);
        assert!(snapshots[1] <= snapshots[0]);
        for &s in &snapshots {
            assert!(s >= pentagon_optimum() - 1e-9, "{s} below optimum");
        }
        let best = acs.best().unwrap();
        assert_eq!(best.cost, snapshots[1]);
        assert_eq!(acs.best_tour().unwrap().len(), 5);
    }

    #[test]
    fn test_same_seed_is_bit_identical() {
        let cities = random_cities(15, 9);
        let config = ColonyConfig::default()
            .with_num_ants(6)
            .with_iterations(40)
            .with_seed(2024);
        let a = AntColonySystem::new(&cities, config.clone()).unwrap().optimize().unwrap();
        let b = AntColonySystem::new(&cities, config).unwrap().optimize().unwrap();
        assert_eq!(a.len(), 4);
        assert_eq!(
            a.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
            b.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_repeated_optimize_restarts() {
        let config = ColonyConfig::default().with_iterations(30).with_seed(5);
        let mut acs = AntColonySystem::new(&random_cities(12, 1), config).unwrap();
        let first = acs.optimize().unwrap();
        let first_pheromone = acs.pheromone_matrix();
        let second = acs.optimize().unwrap();
        assert_eq!(first, second);
        assert_eq!(first_pheromone, acs.pheromone_matrix());
    }

    #[test]
    fn test_snapshot_count_floor() {
        let config = ColonyConfig::default().with_iterations(25).with_seed(3);
        let mut acs = AntColonySystem::new(&pentagon(), config).unwrap();
        assert_eq!(acs.optimize().unwrap().len(), 2);

        let config = ColonyConfig::default().with_iterations(7).with_seed(3);
        let mut acs = AntColonySystem::new(&pentagon(), config).unwrap();
        assert!(acs.optimize().unwrap().is_empty());
        assert!(acs.best().is_some());
    }

    #[test]
    fn test_history_non_increasing_and_pheromone_valid() {
        let config = ColonyConfig::default()
            .with_num_ants(8)
            .with_iterations(60)
            .with_beta(3.0)
            .with_seed(77)
            .with_acs_evaporation(AcsEvaporation::AllEdges);
        let mut acs = AntColonySystem::new(&random_cities(20, 4), config).unwrap();
        let mut history = CostHistory::default();
        acs.optimize_with_observer(&mut history).unwrap();

        assert_eq!(history.costs.len(), 60);
        assert!(history.improvements >= 1);
        for w in history.costs.windows(2) {
            assert!(w[1] <= w[0]);
        }
        assert!(acs
            .pheromone_matrix()
            .iter()
            .flatten()
            .all(|&v| v.is_finite() && v >= 0.0));
    }

    #[test]
    fn test_best_matches_its_tour() {
        let cities = random_cities(10, 8);
        let config = ColonyConfig::default().with_iterations(20).with_seed(8);
        let mut acs = AntColonySystem::new(&cities, config).unwrap();
        acs.optimize().unwrap();
        let best = acs.best().unwrap();
        let recomputed = crate::colony::Ant::evaluate(best.tour.order(), acs.distances());
        assert!((best.cost - recomputed).abs() <= 1e-9 * recomputed);
    }

    #[test]
    fn test_accessors() {
        let config = ColonyConfig::default().with_seed(11);
        let acs = AntColonySystem::new(&pentagon(), config).unwrap();
        assert_eq!(acs.seed(), 11);
        assert_eq!(acs.distance_matrix().len(), 5);
        assert!(acs
            .pheromone_matrix()
            .iter()
            .flatten()
            .all(|&v| v == acs.tau_not()));
        assert!(acs.best_tour().is_none());
    }

    #[test]
    fn test_rejects_single_city() {
        let err = AntColonySystem::new(&[City::new(1, 0.0, 0.0)], ColonyConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            AcoError::Configuration { parameter: "num_cities", .. }
        ));
    }

    #[test]
    fn test_rejects_degenerate_instance() {
        let cities = vec![City::new(1, 1.0, 1.0); 4];
        let err = AntColonySystem::new(&cities, ColonyConfig::default()).unwrap_err();
        assert!(matches!(err, AcoError::NonFiniteDeposit { .. }));
    }
}
