//! Colony configuration.
//!
//! [`ColonyConfig`] holds every parameter of a run. The same configuration
//! drives both [`AntColonySystem`](super::AntColonySystem) and
//! [`ElitistAntSystem`](super::ElitistAntSystem); each variant reads only
//! the fields it needs.

use crate::error::{AcoError, AcoResult};

/// How ants of one EAS iteration combine deposits on a shared edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DepositPolicy {
    /// Each ant writes `1/cost` over the buffer entry; the last writer wins.
    ///
    /// Under-counts edges shared by several ants of the same iteration.
    #[default]
    Overwrite,

    /// Each ant adds `1/cost` to the buffer entry (textbook Ant System).
    Accumulate,
}

/// Which edges the ACS global update evaporates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AcsEvaporation {
    /// Only edges of the best tour are touched:
    /// `p = (1 - rho) * p + rho / best_cost`. Other edges were already
    /// decayed by local updates during construction.
    #[default]
    TourEdgesOnly,

    /// Every edge is evaporated to `(1 - rho) * p`; best-tour edges then
    /// also receive `rho / best_cost`.
    AllEdges,
}

/// Configuration for an Ant Colony Optimization run.
///
/// # Examples
///
/// ```
/// use u_antcolony::colony::{ColonyConfig, DepositPolicy};
///
/// let config = ColonyConfig::default()
///     .with_num_ants(30)
///     .with_iterations(200)
///     .with_beta(5.0)
///     .with_deposit_policy(DepositPolicy::Accumulate)
///     .with_seed(42);
/// assert!(config.validate(50).is_ok());
/// assert_eq!(config.effective_elitist_weight(), 30.0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColonyConfig {
    /// Number of ants constructing a tour each iteration.
    pub num_ants: usize,

    /// Number of iterations of the main loop.
    pub iterations: usize,

    /// Pheromone exponent. Typical: 1.0.
    pub alpha: f64,

    /// Heuristic (inverse distance) exponent. Typical: 2.0–5.0.
    pub beta: f64,

    /// Evaporation rate of the global update, in [0, 1].
    pub rho: f64,

    /// ACS local-decay coefficient, in [0, 1].
    pub epsilon: f64,

    /// ACS probability of taking the greedy branch, in [0, 1].
    pub q: f64,

    /// EAS reinforcement multiplier for the best tour.
    ///
    /// `None` uses the population size.
    pub elitist_weight: Option<f64>,

    /// EAS deposit conflict policy.
    pub deposit_policy: DepositPolicy,

    /// ACS global-update scope.
    pub acs_evaporation: AcsEvaporation,

    /// A best-cost snapshot is recorded every this many iterations.
    pub snapshot_interval: usize,

    /// Construct EAS tours in parallel (requires the `parallel` feature;
    /// ignored otherwise).
    pub parallel: bool,

    /// Random seed. `None` draws one when the colony is created.
    pub seed: Option<u64>,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            num_ants: 10,
            iterations: 100,
            alpha: 1.0,
            beta: 2.0,
            rho: 0.1,
            epsilon: 0.1,
            q: 0.9,
            elitist_weight: None,
            deposit_policy: DepositPolicy::default(),
            acs_evaporation: AcsEvaporation::default(),
            snapshot_interval: 10,
            parallel: false,
            seed: None,
        }
    }
}

impl ColonyConfig {
    pub fn with_num_ants(mut self, n: usize) -> Self {
        self.num_ants = n;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    pub fn with_elitist_weight(mut self, weight: f64) -> Self {
        self.elitist_weight = Some(weight);
        self
    }

    pub fn with_deposit_policy(mut self, policy: DepositPolicy) -> Self {
        self.deposit_policy = policy;
        self
    }

    pub fn with_acs_evaporation(mut self, scope: AcsEvaporation) -> Self {
        self.acs_evaporation = scope;
        self
    }

    pub fn with_snapshot_interval(mut self, n: usize) -> Self {
        self.snapshot_interval = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Elitist weight actually applied by EAS.
    pub fn effective_elitist_weight(&self) -> f64 {
        self.elitist_weight.unwrap_or(self.num_ants as f64)
    }

    /// Validates the configuration for an instance of `num_cities` cities.
    ///
    /// # Errors
    ///
    /// [`AcoError::Configuration`] naming the first offending parameter.
    pub fn validate(&self, num_cities: usize) -> AcoResult<()> {
        if num_cities < 2 {
            return Err(AcoError::config(
                "num_cities",
                format!("at least 2 cities required, got {num_cities}"),
            ));
        }
        if self.num_ants == 0 {
            return Err(AcoError::config("num_ants", "must be at least 1"));
        }
        if self.snapshot_interval == 0 {
            return Err(AcoError::config("snapshot_interval", "must be at least 1"));
        }
        non_negative("alpha", self.alpha)?;
        non_negative("beta", self.beta)?;
        unit_interval("rho", self.rho)?;
        unit_interval("epsilon", self.epsilon)?;
        unit_interval("q", self.q)?;
        if let Some(w) = self.elitist_weight {
            non_negative("elitist_weight", w)?;
        }
        Ok(())
    }
}

fn non_negative(parameter: &'static str, value: f64) -> AcoResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AcoError::config(
            parameter,
            format!("must be finite and >= 0, got {value}"),
        ));
    }
    Ok(())
}

fn unit_interval(parameter: &'static str, value: f64) -> AcoResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(AcoError::config(
            parameter,
            format!("must be in [0, 1], got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offending(config: &ColonyConfig, n: usize) -> &'static str {
        match config.validate(n) {
            Err(AcoError::Configuration { parameter, .. }) => parameter,
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config() {
        let config = ColonyConfig::default();
        assert_eq!(config.num_ants, 10);
        assert_eq!(config.snapshot_interval, 10);
        assert_eq!(config.deposit_policy, DepositPolicy::Overwrite);
        assert_eq!(config.acs_evaporation, AcsEvaporation::TourEdgesOnly);
        assert!(config.validate(5).is_ok());
    }

    #[test]
    fn test_too_few_cities() {
        assert_eq!(offending(&ColonyConfig::default(), 1), "num_cities");
        assert_eq!(offending(&ColonyConfig::default(), 0), "num_cities");
    }

    #[test]
    fn test_zero_ants() {
        assert_eq!(offending(&ColonyConfig::default().with_num_ants(0), 5), "num_ants");
    }

    #[test]
    fn test_rates_out_of_range() {
        assert_eq!(offending(&ColonyConfig::default().with_rho(1.5), 5), "rho");
        assert_eq!(offending(&ColonyConfig::default().with_epsilon(-0.1), 5), "epsilon");
        assert_eq!(offending(&ColonyConfig::default().with_q(f64::NAN), 5), "q");
    }

    #[test]
    fn test_exponents() {
        assert_eq!(offending(&ColonyConfig::default().with_alpha(-1.0), 5), "alpha");
        assert_eq!(offending(&ColonyConfig::default().with_beta(f64::INFINITY), 5), "beta");
    }

    #[test]
    fn test_elitist_weight() {
        let config = ColonyConfig::default().with_num_ants(7);
        assert_eq!(config.effective_elitist_weight(), 7.0);
        let config = config.with_elitist_weight(2.5);
        assert_eq!(config.effective_elitist_weight(), 2.5);
        assert_eq!(
            offending(&ColonyConfig::default().with_elitist_weight(-3.0), 5),
            "elitist_weight"
        );
    }

    #[test]
    fn test_zero_snapshot_interval() {
        assert_eq!(
            offending(&ColonyConfig::default().with_snapshot_interval(0), 5),
            "snapshot_interval"
        );
    }
}
