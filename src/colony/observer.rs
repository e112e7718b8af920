//! Progress hooks for the iteration loop.

use crate::tsp::BestTour;

/// Receives progress events from a running colony.
///
/// Both methods default to no-ops; implement only what you need.
///
/// # Examples
///
/// ```
/// use u_antcolony::colony::ColonyObserver;
///
/// struct Printer;
///
/// impl ColonyObserver for Printer {
///     fn on_iteration(&mut self, iteration: usize, best_cost: f64) {
///         if iteration % 50 == 0 {
///             eprintln!("iteration {iteration}: {best_cost:.3}");
///         }
///     }
/// }
/// ```
pub trait ColonyObserver {
    /// Called once at the end of every iteration (1-based), after the
    /// global pheromone update.
    fn on_iteration(&mut self, _iteration: usize, _best_cost: f64) {}

    /// Called whenever an ant beats the best tour seen so far.
    fn on_improvement(&mut self, _iteration: usize, _best: &BestTour) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ColonyObserver for NoopObserver {}

/// Observer that records the best cost after every iteration.
#[derive(Debug, Default, Clone)]
pub struct CostHistory {
    /// Best cost at the end of each iteration.
    pub costs: Vec<f64>,
    /// Number of best-so-far improvements seen.
    pub improvements: usize,
}

impl ColonyObserver for CostHistory {
    fn on_iteration(&mut self, _iteration: usize, best_cost: f64) {
        self.costs.push(best_cost);
    }

    fn on_improvement(&mut self, _iteration: usize, _best: &BestTour) {
        self.improvements += 1;
    }
}
