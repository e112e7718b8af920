//! Tour construction agents.

use super::pheromone::PheromoneStore;
use crate::error::{AcoError, AcoResult};
use crate::tsp::{BestTour, DistanceTable, Tour};
use rand::Rng;

/// An agent that builds complete tours.
///
/// Each construction call overwrites the ant's tour and cost; nothing is
/// patched incrementally. Use [`Ant::snapshot`] to keep a tour beyond the
/// next construction.
#[derive(Debug, Clone)]
pub struct Ant {
    id: usize,
    tour: Option<Tour>,
    cost: f64,
    unvisited: Vec<usize>,
}

impl Ant {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            tour: None,
            cost: f64::INFINITY,
            unvisited: Vec::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// The last constructed tour, if any.
    pub fn tour(&self) -> Option<&Tour> {
        self.tour.as_ref()
    }

    /// Cost of the last constructed tour; infinite before the first one.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Copies the current tour and cost out of the ant.
    pub fn snapshot(&self) -> Option<BestTour> {
        self.tour.as_ref().map(|tour| BestTour {
            tour: tour.clone(),
            cost: self.cost,
        })
    }

    /// Whether `i` and `j` are adjacent in the current tour.
    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.tour.as_ref().is_some_and(|t| t.has_edge(i, j))
    }

    /// Closed-cycle length of an arbitrary city order.
    pub fn evaluate(order: &[usize], distances: &DistanceTable) -> f64 {
        distances.cycle_length(order)
    }

    /// Nearest-neighbour tour from `start`, ignoring pheromone.
    ///
    /// Ties go to the lowest city index.
    pub fn construct_greedy(&mut self, start: usize, distances: &DistanceTable) -> AcoResult<f64> {
        self.walk(start, distances, |current, unvisited| {
            let mut best: Option<(usize, f64)> = None;
            for &j in unvisited {
                let d = distances.get(current, j);
                if best.is_none_or(|(_, bd)| d < bd) {
                    best = Some((j, d));
                }
            }
            best.map(|(j, _)| j)
        })
    }

    /// ACS pseudorandom proportional construction.
    ///
    /// Starts at a random city. With probability `q` each step takes the
    /// greedy choice, otherwise a roulette choice; every traversed edge
    /// immediately receives a local update.
    pub fn construct_acs<R: Rng>(
        &mut self,
        distances: &DistanceTable,
        pheromone: &mut PheromoneStore,
        q: f64,
        rng: &mut R,
    ) -> AcoResult<f64> {
        let start = rng.random_range(0..distances.size());
        self.walk(start, distances, |current, unvisited| {
            let r: f64 = rng.random_range(0.0..1.0);
            let chosen = if r < q {
                pheromone.greedy_choice(current, unvisited, distances)
            } else {
                pheromone.weighted_choice(current, unvisited, distances, &mut *rng)
            }?;
            pheromone.local_update(current, chosen);
            Some(chosen)
        })
    }

    /// EAS construction: a roulette choice at every step, no local update.
    pub fn construct_eas<R: Rng>(
        &mut self,
        distances: &DistanceTable,
        pheromone: &PheromoneStore,
        rng: &mut R,
    ) -> AcoResult<f64> {
        let start = rng.random_range(0..distances.size());
        self.walk(start, distances, |current, unvisited| {
            pheromone.weighted_choice(current, unvisited, distances, &mut *rng)
        })
    }

    /// Extends a tour from `start` with `next` until every city is visited,
    /// then closes the cycle.
    fn walk<F>(&mut self, start: usize, distances: &DistanceTable, mut next: F) -> AcoResult<f64>
    where
        F: FnMut(usize, &[usize]) -> Option<usize>,
    {
        let n = distances.size();
        if start >= n {
            return Err(AcoError::invalid_tour(format!(
                "start city {start} out of range for {n} cities"
            )));
        }

        self.unvisited.clear();
        self.unvisited.extend((0..n).filter(|&c| c != start));

        let mut order = Vec::with_capacity(n);
        order.push(start);
        let mut length = 0.0;
        let mut current = start;

        while !self.unvisited.is_empty() {
            let chosen = next(current, &self.unvisited)
                .ok_or_else(|| AcoError::invalid_tour("selection returned no city"))?;
            let slot = self.unvisited.binary_search(&chosen).map_err(|_| {
                AcoError::invalid_tour(format!("city {chosen} is not an unvisited city"))
            })?;
            self.unvisited.remove(slot);

            length += distances.get(current, chosen);
            order.push(chosen);
            current = chosen;
        }
        length += distances.get(current, start);

        self.tour = Some(Tour::from_order(order)?);
        self.cost = length;
        Ok(length)
    }
}

/// Derives τ₀ = 1 / (L · n) from a nearest-neighbour tour starting at city 0.
///
/// # Errors
///
/// [`AcoError::NonFiniteDeposit`] when the greedy tour has zero length
/// (every city at the same coordinates).
pub fn initial_pheromone(distances: &DistanceTable) -> AcoResult<f64> {
    let mut scout = Ant::new(usize::MAX);
    let length = scout.construct_greedy(0, distances)?;
    let tau_not = 1.0 / (length * distances.size() as f64);
    if !(length > 0.0 && tau_not.is_finite()) {
        return Err(AcoError::NonFiniteDeposit { cost: length });
    }
    Ok(tau_not)
}
