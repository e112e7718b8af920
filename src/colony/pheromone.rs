//! Shared pheromone state and its update rules.
//!
//! [`PheromoneStore`] owns the symmetric pheromone matrix, the transient
//! EAS deposit buffer, and the two city-selection primitives that combine
//! pheromone with inverse distance.
//!
//! # Update rules
//!
//! | Rule | Formula | Scope |
//! |------|---------|-------|
//! | ACS local | `p = (1 - ε)·p + ε·τ₀` | one edge, after each step |
//! | ACS global | `p = (1 - ρ)·p + ρ/L_best` | best-tour edges (see [`AcsEvaporation`]) |
//! | EAS deposit | `buf = 1/L` (or `+=`, see [`DepositPolicy`]) | one tour |
//! | EAS global | `p = (1 - ρ)·p + buf + e/L_best·[best edge]` | all pairs |
//!
//! Every result is clamped to `[0, ∞)`.
//!
//! # References
//!
//! - Dorigo & Gambardella (1997), "Ant Colony System: A Cooperative Learning
//!   Approach to the Traveling Salesman Problem"
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a Colony
//!   of Cooperating Agents"

use super::config::{AcsEvaporation, ColonyConfig, DepositPolicy};
use crate::error::{AcoError, AcoResult};
use crate::tsp::{BestTour, DistanceTable, Tour};
use rand::Rng;

/// Pheromone matrix plus the parameters of its update rules.
#[derive(Debug, Clone)]
pub struct PheromoneStore {
    size: usize,
    trail: Vec<f64>,
    deposits: Option<Vec<f64>>,
    tau_not: f64,
    alpha: f64,
    beta: f64,
    rho: f64,
    epsilon: f64,
    elitist_weight: f64,
    deposit_policy: DepositPolicy,
    acs_evaporation: AcsEvaporation,
}

impl PheromoneStore {
    /// Creates an all-zero store for `size` cities.
    ///
    /// Call [`initialize_uniform`](Self::initialize_uniform) before use.
    pub fn new(size: usize, config: &ColonyConfig) -> Self {
        Self {
            size,
            trail: vec![0.0; size * size],
            deposits: None,
            tau_not: 0.0,
            alpha: config.alpha,
            beta: config.beta,
            rho: config.rho,
            epsilon: config.epsilon,
            elitist_weight: config.effective_elitist_weight(),
            deposit_policy: config.deposit_policy,
            acs_evaporation: config.acs_evaporation,
        }
    }

    /// Sets every entry to `tau_not` and remembers it for local updates.
    pub fn initialize_uniform(&mut self, tau_not: f64) {
        self.tau_not = tau_not;
        self.trail.fill(tau_not);
        if let Some(buf) = self.deposits.as_mut() {
            buf.fill(0.0);
        }
    }

    /// Pheromone on edge `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.trail[i * self.size + j]
    }

    /// Reference level τ₀ set by the last uniform initialization.
    pub fn tau_not(&self) -> f64 {
        self.tau_not
    }

    /// Number of cities.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Pending EAS deposit on edge `(i, j)`; zero when no buffer exists.
    pub fn pending_deposit(&self, i: usize, j: usize) -> f64 {
        self.deposits
            .as_ref()
            .map_or(0.0, |buf| buf[i * self.size + j])
    }

    /// Whether the EAS deposit buffer holds no pending contribution.
    pub fn deposits_cleared(&self) -> bool {
        self.deposits
            .as_ref()
            .is_none_or(|buf| buf.iter().all(|&v| v == 0.0))
    }

    /// Owned copy of the matrix as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.trail
            .chunks(self.size.max(1))
            .map(<[f64]>::to_vec)
            .collect()
    }

    #[inline]
    pub(crate) fn set_symmetric(&mut self, i: usize, j: usize, value: f64) {
        let v = value.max(0.0);
        self.trail[i * self.size + j] = v;
        self.trail[j * self.size + i] = v;
    }

    /// ACS local update on the edge just traversed.
    ///
    /// Moves `p(i, j)` a fraction ε toward τ₀, making the edge less attractive
    /// to the ants that follow in the same iteration.
    pub fn local_update(&mut self, i: usize, j: usize) {
        let p = self.get(i, j);
        let updated = (1.0 - self.epsilon) * p + self.epsilon * self.tau_not;
        self.set_symmetric(i, j, updated);
    }

    /// ACS global update with the best tour found so far.
    ///
    /// # Errors
    ///
    /// [`AcoError::NonFiniteDeposit`] if `best.cost` is not a positive finite number.
    pub fn global_update_acs(&mut self, best: &BestTour) -> AcoResult<()> {
        let reinforcement = self.rho * reinforcement(best.cost)?;
        let keep = 1.0 - self.rho;

        match self.acs_evaporation {
            AcsEvaporation::TourEdgesOnly => {
                for (i, j) in best.tour.edges() {
                    let updated = keep * self.get(i, j) + reinforcement;
                    self.set_symmetric(i, j, updated);
                }
            }
            AcsEvaporation::AllEdges => {
                for i in 0..self.size {
                    for j in (i + 1)..self.size {
                        let mut updated = keep * self.get(i, j);
                        if best.tour.has_edge(i, j) {
                            updated += reinforcement;
                        }
                        self.set_symmetric(i, j, updated);
                    }
                }
            }
        }
        Ok(())
    }

    /// Records one EAS ant's tour in the iteration deposit buffer.
    ///
    /// # Errors
    ///
    /// [`AcoError::NonFiniteDeposit`] if `cost` is not a positive finite number.
    pub fn deposit_iteration(&mut self, tour: &Tour, cost: f64) -> AcoResult<()> {
        let amount = reinforcement(cost)?;
        let n = self.size;
        let policy = self.deposit_policy;
        let buf = self.deposits.get_or_insert_with(|| vec![0.0; n * n]);

        for (i, j) in tour.edges() {
            let value = match policy {
                DepositPolicy::Overwrite => amount,
                DepositPolicy::Accumulate => buf[i * n + j] + amount,
            };
            buf[i * n + j] = value;
            buf[j * n + i] = value;
        }
        Ok(())
    }

    /// EAS global update: evaporate everything, fold in the iteration
    /// deposits plus the elitist reinforcement, then clear the buffer.
    ///
    /// # Errors
    ///
    /// [`AcoError::NonFiniteDeposit`] if `best.cost` is not a positive finite number.
    pub fn global_update_eas(&mut self, best: &BestTour) -> AcoResult<()> {
        let elite = self.elitist_weight * reinforcement(best.cost)?;
        let keep = 1.0 - self.rho;
        let n = self.size;
        let mut deposits = self.deposits.take();

        for i in 0..n {
            for j in i..n {
                let evaporated = keep * self.get(i, j);
                let mut deposit = deposits.as_ref().map_or(0.0, |buf| buf[i * n + j]);
                if best.tour.has_edge(i, j) {
                    deposit += elite;
                }
                self.set_symmetric(i, j, evaporated + deposit);
            }
        }

        if let Some(buf) = deposits.as_mut() {
            buf.fill(0.0);
        }
        self.deposits = deposits;
        Ok(())
    }

    /// Greedy-branch score: `p(i, j) · (1/d(i, j))^β`.
    #[inline]
    pub fn greedy_score(&self, i: usize, j: usize, distances: &DistanceTable) -> f64 {
        self.get(i, j) * (1.0 / distances.get(i, j)).powf(self.beta)
    }

    /// Roulette weight: `p(i, j)^α · (1/d(i, j))^β`.
    #[inline]
    pub fn weighted_score(&self, i: usize, j: usize, distances: &DistanceTable) -> f64 {
        self.get(i, j).powf(self.alpha) * (1.0 / distances.get(i, j)).powf(self.beta)
    }

    /// The candidate with the highest [`greedy_score`](Self::greedy_score).
    ///
    /// Ties go to the first candidate in `candidates`. Returns `None` only
    /// when `candidates` is empty.
    pub fn greedy_choice(
        &self,
        from: usize,
        candidates: &[usize],
        distances: &DistanceTable,
    ) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &j in candidates {
            let score = self.greedy_score(from, j, distances);
            match best {
                None => best = Some((j, score)),
                Some((_, top)) if score > top || (top.is_nan() && !score.is_nan()) => {
                    best = Some((j, score))
                }
                _ => {}
            }
        }
        best.map(|(j, _)| j)
    }

    /// Roulette-wheel choice weighted by [`weighted_score`](Self::weighted_score).
    ///
    /// Weights are normalized over `candidates` only. When every weight is
    /// zero (pheromone underflow) or the total is not finite, falls back to
    /// a uniform choice; infinite weights (coincident cities) share the
    /// choice among themselves. Returns `None` only when `candidates` is empty.
    pub fn weighted_choice<R: Rng>(
        &self,
        from: usize,
        candidates: &[usize],
        distances: &DistanceTable,
        rng: &mut R,
    ) -> Option<usize> {
        if candidates.is_empty() {
            return None;
        }

        let weights: Vec<f64> = candidates
            .iter()
            .map(|&j| {
                let w = self.weighted_score(from, j, distances);
                if w.is_nan() { 0.0 } else { w }
            })
            .collect();

        let unbounded: Vec<usize> = candidates
            .iter()
            .zip(&weights)
            .filter(|(_, w)| w.is_infinite())
            .map(|(&j, _)| j)
            .collect();
        if !unbounded.is_empty() {
            return Some(unbounded[rng.random_range(0..unbounded.len())]);
        }

        let total: f64 = weights.iter().sum();
        if !(total.is_finite() && total > 0.0) {
            return Some(candidates[rng.random_range(0..candidates.len())]);
        }

        let u: f64 = rng.random_range(0.0..1.0);
        let mut cumulative = 0.0;
        let mut last_positive = None;
        for (&j, &w) in candidates.iter().zip(&weights) {
            if w <= 0.0 {
                continue;
            }
            cumulative += w / total;
            last_positive = Some(j);
            if cumulative >= u {
                return Some(j);
            }
        }
        // Rounding can leave the final cumulative value just below u.
        last_positive
    }
}

/// Deposit amount `1/cost` for a tour of length `cost`.
fn reinforcement(cost: f64) -> AcoResult<f64> {
    let amount = 1.0 / cost;
    if !(cost > 0.0 && amount.is_finite()) {
        return Err(AcoError::NonFiniteDeposit { cost });
    }
    Ok(amount)
}
