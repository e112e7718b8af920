//! Repeated independent runs reduced to per-snapshot medians.
//!
//! Stochastic optimizers are compared on the median of several runs rather
//! than a single one. [`run_trials`] runs one variant `trials` times with
//! consecutive seeds and reduces each snapshot position to its median.

use crate::colony::{ColonyConfig, ColonyVariant};
use crate::error::{AcoError, AcoResult};
use crate::tsp::City;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of [`run_trials`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialSummary {
    /// Algorithm that was run.
    pub variant: ColonyVariant,
    /// Seed of trial 0; trial `k` used `base_seed + k`.
    pub base_seed: u64,
    /// Snapshot sequence of every trial, in trial order.
    pub runs: Vec<Vec<f64>>,
    /// Median of each snapshot position across trials.
    pub medians: Vec<f64>,
}

/// Runs `variant` `trials` times on `cities`.
///
/// Trial `k` uses seed `base + k`, where `base` is `config.seed` or a
/// random value. With the `parallel` feature and `config.parallel` set,
/// trials run concurrently; results are identical either way.
///
/// # Errors
///
/// [`AcoError::Configuration`] if `trials` is zero, plus any error of the
/// underlying runs.
pub fn run_trials(
    cities: &[City],
    variant: ColonyVariant,
    config: &ColonyConfig,
    trials: usize,
) -> AcoResult<TrialSummary> {
    if trials == 0 {
        return Err(AcoError::Configuration {
            parameter: "trials",
            reason: "must be at least 1".into(),
        });
    }
    config.validate(cities.len())?;

    let base_seed = config.seed.unwrap_or_else(rand::random);
    let trial_config = |k: usize| config.clone().with_seed(base_seed.wrapping_add(k as u64));

    #[cfg(feature = "parallel")]
    let runs: Vec<Vec<f64>> = if config.parallel {
        (0..trials)
            .into_par_iter()
            .map(|k| variant.optimize(cities, &trial_config(k)))
            .collect::<AcoResult<_>>()?
    } else {
        (0..trials)
            .map(|k| variant.optimize(cities, &trial_config(k)))
            .collect::<AcoResult<_>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let runs: Vec<Vec<f64>> = (0..trials)
        .map(|k| variant.optimize(cities, &trial_config(k)))
        .collect::<AcoResult<_>>()?;

    let medians = medians(&runs);
    Ok(TrialSummary {
        variant,
        base_seed,
        runs,
        medians,
    })
}

/// Per-position median of equally long sequences.
///
/// Uses the element at index `len / 2` of the sorted values, i.e. the upper
/// median when the count is even. Positions beyond the shortest sequence
/// are dropped.
pub fn medians(runs: &[Vec<f64>]) -> Vec<f64> {
    let width = runs.iter().map(Vec::len).min().unwrap_or(0);
    (0..width)
        .map(|i| {
            let mut column: Vec<f64> = runs.iter().map(|r| r[i]).collect();
            column.sort_by(f64::total_cmp);
            column[column.len() / 2]
        })
        .collect()
}
