//! Ant Colony Optimization engine for the symmetric TSP.
//!
//! A population of ants repeatedly builds tours guided by a shared
//! pheromone matrix; good tours reinforce their edges, and evaporation
//! forgets stale information.
//!
//! # Variants
//!
//! - [`AntColonySystem`]: pseudorandom proportional rule, local update on
//!   every traversed edge, global update on the best tour so far
//! - [`ElitistAntSystem`]: pure roulette rule, buffered per-iteration
//!   deposits, evaporation of every edge, elitist reinforcement
//!
//! # Key Types
//!
//! - [`ColonyConfig`]: run parameters shared by both variants
//! - [`PheromoneStore`]: pheromone matrix and update rules
//! - [`Ant`]: tour construction
//! - [`ColonyObserver`]: progress hook
//!
//! # References
//!
//! - Dorigo & Gambardella (1997), "Ant Colony System: A Cooperative Learning
//!   Approach to the Traveling Salesman Problem"
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a Colony
//!   of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod acs;
mod ant;
mod config;
mod eas;
mod observer;
mod pheromone;

pub use acs::AntColonySystem;
pub use ant::{initial_pheromone, Ant};
pub use config::{AcsEvaporation, ColonyConfig, DepositPolicy};
pub use eas::ElitistAntSystem;
pub use observer::{ColonyObserver, CostHistory, NoopObserver};
pub use pheromone::PheromoneStore;

use crate::error::AcoResult;
use crate::tsp::City;
use std::fmt;
use std::str::FromStr;

/// Which colony algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColonyVariant {
    /// Ant Colony System.
    Acs,
    /// Elitist Ant System.
    Eas,
}

impl ColonyVariant {
    /// Builds the colony for `cities` and runs it to completion.
    pub fn optimize(self, cities: &[City], config: &ColonyConfig) -> AcoResult<Vec<f64>> {
        self.optimize_with_observer(cities, config, &mut NoopObserver)
    }

    /// [`optimize`](Self::optimize) reporting progress to `observer`.
    pub fn optimize_with_observer<O: ColonyObserver + ?Sized>(
        self,
        cities: &[City],
        config: &ColonyConfig,
        observer: &mut O,
    ) -> AcoResult<Vec<f64>> {
        match self {
            ColonyVariant::Acs => {
                AntColonySystem::new(cities, config.clone())?.optimize_with_observer(observer)
            }
            ColonyVariant::Eas => {
                ElitistAntSystem::new(cities, config.clone())?.optimize_with_observer(observer)
            }
        }
    }
}

impl fmt::Display for ColonyVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColonyVariant::Acs => write!(f, "acs"),
            ColonyVariant::Eas => write!(f, "eas"),
        }
    }
}

impl FromStr for ColonyVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "acs" => Ok(ColonyVariant::Acs),
            "eas" | "elitist" => Ok(ColonyVariant::Eas),
            other => Err(format!("unknown colony variant `{other}` (expected acs or eas)")),
        }
    }
}
