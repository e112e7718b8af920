//! Ant Colony Optimization for the symmetric Euclidean Traveling Salesman
//! Problem.
//!
//! Provides two classic colony algorithms over a shared pheromone engine:
//!
//! - **Ant Colony System (ACS)**: pseudorandom proportional decision rule,
//!   local pheromone decay on every traversed edge, global reinforcement of
//!   the best tour so far.
//! - **Elitist Ant System (EAS)**: pure roulette decision rule, buffered
//!   per-iteration deposits, full evaporation, elitist reinforcement of the
//!   best tour so far.
//!
//! # Quick start
//!
//! ```
//! use u_antcolony::colony::{AntColonySystem, ColonyConfig};
//! use u_antcolony::tsp::City;
//!
//! let cities = vec![
//!     City::new(1, 0.0, 0.0),
//!     City::new(2, 1.0, 0.0),
//!     City::new(3, 1.0, 1.0),
//!     City::new(4, 0.0, 1.0),
//! ];
//! let config = ColonyConfig::default().with_iterations(20).with_seed(7);
//! let mut acs = AntColonySystem::new(&cities, config)?;
//! let snapshots = acs.optimize()?;
//! assert_eq!(snapshots.len(), 2);
//! assert!((snapshots[1] - 4.0).abs() < 1e-9);
//! # Ok::<(), u_antcolony::AcoError>(())
//! ```
//!
//! # Modules
//!
//! - [`tsp`]: cities, distance table, tours, coordinate-file loader
//! - [`colony`]: pheromone store, ants, ACS and EAS orchestrators
//! - [`trials`]: repeated runs reduced to medians
//!
//! # Features
//!
//! - `parallel`: rayon-backed EAS construction and concurrent trials
//! - `serde`: `Serialize`/`Deserialize` for configuration and result types

pub mod colony;
pub mod error;
pub mod trials;
pub mod tsp;

pub use error::{AcoError, AcoResult};
