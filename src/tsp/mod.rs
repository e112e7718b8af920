//! Problem-instance types for the symmetric Euclidean TSP.
//!
//! # Key Types
//!
//! - [`City`]: an immutable labelled 2-D point
//! - [`DistanceTable`]: the static pairwise distance matrix
//! - [`Tour`]: a validated Hamiltonian cycle over city indices
//! - [`BestTour`]: a by-value snapshot of a tour and its cost
//!
//! # Submodules
//!
//! - [`tsplib`]: loader for TSPLIB-style coordinate files

mod city;
mod distance;
mod tour;
pub mod tsplib;

pub use city::City;
pub use distance::DistanceTable;
pub use tour::{BestTour, Tour};
