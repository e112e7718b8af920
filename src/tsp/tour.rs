//! Validated tours and best-tour snapshots.

use crate::error::{AcoError, AcoResult};

/// A Hamiltonian cycle over city indices `0..n`.
///
/// The cycle is implicitly closed by the edge from the last city back to
/// the first. A `Tour` can only be built from a valid permutation, and it
/// keeps the inverse permutation so that edge membership is O(1).
///
/// # Examples
///
/// ```
/// use u_antcolony::tsp::Tour;
///
/// let tour = Tour::from_order(vec![2, 0, 3, 1]).unwrap();
/// assert!(tour.has_edge(0, 3));
/// assert!(tour.has_edge(2, 1)); // closing edge
/// assert!(!tour.has_edge(0, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    order: Vec<usize>,
    position: Vec<usize>,
}

impl Tour {
    /// Validates `order` as a permutation of `0..order.len()`.
    ///
    /// # Errors
    ///
    /// [`AcoError::InvalidTour`] if an index is out of range or repeated.
    pub fn from_order(order: Vec<usize>) -> AcoResult<Self> {
        let n = order.len();
        let mut position = vec![usize::MAX; n];
        for (pos, &city) in order.iter().enumerate() {
            if city >= n {
                return Err(AcoError::invalid_tour(format!(
                    "city {city} out of range for {n} cities"
                )));
            }
            if position[city] != usize::MAX {
                return Err(AcoError::invalid_tour(format!(
                    "city {city} visited twice (positions {} and {pos})",
                    position[city]
                )));
            }
            position[city] = pos;
        }
        Ok(Self { order, position })
    }

    /// City indices in visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Number of cities in the tour.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates the edges of the cycle as `(from, to)`, including the wrap edge.
    ///
    /// Each undirected edge is yielded once. A single-city tour has no edges,
    /// and a two-city tour has the one edge `(order[0], order[1])`, even though
    /// its closed length counts that edge in both directions.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.order.len();
        let count = match n {
            0 | 1 => 0,
            2 => 1,
            _ => n,
        };
        (0..count).map(move |k| (self.order[k], self.order[(k + 1) % n]))
    }

    /// Whether `i` and `j` are adjacent in either direction.
    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        let n = self.order.len();
        if n < 2 || i >= n || j >= n || i == j {
            return false;
        }
        let (pi, pj) = (self.position[i], self.position[j]);
        (pi + 1) % n == pj || (pj + 1) % n == pi
    }

    pub fn into_order(self) -> Vec<usize> {
        self.order
    }
}

/// A best-so-far snapshot: a tour and its cost, held by value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestTour {
    /// The tour.
    pub tour: Tour,
    /// Closed-cycle length of `tour`.
    pub cost: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_duplicate() {
        let err = Tour::from_order(vec![0, 1, 1]).unwrap_err();
        assert!(matches!(err, AcoError::InvalidTour { .. }));
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(Tour::from_order(vec![0, 3, 1]).is_err());
    }

    #[test]
    fn test_edges_wrap() {
        let tour = Tour::from_order(vec![1, 2, 0]).unwrap();
        let edges: Vec<_> = tour.edges().collect();
        assert_eq!(edges, vec![(1, 2), (2, 0), (0, 1)]);
    }

    #[test]
    fn test_has_edge_multi_digit_ids() {
        // Adjacency must not be confused by ids sharing digits (1-2 vs 12).
        let order: Vec<usize> = vec![0, 12, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];
        let tour = Tour::from_order(order).unwrap();
        assert!(tour.has_edge(12, 1));
        assert!(tour.has_edge(1, 12));
        assert!(tour.has_edge(11, 0));
        assert!(!tour.has_edge(1, 0));
        assert!(!tour.has_edge(12, 2));
        assert!(!tour.has_edge(4, 4));
    }

    #[test]
    fn test_two_city_tour() {
        let tour = Tour::from_order(vec![1, 0]).unwrap();
        assert!(tour.has_edge(0, 1));
        let edges: Vec<_> = tour.edges().collect();
        assert_eq!(edges, vec![(1, 0)]);
    }
}
