//! Dense symmetric distance matrix.

use super::city::City;

/// A dense n×n Euclidean distance matrix stored in row-major order.
///
/// Computed once per instance; `d(i, j) == d(j, i)` and `d(i, i) == 0`.
///
/// # Examples
///
/// ```
/// use u_antcolony::tsp::{City, DistanceTable};
///
/// let cities = vec![City::new(1, 0.0, 0.0), City::new(2, 3.0, 4.0)];
/// let table = DistanceTable::build(&cities);
/// assert!((table.get(0, 1) - 5.0).abs() < 1e-12);
/// assert_eq!(table.get(1, 1), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceTable {
    data: Vec<f64>,
    size: usize,
}

impl DistanceTable {
    /// Computes the distance of every unordered pair of cities.
    pub fn build(cities: &[City]) -> Self {
        let n = cities.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = cities[i].distance_to(&cities[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { data, size: n }
    }

    /// Distance between cities `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.size + j]
    }

    /// Number of cities.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total length of the closed cycle visiting `order` in sequence.
    pub fn cycle_length(&self, order: &[usize]) -> f64 {
        match order {
            [] | [_] => 0.0,
            [first, .., last] => {
                let open: f64 = order.windows(2).map(|w| self.get(w[0], w[1])).sum();
                open + self.get(*last, *first)
            }
        }
    }

    /// Owned copy of the matrix as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.size.max(1)).map(<[f64]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unit_square() -> Vec<City> {
        vec![
            City::new(1, 0.0, 0.0),
            City::new(2, 1.0, 0.0),
            City::new(3, 1.0, 1.0),
            City::new(4, 0.0, 1.0),
        ]
    }

    #[test]
    fn test_unit_square_distances() {
        let t = DistanceTable::build(&unit_square());
        assert_eq!(t.size(), 4);
        assert!((t.get(0, 1) - 1.0).abs() < 1e-12);
        assert!((t.get(0, 2) - 2f64.sqrt()).abs() < 1e-12);
        assert!((t.get(3, 1) - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_cycle_length_includes_closing_edge() {
        let t = DistanceTable::build(&unit_square());
        assert!((t.cycle_length(&[0, 1, 2, 3]) - 4.0).abs() < 1e-12);
        assert!((t.cycle_length(&[0, 2, 1, 3]) - (2.0 + 2.0 * 2f64.sqrt())).abs() < 1e-12);
        assert_eq!(t.cycle_length(&[2]), 0.0);
    }

    #[test]
    fn test_to_rows_shape() {
        let rows = DistanceTable::build(&unit_square()).to_rows();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.len() == 4));
        assert_eq!(rows[2][2], 0.0);
    }

    fn arb_cities() -> impl Strategy<Value = Vec<City>> {
        prop::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 2..25).prop_map(
            |pts| {
                pts.into_iter()
                    .enumerate()
                    .map(|(i, (x, y))| City::new(i as i64, x, y))
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_symmetric_zero_diagonal(cities in arb_cities()) {
            let t = DistanceTable::build(&cities);
            for i in 0..t.size() {
                prop_assert_eq!(t.get(i, i), 0.0);
                for j in 0..t.size() {
                    prop_assert_eq!(t.get(i, j), t.get(j, i));
                    prop_assert!(t.get(i, j) >= 0.0);
                }
            }
        }

        #[test]
        fn prop_triangle_inequality(cities in arb_cities()) {
            let t = DistanceTable::build(&cities);
            let n = t.size();
            for i in 0..n {
                for j in 0..n {
                    for k in 0..n {
                        prop_assert!(t.get(i, k) <= t.get(i, j) + t.get(j, k) + 1e-9);
                    }
                }
            }
        }
    }
}
