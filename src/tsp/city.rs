//! City coordinates.

/// A city of the instance: an identifier from the input plus its coordinates.
///
/// The identifier is informational only; the engine addresses cities by
/// their position in the input sequence.
///
/// # Examples
///
/// ```
/// use u_antcolony::tsp::City;
///
/// let a = City::new(1, 0.0, 0.0);
/// let b = City::new(2, 3.0, 4.0);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    /// Identifier as given by the input.
    pub id: i64,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl City {
    pub fn new(id: i64, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Euclidean distance to another city.
    pub fn distance_to(&self, other: &City) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}
