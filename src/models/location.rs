//! Candidate location type.

/// A candidate site (or depot) in a network design instance.
///
/// Location 0 is conventionally the depot. Every other location is a
/// candidate site with Euclidean coordinates, a flag saying whether a
/// mini-market may be built there, and the cost of building one.
///
/// # Examples
///
/// ```
/// use robomarkt::models::Location;
///
/// let depot = Location::depot(35.0, 35.0);
/// assert_eq!(depot.id(), 0);
/// assert!(depot.usable());
///
/// let site = Location::new(1, 41.0, 49.0, true, 120.0);
/// assert_eq!(site.id(), 1);
/// assert_eq!(site.build_cost(), 120.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    id: usize,
    x: f64,
    y: f64,
    usable: bool,
    build_cost: f64,
}

impl Location {
    /// Creates a new candidate location.
    pub fn new(id: usize, x: f64, y: f64, usable: bool, build_cost: f64) -> Self {
        Self {
            id,
            x,
            y,
            usable,
            build_cost,
        }
    }

    /// Creates a depot at the given coordinates (id=0, zero build cost).
    ///
    /// The depot always hosts a facility, so it is marked usable.
    pub fn depot(x: f64, y: f64) -> Self {
        Self::new(0, x, y, true, 0.0)
    }

    /// Location ID (0 = depot).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Whether a market may be installed at this site.
    pub fn usable(&self) -> bool {
        self.usable
    }

    /// Cost of installing a market at this site.
    pub fn build_cost(&self) -> f64 {
        self.build_cost
    }

    /// Euclidean distance to another location.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_new() {
        let l = Location::new(3, 10.0, 20.0, false, 55.0);
        assert_eq!(l.id(), 3);
        assert_eq!(l.x(), 10.0);
        assert_eq!(l.y(), 20.0);
        assert!(!l.usable());
        assert_eq!(l.build_cost(), 55.0);
    }

    #[test]
    fn test_location_depot() {
        let d = Location::depot(35.0, 35.0);
        assert_eq!(d.id(), 0);
        assert!(d.usable());
        assert_eq!(d.build_cost(), 0.0);
    }

    #[test]
    fn test_location_distance() {
        let a = Location::depot(0.0, 0.0);
        let b = Location::new(1, 3.0, 4.0, true, 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_location_distance_symmetric() {
        let a = Location::new(0, 1.0, 2.0, true, 0.0);
        let b = Location::new(1, 4.0, 6.0, true, 0.0);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-10);
    }
}
