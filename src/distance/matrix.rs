//! Dense distance matrix.

use crate::models::Location;

/// A dense n×n distance matrix stored in row-major order.
///
/// Computed once per problem instance from location coordinates and reused
/// read-only by every formulator. Euclidean distances are symmetric with a
/// zero diagonal.
///
/// # Examples
///
/// ```
/// use robomarkt::models::Location;
/// use robomarkt::distance::DistanceMatrix;
///
/// let locations = vec![
///     Location::depot(0.0, 0.0),
///     Location::new(1, 3.0, 4.0, true, 10.0),
///     Location::new(2, 6.0, 8.0, true, 20.0),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a Euclidean distance matrix from location coordinates.
    ///
    /// Logs a warning for each pair of distinct locations at distance zero;
    /// the formulators special-case such pairs (see the facility location
    /// model's open/assign link).
    pub fn from_locations(locations: &[Location]) -> Self {
        let n = locations.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = locations[i].distance_to(&locations[j]);
                if d == 0.0 {
                    log::warn!("distance between locations {i} and {j} is 0");
                }
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Largest entry in the matrix.
    ///
    /// Used to derive instance-dependent big-M constants.
    pub fn max_distance(&self) -> f64 {
        self.data.iter().copied().fold(0.0, f64::max)
    }

    /// Extracts the submatrix over the given location indices.
    ///
    /// Entry `(a, b)` of the result is the distance between `indices[a]` and
    /// `indices[b]`. Used to build the reduced routing instance over only the
    /// opened facilities.
    pub fn submatrix(&self, indices: &[usize]) -> DistanceMatrix {
        let m = indices.len();
        let mut sub = Self::new(m);
        for (a, &i) in indices.iter().enumerate() {
            for (b, &j) in indices.iter().enumerate() {
                sub.set(a, b, self.get(i, j));
            }
        }
        sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_locations() -> Vec<Location> {
        vec![
            Location::depot(0.0, 0.0),
            Location::new(1, 3.0, 4.0, true, 10.0),
            Location::new(2, 0.0, 8.0, true, 20.0),
        ]
    }

    #[test]
    fn test_from_locations() {
        let dm = DistanceMatrix::from_locations(&sample_locations());
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(0, 2) - 8.0).abs() < 1e-10);
        assert!(dm.get(0, 0).abs() < 1e-10);
    }

    #[test]
    fn test_symmetric() {
        let dm = DistanceMatrix::from_locations(&sample_locations());
        assert!(dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 5.0);
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_max_distance() {
        let dm = DistanceMatrix::from_locations(&sample_locations());
        // Farthest pair is depot (0,0) to (0,8).
        assert!((dm.max_distance() - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_submatrix() {
        let dm = DistanceMatrix::from_locations(&sample_locations());
        let sub = dm.submatrix(&[0, 2]);
        assert_eq!(sub.size(), 2);
        assert!((sub.get(0, 1) - 8.0).abs() < 1e-10);
        assert!((sub.get(1, 0) - 8.0).abs() < 1e-10);
        assert!(sub.get(1, 1).abs() < 1e-10);
    }

    proptest! {
        #[test]
        fn prop_symmetric_zero_diagonal(
            coords in prop::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 1..20)
        ) {
            let locations: Vec<Location> = coords
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| Location::new(i, x, y, true, 0.0))
                .collect();
            let dm = DistanceMatrix::from_locations(&locations);
            prop_assert!(dm.is_symmetric(1e-9));
            for i in 0..dm.size() {
                prop_assert_eq!(dm.get(i, i), 0.0);
                for j in 0..dm.size() {
                    prop_assert!(dm.get(i, j) >= 0.0);
                }
            }
        }
    }
}
