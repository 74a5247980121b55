//! Boundary records for persistence and visualization collaborators.
//!
//! These serde-friendly records mirror the JSON shapes consumed by the
//! external tooling (`input.json`, `location_results.json`,
//! `maintenance_results.json`). Writing them anywhere is the collaborator's
//! job; this crate only produces the records.

use serde::{Deserialize, Serialize};

use super::{FacilityPlan, Location, MaintenancePlan};
use crate::distance::DistanceMatrix;

/// The original problem instance, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceReport {
    /// Number of locations.
    pub locations_num: usize,
    /// Maximum distance at which a location can be served by a facility.
    pub max_dist_from_market: f64,
    /// Minimum distance between any two opened facilities.
    pub min_dist_between_markets: f64,
    /// Maximum number of facilities a single vehicle can serve.
    pub max_stores_per_route: usize,
    /// Location coordinates, indexed by location ID.
    pub coords: Vec<(f64, f64)>,
    /// Usability flag per location.
    pub usable: Vec<bool>,
    /// Build cost per location.
    pub direct_build_costs: Vec<f64>,
    /// Full pairwise distance matrix, row-major.
    pub dist: Vec<Vec<f64>>,
}

impl InstanceReport {
    /// Builds the record from the in-memory instance data.
    pub fn new(
        locations: &[Location],
        distances: &DistanceMatrix,
        max_dist_from_market: f64,
        min_dist_between_markets: f64,
        max_stores_per_route: usize,
    ) -> Self {
        let n = locations.len();
        Self {
            locations_num: n,
            max_dist_from_market,
            min_dist_between_markets,
            max_stores_per_route,
            coords: locations.iter().map(|l| (l.x(), l.y())).collect(),
            usable: locations.iter().map(|l| l.usable()).collect(),
            direct_build_costs: locations.iter().map(|l| l.build_cost()).collect(),
            dist: (0..n)
                .map(|i| (0..n).map(|j| distances.get(i, j)).collect())
                .collect(),
        }
    }
}

/// Result record of the facility location stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityReport {
    /// Indices of the opened facilities.
    pub installed_markets: Vec<usize>,
    /// Total installation cost.
    pub installation_cost: f64,
    /// Assignment adjacency matrix: `adj_matrix[i][j] == 1` iff location `i`
    /// is served by facility `j`.
    pub adj_matrix: Vec<Vec<u8>>,
}

impl From<&FacilityPlan> for FacilityReport {
    fn from(plan: &FacilityPlan) -> Self {
        let n = plan.assignment().len();
        let mut adj_matrix = vec![vec![0u8; n]; n];
        for (i, &j) in plan.assignment().iter().enumerate() {
            adj_matrix[i][j] = 1;
        }
        Self {
            installed_markets: plan.opened().to_vec(),
            installation_cost: plan.installation_cost(),
            adj_matrix,
        }
    }
}

/// Result record of the vehicle routing stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceReport {
    /// One edge list per vehicle, in original location indices.
    pub maintenance_paths: Vec<Vec<(usize, usize)>>,
    /// Total maintenance cost.
    pub maintenance_cost: f64,
}

impl From<&MaintenancePlan> for MaintenanceReport {
    fn from(plan: &MaintenancePlan) -> Self {
        Self {
            maintenance_paths: plan.routes().iter().map(|r| r.edges().to_vec()).collect(),
            maintenance_cost: plan.maintenance_cost(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Route;

    #[test]
    fn test_instance_report() {
        let locations = vec![
            Location::depot(0.0, 0.0),
            Location::new(1, 3.0, 4.0, false, 10.0),
        ];
        let dm = DistanceMatrix::from_locations(&locations);
        let report = InstanceReport::new(&locations, &dm, 6.0, 2.0, 3);
        assert_eq!(report.locations_num, 2);
        assert_eq!(report.coords[1], (3.0, 4.0));
        assert_eq!(report.usable, vec![true, false]);
        assert!((report.dist[0][1] - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_facility_report_adjacency() {
        let plan = FacilityPlan::new(vec![0, 2], vec![0, 2, 2], 80.0);
        let report = FacilityReport::from(&plan);
        assert_eq!(report.installed_markets, vec![0, 2]);
        assert_eq!(report.adj_matrix[0], vec![1, 0, 0]);
        assert_eq!(report.adj_matrix[1], vec![0, 0, 1]);
        assert_eq!(report.adj_matrix[2], vec![0, 0, 1]);
    }

    #[test]
    fn test_maintenance_report() {
        let plan = MaintenancePlan::new(vec![Route::from_edges(vec![(0, 4), (4, 0)])], 33.0);
        let report = MaintenanceReport::from(&plan);
        assert_eq!(report.maintenance_paths, vec![vec![(0, 4), (4, 0)]]);
        assert_eq!(report.maintenance_cost, 33.0);
    }
}
