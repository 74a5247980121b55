//! Facility and maintenance plan types.

use serde::{Deserialize, Serialize};

use super::Route;

/// The outcome of the facility location stage.
///
/// Holds the set of opened facilities (always containing the depot, index 0),
/// the assignment of every location to exactly one opened facility, and the
/// total installation cost.
///
/// # Examples
///
/// ```
/// use robomarkt::models::FacilityPlan;
///
/// let plan = FacilityPlan::new(vec![0, 3], vec![0, 0, 3, 3], 250.0);
/// assert!(plan.is_opened(3));
/// assert!(!plan.is_opened(1));
/// assert_eq!(plan.assigned_facility(2), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityPlan {
    opened: Vec<usize>,
    assignment: Vec<usize>,
    installation_cost: f64,
}

impl FacilityPlan {
    /// Creates a plan from the opened facility indices, the per-location
    /// assignment table and the installation cost.
    pub fn new(opened: Vec<usize>, assignment: Vec<usize>, installation_cost: f64) -> Self {
        Self {
            opened,
            assignment,
            installation_cost,
        }
    }

    /// Indices of the opened facilities, in ascending order.
    pub fn opened(&self) -> &[usize] {
        &self.opened
    }

    /// Returns `true` if a facility is opened at the given location.
    pub fn is_opened(&self, location: usize) -> bool {
        self.opened.contains(&location)
    }

    /// The facility serving the given location.
    pub fn assigned_facility(&self, location: usize) -> usize {
        self.assignment[location]
    }

    /// The full assignment table (location index → facility index).
    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    /// Total build cost of the opened facilities.
    pub fn installation_cost(&self) -> f64 {
        self.installation_cost
    }

    /// Number of opened facilities.
    pub fn num_opened(&self) -> usize {
        self.opened.len()
    }
}

/// The outcome of the vehicle routing stage.
///
/// One [`Route`] per vehicle plus the total maintenance cost (fixed fees and
/// distance fees combined).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenancePlan {
    routes: Vec<Route>,
    maintenance_cost: f64,
}

impl MaintenancePlan {
    /// Creates a plan from per-vehicle routes and the total cost.
    pub fn new(routes: Vec<Route>, maintenance_cost: f64) -> Self {
        Self {
            routes,
            maintenance_cost,
        }
    }

    /// The vehicle routes.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of vehicles used.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total maintenance cost.
    pub fn maintenance_cost(&self) -> f64 {
        self.maintenance_cost
    }

    /// Rewrites every route through an index mapping table.
    pub fn map_indices(&self, mapping: &[usize]) -> MaintenancePlan {
        MaintenancePlan::new(
            self.routes.iter().map(|r| r.map_indices(mapping)).collect(),
            self.maintenance_cost,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facility_plan_accessors() {
        let plan = FacilityPlan::new(vec![0, 2], vec![0, 2, 2], 100.0);
        assert_eq!(plan.opened(), &[0, 2]);
        assert_eq!(plan.num_opened(), 2);
        assert!(plan.is_opened(0));
        assert!(!plan.is_opened(1));
        assert_eq!(plan.assigned_facility(1), 2);
        assert_eq!(plan.installation_cost(), 100.0);
    }

    #[test]
    fn test_maintenance_plan_accessors() {
        let routes = vec![
            Route::from_edges(vec![(0, 1), (1, 0)]),
            Route::from_edges(vec![(0, 2), (2, 0)]),
        ];
        let plan = MaintenancePlan::new(routes, 42.0);
        assert_eq!(plan.num_routes(), 2);
        assert_eq!(plan.maintenance_cost(), 42.0);
    }

    #[test]
    fn test_maintenance_plan_map_indices() {
        let plan = MaintenancePlan::new(vec![Route::from_edges(vec![(0, 1), (1, 0)])], 10.0);
        let mapped = plan.map_indices(&[0, 5]);
        assert_eq!(mapped.routes()[0].edges(), &[(0, 5), (5, 0)]);
        assert_eq!(mapped.maintenance_cost(), 10.0);
    }
}
