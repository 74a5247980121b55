//! End-to-end network design pipeline.
//!
//! Sequences the two stages: facility location first, then vehicle routing
//! over the reduced instance of opened facilities. Routing results come back
//! in reduced indices and are translated to original location IDs before
//! aggregation. Any stage failure aborts the whole run; no partial plans are
//! returned.

use std::time::{Duration, Instant};

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::location::{solve_facility_location, FacilityParams};
use crate::models::{
    FacilityPlan, FacilityReport, InstanceReport, Location, MaintenancePlan, MaintenanceReport,
};
use crate::routing::{find_vehicle_routes, RoutingParams, Strategy};

/// A network design problem instance: locations plus their distance matrix.
///
/// The distance matrix is computed once at construction and reused read-only
/// by every stage.
///
/// # Examples
///
/// ```
/// use robomarkt::pipeline::Instance;
///
/// let instance = Instance::from_parallel_arrays(
///     &[0.0, 1.0],
///     &[0.0, 0.0],
///     &[true, true],
///     &[0.0, 25.0],
/// )
/// .unwrap();
/// assert_eq!(instance.len(), 2);
/// assert!((instance.distances().get(0, 1) - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    locations: Vec<Location>,
    distances: DistanceMatrix,
}

impl Instance {
    /// Builds an instance from pre-constructed locations.
    pub fn new(locations: Vec<Location>) -> Self {
        let distances = DistanceMatrix::from_locations(&locations);
        Self {
            locations,
            distances,
        }
    }

    /// Builds an instance from the raw parallel input arrays.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] if the arrays have different
    /// lengths or are empty (the depot at index 0 must exist).
    pub fn from_parallel_arrays(
        x_coords: &[f64],
        y_coords: &[f64],
        usable: &[bool],
        build_costs: &[f64],
    ) -> Result<Self> {
        let n = x_coords.len();
        if n == 0 {
            return Err(Error::MalformedInput {
                array: "x_coords",
                expected: 1,
                found: 0,
            });
        }
        for (array, len) in [
            ("y_coords", y_coords.len()),
            ("usable", usable.len()),
            ("build_costs", build_costs.len()),
        ] {
            if len != n {
                return Err(Error::MalformedInput {
                    array,
                    expected: n,
                    found: len,
                });
            }
        }

        let locations = (0..n)
            .map(|i| Location::new(i, x_coords[i], y_coords[i], usable[i], build_costs[i]))
            .collect();
        Ok(Self::new(locations))
    }

    /// The locations of this instance.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// The pairwise distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns `true` if the instance has no locations.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Builds the serializable record of this instance and its parameters.
    pub fn report(&self, facility: &FacilityParams, routing: &RoutingParams) -> InstanceReport {
        InstanceReport::new(
            &self.locations,
            &self.distances,
            facility.max_dist_from_market,
            facility.min_dist_between_markets,
            routing.max_stores_per_route,
        )
    }
}

/// The combined result of both pipeline stages.
#[derive(Debug, Clone)]
pub struct NetworkSolution {
    facility: FacilityPlan,
    maintenance: MaintenancePlan,
    installation_time: Duration,
    maintenance_time: Duration,
}

impl NetworkSolution {
    /// The facility location plan.
    pub fn facility(&self) -> &FacilityPlan {
        &self.facility
    }

    /// The maintenance routing plan, in original location indices.
    pub fn maintenance(&self) -> &MaintenancePlan {
        &self.maintenance
    }

    /// Total build cost of the opened facilities.
    pub fn installation_cost(&self) -> f64 {
        self.facility.installation_cost()
    }

    /// Total vehicle routing cost.
    pub fn maintenance_cost(&self) -> f64 {
        self.maintenance.maintenance_cost()
    }

    /// Combined cost of both stages.
    pub fn total_cost(&self) -> f64 {
        self.installation_cost() + self.maintenance_cost()
    }

    /// Wall-clock time spent in the facility location stage.
    pub fn installation_time(&self) -> Duration {
        self.installation_time
    }

    /// Wall-clock time spent in the routing stage.
    pub fn maintenance_time(&self) -> Duration {
        self.maintenance_time
    }

    /// Builds the serializable facility stage record.
    pub fn facility_report(&self) -> FacilityReport {
        FacilityReport::from(&self.facility)
    }

    /// Builds the serializable routing stage record.
    pub fn maintenance_report(&self) -> MaintenanceReport {
        MaintenanceReport::from(&self.maintenance)
    }
}

/// Runs the full two-stage pipeline on an instance.
///
/// # Errors
///
/// Propagates [`Error::MalformedInput`] for an empty instance and
/// [`Error::NoOptimalSolution`] from either stage. A routing failure after a
/// successful facility solve still fails the whole run.
pub fn solve(
    instance: &Instance,
    facility_params: &FacilityParams,
    routing_params: &RoutingParams,
    strategy: Strategy,
) -> Result<NetworkSolution> {
    if instance.is_empty() {
        return Err(Error::MalformedInput {
            array: "locations",
            expected: 1,
            found: 0,
        });
    }

    let start = Instant::now();
    let facility =
        solve_facility_location(instance.locations(), instance.distances(), facility_params)?;
    let installation_time = start.elapsed();
    log::debug!(
        "installation stage: {} facilities, cost {}, {:?}",
        facility.num_opened(),
        facility.installation_cost(),
        installation_time
    );

    // Reduced routing instance over the opened facilities only; local index
    // 0 is the depot because the opened set is ascending and contains 0.
    let opened = facility.opened().to_vec();
    let markets: Vec<Location> = opened
        .iter()
        .map(|&i| instance.locations()[i].clone())
        .collect();
    let reduced = instance.distances().submatrix(&opened);

    let start = Instant::now();
    let local_plan = find_vehicle_routes(&markets, &reduced, routing_params, strategy)?;
    let maintenance = local_plan.map_indices(&opened);
    let maintenance_time = start.elapsed();
    log::debug!(
        "maintenance stage: {} routes, cost {}, {:?}",
        maintenance.num_routes(),
        maintenance.maintenance_cost(),
        maintenance_time
    );

    Ok(NetworkSolution {
        facility,
        maintenance,
        installation_time,
        maintenance_time,
    })
}
