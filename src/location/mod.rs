//! Facility location model.
//!
//! Assignment-based MILP for site selection: binary open indicators per
//! usable candidate, binary assignment indicators per (location, candidate)
//! pair. Every location must be served by exactly one opened facility within
//! a maximum service distance, opened facilities must keep a minimum
//! separation, and the depot (location 0) is always open. Minimizes total
//! build cost.

use good_lp::{
    constraint, default_solver, variable, variables, Constraint, Expression, Solution,
    SolverModel, Variable,
};

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result, Stage};
use crate::models::{FacilityPlan, Location};

/// Parameters of the facility location stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacilityParams {
    /// Maximum distance at which a location can be served by a facility.
    pub max_dist_from_market: f64,
    /// Minimum distance between any two opened facilities.
    pub min_dist_between_markets: f64,
}

/// Selects the cost-minimal set of facilities to open and assigns every
/// location to one of them.
///
/// The depot (index 0) is always opened. A candidate is any location whose
/// `usable` flag is set. Coincident location pairs (distance exactly zero)
/// switch the open/assign link from `assign <= open` to `assign == open`,
/// so the model stays exact instead of relying on a vacuous relaxation.
///
/// # Errors
///
/// - [`Error::MalformedInput`] if the distance matrix size doesn't match the
///   location count.
/// - [`Error::NoOptimalSolution`] if the model is infeasible (e.g. some
///   location has no candidate within `max_dist_from_market`).
///
/// # Examples
///
/// ```
/// use robomarkt::distance::DistanceMatrix;
/// use robomarkt::location::{solve_facility_location, FacilityParams};
/// use robomarkt::models::Location;
///
/// let locations = vec![
///     Location::depot(0.0, 0.0),
///     Location::new(1, 1.0, 0.0, true, 50.0),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations);
/// let params = FacilityParams {
///     max_dist_from_market: 2.0,
///     min_dist_between_markets: 0.0,
/// };
/// let plan = solve_facility_location(&locations, &dm, &params).unwrap();
/// assert_eq!(plan.opened(), &[0]);
/// ```
pub fn solve_facility_location(
    locations: &[Location],
    distances: &DistanceMatrix,
    params: &FacilityParams,
) -> Result<FacilityPlan> {
    let n = locations.len();
    if distances.size() != n {
        return Err(Error::MalformedInput {
            array: "distances",
            expected: n,
            found: distances.size(),
        });
    }

    // The depot is a candidate regardless of its flag; it is always open.
    let candidates: Vec<usize> = (0..n)
        .filter(|&j| j == 0 || locations[j].usable())
        .collect();
    let m = candidates.len();

    let mut vars = variables!();

    // open[k]: 1 if a facility is built at candidates[k].
    let open: Vec<Variable> = (0..m).map(|_| vars.add(variable().binary())).collect();
    // assign[i][k]: 1 if location i is served by candidates[k].
    let assign: Vec<Vec<Variable>> = (0..n)
        .map(|_| (0..m).map(|_| vars.add(variable().binary())).collect())
        .collect();

    let objective: Expression = (0..m)
        .map(|k| locations[candidates[k]].build_cost() * open[k])
        .sum();

    let mut constraints: Vec<Constraint> = Vec::new();

    // The depot facility is forced open.
    constraints.push(constraint!(open[0] == 1.0));

    for i in 0..n {
        // Every location is served by exactly one facility.
        let served: Expression = (0..m).map(|k| Expression::from(assign[i][k])).sum();
        constraints.push(constraint!(served == 1.0));

        for k in 0..m {
            let d = distances.get(i, candidates[k]);
            if d == 0.0 {
                // Coincident pair (or self-assignment): the assignment holds
                // exactly when the facility is open.
                constraints.push(constraint!(assign[i][k] - open[k] == 0.0));
            } else {
                constraints.push(constraint!(assign[i][k] - open[k] <= 0.0));
            }
            if d > params.max_dist_from_market {
                // Out of service range.
                constraints.push(constraint!(assign[i][k] == 0.0));
            }
        }
    }

    // Minimum separation between opened facilities, linearized with an
    // instance-derived big-M and active only when both are open. Pairs
    // already far enough apart satisfy the constraint for any open values.
    let big_m = params.min_dist_between_markets + 1.0;
    for k in 0..m {
        for l in (k + 1)..m {
            let d = distances.get(candidates[k], candidates[l]);
            if d < params.min_dist_between_markets {
                // d + M*(2 - open_k - open_l) >= min_dist, rearranged.
                constraints.push(constraint!(
                    big_m * open[k] + big_m * open[l]
                        <= 2.0 * big_m + d - params.min_dist_between_markets
                ));
            }
        }
    }

    let mut model = vars.minimise(objective).using(default_solver);
    for c in constraints {
        model = model.with(c);
    }
    let solution = model
        .solve()
        .map_err(|e| Error::no_optimal(Stage::FacilityLocation, e))?;

    let opened: Vec<usize> = (0..m)
        .filter(|&k| solution.value(open[k]) > 0.5)
        .map(|k| candidates[k])
        .collect();
    let assignment: Vec<usize> = (0..n)
        .map(|i| {
            let k = (0..m)
                .find(|&k| solution.value(assign[i][k]) > 0.5)
                .expect("every location is assigned in an optimal solution");
            candidates[k]
        })
        .collect();
    let installation_cost: f64 = opened.iter().map(|&j| locations[j].build_cost()).sum();

    log::debug!(
        "facility location: opened {} of {} candidates, cost {installation_cost}",
        opened.len(),
        m
    );
    Ok(FacilityPlan::new(opened, assignment, installation_cost))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Location> {
        vec![
            Location::new(0, 0.0, 0.0, true, 10.0),
            Location::new(1, 1.0, 0.0, true, 10.0),
            Location::new(2, 1.0, 1.0, true, 10.0),
            Location::new(3, 0.0, 1.0, true, 10.0),
        ]
    }

    #[test]
    fn test_unit_square_opens_only_depot() {
        let locations = unit_square();
        let dm = DistanceMatrix::from_locations(&locations);
        let params = FacilityParams {
            max_dist_from_market: 2.0f64.sqrt(),
            min_dist_between_markets: 0.0,
        };
        let plan = solve_facility_location(&locations, &dm, &params).expect("feasible");
        assert_eq!(plan.opened(), &[0]);
        assert!((plan.installation_cost() - 10.0).abs() < 1e-6);
        for i in 0..4 {
            assert_eq!(plan.assigned_facility(i), 0);
        }
    }

    #[test]
    fn test_depot_always_opened() {
        // Depot is expensive, a nearby candidate is free, but the depot must
        // still be opened.
        let locations = vec![
            Location::new(0, 0.0, 0.0, true, 1000.0),
            Location::new(1, 0.5, 0.0, true, 0.0),
        ];
        let dm = DistanceMatrix::from_locations(&locations);
        let params = FacilityParams {
            max_dist_from_market: 10.0,
            min_dist_between_markets: 0.0,
        };
        let plan = solve_facility_location(&locations, &dm, &params).expect("feasible");
        assert!(plan.is_opened(0));
    }

    #[test]
    fn test_min_separation_closes_one_of_two() {
        // Both far-side candidates would open on their own, but they are 1.0
        // apart with a 3.0 separation requirement: exactly one survives.
        let locations = vec![
            Location::depot(0.0, 0.0),
            Location::new(1, 10.0, 0.0, true, 5.0),
            Location::new(2, 11.0, 0.0, true, 5.0),
            Location::new(3, 10.5, 1.0, false, 0.0),
        ];
        let dm = DistanceMatrix::from_locations(&locations);
        let params = FacilityParams {
            max_dist_from_market: 2.0,
            min_dist_between_markets: 3.0,
        };
        let plan = solve_facility_location(&locations, &dm, &params).expect("feasible");
        assert!(plan.is_opened(0));
        assert_eq!(plan.num_opened(), 2);
        assert!(plan.is_opened(1) ^ plan.is_opened(2));
    }

    #[test]
    fn test_unusable_site_never_opened() {
        let locations = vec![
            Location::depot(0.0, 0.0),
            Location::new(1, 3.0, 0.0, false, 0.0),
            Location::new(2, 3.5, 0.0, true, 7.0),
        ];
        let dm = DistanceMatrix::from_locations(&locations);
        let params = FacilityParams {
            max_dist_from_market: 1.0,
            min_dist_between_markets: 0.0,
        };
        let plan = solve_facility_location(&locations, &dm, &params).expect("feasible");
        assert!(!plan.is_opened(1));
        assert!(plan.is_opened(2));
        assert_eq!(plan.assigned_facility(1), 2);
    }

    #[test]
    fn test_unservable_location_is_infeasible() {
        let locations = vec![
            Location::depot(0.0, 0.0),
            Location::new(1, 100.0, 0.0, false, 0.0),
        ];
        let dm = DistanceMatrix::from_locations(&locations);
        let params = FacilityParams {
            max_dist_from_market: 5.0,
            min_dist_between_markets: 0.0,
        };
        let err = solve_facility_location(&locations, &dm, &params).unwrap_err();
        assert!(matches!(
            err,
            Error::NoOptimalSolution {
                stage: Stage::FacilityLocation,
                ..
            }
        ));
    }

    #[test]
    fn test_coincident_locations_handled() {
        // Locations 1 and 2 coincide: the equality link forbids opening both
        // (the shared point cannot be assigned twice), without dividing by a
        // zero distance anywhere.
        let locations = vec![
            Location::depot(0.0, 0.0),
            Location::new(1, 2.0, 0.0, true, 1.0),
            Location::new(2, 2.0, 0.0, true, 1.0),
        ];
        let dm = DistanceMatrix::from_locations(&locations);
        let params = FacilityParams {
            max_dist_from_market: 5.0,
            min_dist_between_markets: 0.0,
        };
        let plan = solve_facility_location(&locations, &dm, &params).expect("feasible");
        assert!(plan.is_opened(0));
        assert!(!(plan.is_opened(1) && plan.is_opened(2)));
    }

    #[test]
    fn test_mismatched_distance_matrix() {
        let locations = unit_square();
        let dm = DistanceMatrix::new(3);
        let params = FacilityParams {
            max_dist_from_market: 1.0,
            min_dist_between_markets: 0.0,
        };
        let err = solve_facility_location(&locations, &dm, &params).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }
}
