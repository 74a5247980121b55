//! Vehicle routing strategies.
//!
//! - [`solve_tsp`] — Exact single-route TSP with lazy subtour cuts
//! - [`vrp::solve_exact`] / [`vrp::solve_iterative`] — Full fleet MILP
//! - [`find_vehicle_routes`] — Strategy dispatch, including the
//!   cluster-first-route-second decompositions

mod tsp;
pub mod vrp;

pub use tsp::solve_tsp;
pub use vrp::RoutingParams;

use crate::cluster::{model_clusters, sweep};
use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::models::{Location, MaintenancePlan, Route};

/// How the vehicle routing stage is solved.
///
/// The full MILP variants are optimal but scale badly; the cluster-first
/// variants decompose into independent per-cluster TSPs and are the
/// recommended default for larger instances, since the fixed per-vehicle fee
/// dominates the cost structure and makes near-optimal clustering
/// acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Full MILP with all subtour constraints enumerated upfront.
    ExactAllConstraints,
    /// Full MILP with lazy subtour elimination.
    IterativeCuts,
    /// Sweep clustering, then one exact TSP per cluster.
    #[default]
    SweepClusterAndRoute,
    /// MIP clustering, then one exact TSP per cluster.
    ModelClusterAndRoute,
}

/// Routes the maintenance vehicles over the given facilities (index 0 =
/// depot) using the selected strategy.
///
/// `markets` and `distances` describe the reduced instance over opened
/// facilities only; returned routes use these local indices.
///
/// # Errors
///
/// - [`Error::MalformedInput`] if the distance matrix size doesn't match the
///   market count.
/// - [`Error::NoOptimalSolution`] if any underlying model fails.
pub fn find_vehicle_routes(
    markets: &[Location],
    distances: &DistanceMatrix,
    params: &RoutingParams,
    strategy: Strategy,
) -> Result<MaintenancePlan> {
    if distances.size() != markets.len() {
        return Err(Error::MalformedInput {
            array: "distances",
            expected: markets.len(),
            found: distances.size(),
        });
    }

    match strategy {
        Strategy::ExactAllConstraints => vrp::solve_exact(distances, params),
        Strategy::IterativeCuts => vrp::solve_iterative(distances, params),
        Strategy::SweepClusterAndRoute => {
            let clusters = sweep(markets, params.max_stores_per_route);
            route_clusters(&clusters, distances, params)
        }
        Strategy::ModelClusterAndRoute => {
            let clusters = model_clusters(distances, params.max_stores_per_route)?;
            route_clusters(&clusters, distances, params)
        }
    }
}

/// Solves one TSP per cluster and aggregates costs: distance fees per route
/// plus one fixed fee per cluster.
fn route_clusters(
    clusters: &[Vec<usize>],
    distances: &DistanceMatrix,
    params: &RoutingParams,
) -> Result<MaintenancePlan> {
    let mut routes: Vec<Route> = Vec::with_capacity(clusters.len());
    let mut cost = 0.0;

    for cluster in clusters {
        let sub = distances.submatrix(cluster);
        let local_route = solve_tsp(&sub)?;
        cost += local_route.total_distance(&sub) * params.truck_fee_per_km;
        // Translate cluster-relative indices back to market indices.
        routes.push(local_route.map_indices(cluster));
    }

    cost += params.truck_fixed_fee * routes.len() as f64;
    Ok(MaintenancePlan::new(routes, cost))
}
