//! Multi-vehicle routing MILP.
//!
//! Full fleet formulation: binary truck-used indicators plus binary
//! per-truck edge variables. Trucks are taken in index order (symmetry
//! breaking), every used truck leaves the depot, flow is conserved at each
//! node, a truck's path holds at most `capacity + 1` edges, and every
//! non-depot node is entered exactly once.
//!
//! Subtour elimination comes in two flavors, chosen by the caller:
//!
//! - **Enumerated** ([`solve_exact`]): one constraint per truck per subset of
//!   non-depot nodes up to `capacity + 1` members, added upfront. Exponential
//!   in node count; only for small instances.
//! - **Lazy** ([`solve_iterative`]): start unconstrained, decompose each
//!   solution across all trucks, cut the shortest subtour found and
//!   re-solve until clean.

use good_lp::{
    constraint, default_solver, variable, variables, Constraint, Expression, Solution,
    SolverModel, Variable,
};

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result, Stage};
use crate::models::{Edge, MaintenancePlan, Route};
use crate::subtour::shortest_subtour;

/// Parameters of the vehicle routing stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutingParams {
    /// Maximum number of facilities a single vehicle can serve.
    pub max_stores_per_route: usize,
    /// Fixed fee paid per vehicle used.
    pub truck_fixed_fee: f64,
    /// Fee per unit of distance traveled.
    pub truck_fee_per_km: f64,
}

/// Solves the VRP with every subtour-elimination constraint enumerated
/// upfront.
///
/// Tractable only for small instances; prefer [`solve_iterative`] or the
/// cluster-first strategies otherwise.
pub fn solve_exact(distances: &DistanceMatrix, params: &RoutingParams) -> Result<MaintenancePlan> {
    let (paths, cost) = solve_fleet_model(distances, params, &[], true)?;
    Ok(plan_from_paths(paths, cost))
}

/// Solves the VRP with lazy subtour elimination.
///
/// Starts without subtour constraints; while the decomposition of the
/// solution across all trucks finds a subtour, adds one cut per truck
/// forbidding that subtour's edges and re-solves.
pub fn solve_iterative(
    distances: &DistanceMatrix,
    params: &RoutingParams,
) -> Result<MaintenancePlan> {
    let mut cuts: Vec<Vec<Edge>> = Vec::new();
    loop {
        let (paths, cost) = solve_fleet_model(distances, params, &cuts, false)?;
        match shortest_subtour(&paths) {
            None => return Ok(plan_from_paths(paths, cost)),
            Some(subtour) => {
                log::debug!(
                    "vrp: cut {} forbids subtour of {} edges",
                    cuts.len(),
                    subtour.len()
                );
                cuts.push(subtour);
            }
        }
    }
}

fn plan_from_paths(paths: Vec<Vec<Edge>>, cost: f64) -> MaintenancePlan {
    MaintenancePlan::new(paths.into_iter().map(Route::from_edges).collect(), cost)
}

/// Builds and solves the fleet model once, under the given subtour cuts
/// (applied per truck) and optionally the full enumerated subset
/// constraints. Returns one edge list per used truck plus the total cost.
fn solve_fleet_model(
    distances: &DistanceMatrix,
    params: &RoutingParams,
    cuts: &[Vec<Edge>],
    enumerate_subsets: bool,
) -> Result<(Vec<Vec<Edge>>, f64)> {
    let n = distances.size();
    if n <= 1 {
        return Ok((Vec::new(), 0.0));
    }
    let num_trucks = n - 1;

    let mut vars = variables!();

    // used[h]: 1 if truck h drives a route.
    let used: Vec<Variable> = (0..num_trucks)
        .map(|_| vars.add(variable().binary()))
        .collect();
    // travel[h][i][j]: 1 if truck h's path contains edge (i, j).
    let travel: Vec<Vec<Vec<Variable>>> = (0..num_trucks)
        .map(|_| {
            (0..n)
                .map(|_| (0..n).map(|_| vars.add(variable().binary())).collect())
                .collect()
        })
        .collect();

    let mut terms: Vec<Expression> = Vec::new();
    for h in 0..num_trucks {
        terms.push(params.truck_fixed_fee * used[h]);
        for i in 0..n {
            for j in 0..n {
                terms.push(params.truck_fee_per_km * distances.get(i, j) * travel[h][i][j]);
            }
        }
    }
    let objective: Expression = terms.into_iter().sum();

    let mut constraints: Vec<Constraint> = Vec::new();

    for h in 0..num_trucks {
        // A used truck leaves the depot exactly once.
        let departures: Expression = (1..n).map(|j| Expression::from(travel[h][0][j])).sum();
        constraints.push(constraint!(departures - used[h] == 0.0));

        // Flow conservation at every node.
        for i in 0..n {
            let out: Expression = (0..n).map(|j| Expression::from(travel[h][i][j])).sum();
            let inc: Expression = (0..n).map(|j| Expression::from(travel[h][j][i])).sum();
            constraints.push(constraint!(out - inc == 0.0));
        }

        // Path length bounded by capacity + 1 edges, zero if unused.
        let path_edges: Expression = (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .map(|(i, j)| Expression::from(travel[h][i][j]))
            .sum();
        let cap = (params.max_stores_per_route + 1) as f64;
        constraints.push(constraint!(path_edges - cap * used[h] <= 0.0));
    }

    // Trucks are taken in index order.
    for h in 0..num_trucks.saturating_sub(1) {
        constraints.push(constraint!(used[h] - used[h + 1] >= 0.0));
    }

    // No self-loops.
    for i in 0..n {
        let loops: Expression = (0..num_trucks)
            .map(|h| Expression::from(travel[h][i][i]))
            .sum();
        constraints.push(constraint!(loops == 0.0));
    }

    // Every non-depot node is entered by exactly one truck exactly once.
    for i in 1..n {
        let entered: Expression = (0..num_trucks)
            .flat_map(|h| (0..n).map(move |j| (h, j)))
            .map(|(h, j)| Expression::from(travel[h][j][i]))
            .sum();
        constraints.push(constraint!(entered == 1.0));
    }

    if enumerate_subsets {
        // Upfront subtour elimination over every subset of non-depot nodes
        // small enough to fit one truck. Singleton subsets are excluded by
        // the self-loop constraints already.
        let nodes: Vec<usize> = (1..n).collect();
        for_each_subset(&nodes, params.max_stores_per_route + 1, &mut |subset| {
            for h in 0..num_trucks {
                let within: Expression = subset
                    .iter()
                    .flat_map(|&i| subset.iter().map(move |&j| (i, j)))
                    .map(|(i, j)| Expression::from(travel[h][i][j]))
                    .sum();
                let bound = (subset.len() - 1) as f64;
                constraints.push(constraint!(within <= bound));
            }
        });
    }

    for cut in cuts {
        let bound = (cut.len() - 1) as f64;
        for h in 0..num_trucks {
            let selected: Expression = cut
                .iter()
                .map(|&(i, j)| Expression::from(travel[h][i][j]))
                .sum();
            constraints.push(constraint!(selected <= bound));
        }
    }

    let mut model = vars.minimise(objective).using(default_solver);
    for c in constraints {
        model = model.with(c);
    }
    let solution = model
        .solve()
        .map_err(|e| Error::no_optimal(Stage::Routing, e))?;

    let mut paths = Vec::new();
    let mut cost = 0.0;
    for h in 0..num_trucks {
        if solution.value(used[h]) > 0.5 {
            let edges: Vec<Edge> = (0..n)
                .flat_map(|i| (0..n).map(move |j| (i, j)))
                .filter(|&(i, j)| solution.value(travel[h][i][j]) > 0.5)
                .collect();
            cost += params.truck_fixed_fee;
            cost += edges
                .iter()
                .map(|&(i, j)| params.truck_fee_per_km * distances.get(i, j))
                .sum::<f64>();
            paths.push(edges);
        }
    }
    Ok((paths, cost))
}

/// Calls `f` with every subset of `nodes` of size 2..=`max_size`, in
/// lexicographic order.
fn for_each_subset(nodes: &[usize], max_size: usize, f: &mut impl FnMut(&[usize])) {
    fn recurse(
        nodes: &[usize],
        start: usize,
        current: &mut Vec<usize>,
        max_size: usize,
        f: &mut impl FnMut(&[usize]),
    ) {
        if current.len() >= 2 {
            f(current);
        }
        if current.len() == max_size {
            return;
        }
        for i in start..nodes.len() {
            current.push(nodes[i]);
            recurse(nodes, i + 1, current, max_size, f);
            current.pop();
        }
    }
    if max_size >= 2 {
        recurse(nodes, 0, &mut Vec::new(), max_size, f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;

    fn unit_square_matrix() -> DistanceMatrix {
        let locations = vec![
            Location::depot(0.0, 0.0),
            Location::new(1, 1.0, 0.0, true, 0.0),
            Location::new(2, 1.0, 1.0, true, 0.0),
            Location::new(3, 0.0, 1.0, true, 0.0),
        ];
        DistanceMatrix::from_locations(&locations)
    }

    fn params(cap: usize) -> RoutingParams {
        RoutingParams {
            max_stores_per_route: cap,
            truck_fixed_fee: 10.0,
            truck_fee_per_km: 1.0,
        }
    }

    fn assert_covers_once(plan: &MaintenancePlan, n: usize) {
        for node in 1..n {
            let entries: usize = plan
                .routes()
                .iter()
                .map(|r| r.edges().iter().filter(|&&(_, j)| j == node).count())
                .sum();
            assert_eq!(entries, 1, "node {node} entered {entries} times");
        }
    }

    #[test]
    fn test_single_truck_perimeter() {
        let dm = unit_square_matrix();
        let plan = solve_iterative(&dm, &params(3)).expect("feasible");
        assert_eq!(plan.num_routes(), 1);
        assert_eq!(plan.routes()[0].len(), 4);
        assert!((plan.maintenance_cost() - 14.0).abs() < 1e-6);
        assert_covers_once(&plan, 4);
    }

    #[test]
    fn test_capacity_one_uses_three_trucks() {
        let dm = unit_square_matrix();
        let plan = solve_iterative(&dm, &params(1)).expect("feasible");
        assert_eq!(plan.num_routes(), 3);
        for route in plan.routes() {
            assert_eq!(route.len(), 2); // out-and-back
        }
        assert_covers_once(&plan, 4);
    }

    #[test]
    fn test_exact_matches_iterative() {
        let dm = unit_square_matrix();
        let exact = solve_exact(&dm, &params(2)).expect("feasible");
        let iterative = solve_iterative(&dm, &params(2)).expect("feasible");
        assert!((exact.maintenance_cost() - iterative.maintenance_cost()).abs() < 1e-6);
        assert_covers_once(&exact, 4);
        assert_covers_once(&iterative, 4);
    }

    #[test]
    fn test_solution_is_subtour_free() {
        let dm = unit_square_matrix();
        let plan = solve_iterative(&dm, &params(2)).expect("feasible");
        let edge_sets: Vec<Vec<Edge>> = plan
            .routes()
            .iter()
            .map(|r| r.edges().to_vec())
            .collect();
        assert_eq!(shortest_subtour(&edge_sets), None);
    }

    #[test]
    fn test_depot_only_instance() {
        let dm = DistanceMatrix::new(1);
        let plan = solve_iterative(&dm, &params(3)).expect("trivial");
        assert_eq!(plan.num_routes(), 0);
        assert_eq!(plan.maintenance_cost(), 0.0);
    }

    #[test]
    fn test_subset_enumeration() {
        let mut seen = Vec::new();
        for_each_subset(&[1, 2, 3], 2, &mut |s| seen.push(s.to_vec()));
        assert_eq!(seen, vec![vec![1, 2], vec![1, 3], vec![2, 3]]);

        let mut count = 0;
        for_each_subset(&[1, 2, 3, 4], 3, &mut |_| count += 1);
        // C(4,2) + C(4,3) = 6 + 4.
        assert_eq!(count, 10);
    }
}
