//! Exact TSP with lazy subtour elimination.
//!
//! # Algorithm
//!
//! Binary edge variables with unit in/out-degree per node give the classic
//! assignment relaxation of the TSP. Its optimum may split into disjoint
//! cycles, so the solve runs a cutting-plane loop: decompose the selected
//! edges, and while a subtour exists add a cut forbidding all of its edges at
//! once (`sum(edges) <= |subtour| - 1`) and re-solve. Each cut permanently
//! removes at least one configuration from a finite feasible region, so the
//! loop terminates with a single Hamiltonian cycle.
//!
//! Cuts live for the remainder of the solve and are never removed; since the
//! solver consumes its model, every iteration rebuilds the formulation with
//! the full accumulated cut list.

use good_lp::{
    constraint, default_solver, variable, variables, Constraint, Expression, Solution,
    SolverModel, Variable,
};

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result, Stage};
use crate::models::{Edge, Route};
use crate::subtour::shortest_subtour;

/// Finds the minimum-length Hamiltonian cycle over all locations of the
/// given distance matrix, starting and ending at index 0.
///
/// Instances with fewer than two locations yield an empty route.
///
/// # Errors
///
/// Returns [`Error::NoOptimalSolution`] if the solver fails on the base
/// model or any cut iteration.
///
/// # Examples
///
/// ```
/// use robomarkt::distance::DistanceMatrix;
/// use robomarkt::routing::solve_tsp;
///
/// // Unit square: the optimal tour is the perimeter.
/// let dm = DistanceMatrix::from_data(
///     4,
///     vec![
///         0.0, 1.0, 1.5, 1.0,
///         1.0, 0.0, 1.0, 1.5,
///         1.5, 1.0, 0.0, 1.0,
///         1.0, 1.5, 1.0, 0.0,
///     ],
/// )
/// .unwrap();
/// let route = solve_tsp(&dm).unwrap();
/// assert_eq!(route.len(), 4);
/// assert!((route.total_distance(&dm) - 4.0).abs() < 1e-6);
/// ```
pub fn solve_tsp(distances: &DistanceMatrix) -> Result<Route> {
    let n = distances.size();
    if n < 2 {
        return Ok(Route::from_edges(Vec::new()));
    }

    let mut cuts: Vec<Vec<Edge>> = Vec::new();
    loop {
        let edges = solve_assignment_with_cuts(distances, &cuts)?;
        match shortest_subtour(std::slice::from_ref(&edges)) {
            None => return Ok(Route::from_edges(edges)),
            Some(subtour) => {
                log::debug!(
                    "tsp: cut {} forbids subtour of {} edges",
                    cuts.len(),
                    subtour.len()
                );
                cuts.push(subtour);
            }
        }
    }
}

/// Solves the degree-constrained assignment model under the given subtour
/// cuts and returns the selected edges.
fn solve_assignment_with_cuts(distances: &DistanceMatrix, cuts: &[Vec<Edge>]) -> Result<Vec<Edge>> {
    let n = distances.size();

    let mut vars = variables!();
    // x[i][j]: 1 if the tour travels directly from i to j.
    let x: Vec<Vec<Variable>> = (0..n)
        .map(|_| (0..n).map(|_| vars.add(variable().binary())).collect())
        .collect();

    let objective: Expression = (0..n)
        .flat_map(|i| (0..n).map(move |j| (i, j)))
        .map(|(i, j)| distances.get(i, j) * x[i][j])
        .sum();

    let mut constraints: Vec<Constraint> = Vec::new();
    for i in 0..n {
        // No self-loops.
        constraints.push(constraint!(x[i][i] == 0.0));

        // Exactly one outgoing and one incoming edge per node.
        let outgoing: Expression = (0..n).map(|j| Expression::from(x[i][j])).sum();
        constraints.push(constraint!(outgoing == 1.0));
        let incoming: Expression = (0..n).map(|j| Expression::from(x[j][i])).sum();
        constraints.push(constraint!(incoming == 1.0));
    }

    for cut in cuts {
        let selected: Expression = cut.iter().map(|&(i, j)| Expression::from(x[i][j])).sum();
        let bound = (cut.len() - 1) as f64;
        constraints.push(constraint!(selected <= bound));
    }

    let mut model = vars.minimise(objective).using(default_solver);
    for c in constraints {
        model = model.with(c);
    }
    let solution = model
        .solve()
        .map_err(|e| Error::no_optimal(Stage::Routing, e))?;

    let edges: Vec<Edge> = (0..n)
        .flat_map(|i| (0..n).map(move |j| (i, j)))
        .filter(|&(i, j)| solution.value(x[i][j]) > 0.5)
        .collect();
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;

    #[test]
    fn test_trivial_sizes() {
        assert!(solve_tsp(&DistanceMatrix::new(0)).expect("empty").is_empty());
        assert!(solve_tsp(&DistanceMatrix::new(1)).expect("single").is_empty());

        let mut dm = DistanceMatrix::new(2);
        dm.set(0, 1, 3.0);
        dm.set(1, 0, 3.0);
        let route = solve_tsp(&dm).expect("pair");
        assert_eq!(route.len(), 2);
        assert!((route.total_distance(&dm) - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_square_perimeter() {
        let locations = vec![
            Location::depot(0.0, 0.0),
            Location::new(1, 1.0, 0.0, true, 0.0),
            Location::new(2, 1.0, 1.0, true, 0.0),
            Location::new(3, 0.0, 1.0, true, 0.0),
        ];
        let dm = DistanceMatrix::from_locations(&locations);
        let route = solve_tsp(&dm).expect("feasible");
        assert_eq!(route.len(), 4);
        assert!((route.total_distance(&dm) - 4.0).abs() < 1e-6);
        assert!(route.node_sequence().is_some());
    }

    #[test]
    fn test_two_clusters_need_cuts() {
        // Two tight triangles far apart: the assignment relaxation prefers
        // two 3-cycles, so the cutting-plane loop must fire at least once.
        let locations = vec![
            Location::depot(0.0, 0.0),
            Location::new(1, 1.0, 0.0, true, 0.0),
            Location::new(2, 0.5, 1.0, true, 0.0),
            Location::new(3, 10.0, 0.0, true, 0.0),
            Location::new(4, 11.0, 0.0, true, 0.0),
            Location::new(5, 10.5, 1.0, true, 0.0),
        ];
        let dm = DistanceMatrix::from_locations(&locations);
        let route = solve_tsp(&dm).expect("feasible");

        assert_eq!(route.len(), 6);
        // The terminal solution must be subtour-free.
        assert_eq!(shortest_subtour(&[route.edges().to_vec()]), None);

        // Every node has exactly one outgoing and one incoming edge.
        for node in 0..6 {
            assert_eq!(route.edges().iter().filter(|&&(i, _)| i == node).count(), 1);
            assert_eq!(route.edges().iter().filter(|&&(_, j)| j == node).count(), 1);
        }
    }
}
