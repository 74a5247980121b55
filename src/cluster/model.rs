//! MIP-based clustering.
//!
//! Alternative to the sweep heuristic: a small assignment model that
//! minimizes the number of clusters (weighted to dominate) plus the total
//! pairwise distance inside each cluster. Slower than the sweep but aware of
//! actual distances rather than angles alone.

use good_lp::{
    constraint, default_solver, variable, variables, Constraint, Expression, Solution,
    SolverModel, Variable,
};

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result, Stage};

/// Partitions locations 1..n into clusters of at most `max_per_cluster`
/// members by solving a MIP; the depot (index 0) is a member of every
/// cluster.
///
/// Minimizes `W * num_clusters + sum of intra-cluster pairwise distances`,
/// where `W` is derived from the instance so that using one fewer cluster
/// always beats any distance saving.
///
/// # Errors
///
/// Returns [`Error::NoOptimalSolution`] if the clustering model cannot be
/// solved to optimality.
pub fn model_clusters(
    distances: &DistanceMatrix,
    max_per_cluster: usize,
) -> Result<Vec<Vec<usize>>> {
    let n = distances.size();
    if n <= 1 {
        return Ok(Vec::new());
    }
    let num_clusters = n - 1;

    let mut vars = variables!();

    // used[c]: 1 if cluster c is non-empty.
    let used: Vec<Variable> = (0..num_clusters)
        .map(|_| vars.add(variable().binary()))
        .collect();
    // assign[i][c]: 1 if location i belongs to cluster c.
    let assign: Vec<Vec<Variable>> = (0..n)
        .map(|_| {
            (0..num_clusters)
                .map(|_| vars.add(variable().binary()))
                .collect()
        })
        .collect();
    // together[i][j - i - 1] (i < j): 1 if i and j share a cluster.
    let together: Vec<Vec<Variable>> = (0..n)
        .map(|i| {
            ((i + 1)..n)
                .map(|_| vars.add(variable().binary()))
                .collect()
        })
        .collect();
    let pair = |i: usize, j: usize| together[i][j - i - 1];

    // Opening a cluster must cost more than any total of pairwise distances
    // it could save.
    let cluster_weight = (n * n) as f64 * distances.max_distance() + 1.0;

    let mut terms: Vec<Expression> = Vec::new();
    for &c in &used {
        terms.push(cluster_weight * c);
    }
    for i in 0..n {
        for j in (i + 1)..n {
            terms.push(distances.get(i, j) * pair(i, j));
        }
    }
    let objective: Expression = terms.into_iter().sum();

    let mut constraints: Vec<Constraint> = Vec::new();

    // Every non-depot location sits in exactly one cluster.
    for row in assign.iter().skip(1) {
        let total: Expression = row.iter().map(|&v| Expression::from(v)).sum();
        constraints.push(constraint!(total == 1.0));
    }

    // Use clusters in index order.
    for c in 0..num_clusters.saturating_sub(1) {
        constraints.push(constraint!(used[c] - used[c + 1] >= 0.0));
    }

    for c in 0..num_clusters {
        // Capacity: members (depot included) bounded by max + 1, and zero if
        // the cluster is unused.
        let members: Expression = (0..n).map(|i| Expression::from(assign[i][c])).sum();
        let cap = (max_per_cluster + 1) as f64;
        constraints.push(constraint!(members - cap * used[c] <= 0.0));

        // The depot belongs to every used cluster.
        constraints.push(constraint!(assign[0][c] - used[c] == 0.0));

        // Link co-membership indicators to assignments.
        for i in 0..n {
            for j in (i + 1)..n {
                constraints.push(constraint!(pair(i, j) - assign[i][c] - assign[j][c] >= -1.0));
            }
        }
    }

    let mut model = vars.minimise(objective).using(default_solver);
    for c in constraints {
        model = model.with(c);
    }
    let solution = model
        .solve()
        .map_err(|e| Error::no_optimal(Stage::Clustering, e))?;

    let mut clusters = Vec::new();
    for c in 0..num_clusters {
        if solution.value(used[c]) > 0.5 {
            let members: Vec<usize> = (0..n)
                .filter(|&i| solution.value(assign[i][c]) > 0.5)
                .collect();
            clusters.push(members);
        }
    }
    Ok(clusters)
}
