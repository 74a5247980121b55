//! Cycle decomposition for subtour detection.
//!
//! # Algorithm
//!
//! The edge set a routing model selects for one vehicle is a union of simple
//! cycles: flow conservation gives every participating node in-degree and
//! out-degree one. Decomposing that set tells us whether the vehicle drives a
//! single tour (valid) or several disjoint cycles (the extra cycles are
//! subtours that must be cut off).
//!
//! Decomposition builds a successor lookup table (from-node → edge) once and
//! walks it, marking consumed edges in a visited array, so the whole pass is
//! O(edges) rather than the O(edges²) of repeated list removal.
//!
//! # Complexity
//!
//! O(E + V) per edge set, where E = edges and V = largest node index.

use crate::models::Edge;

/// Finds the shortest subtour across a list of per-vehicle edge sets.
///
/// Each edge set is decomposed independently; the globally shortest cycle
/// that is strictly smaller than its own edge set is returned. `None` means
/// every edge set is a single full cycle, i.e. the solution is subtour-free.
///
/// Edge sets with at most 2 edges cannot contain a proper subtour and
/// contribute nothing. Any 2-edge cycle found inside a larger set is returned
/// immediately: no shorter subtour exists. Ties between equal-length subtours
/// are broken by traversal order (first found wins).
///
/// # Examples
///
/// ```
/// use robomarkt::subtour::shortest_subtour;
///
/// // A single Hamiltonian cycle: no subtour.
/// let tour = vec![(0, 1), (1, 2), (2, 0)];
/// assert_eq!(shortest_subtour(&[tour]), None);
///
/// // Two disjoint cycles: the shorter one is the subtour to cut.
/// let broken = vec![(0, 1), (1, 0), (2, 3), (3, 4), (4, 2)];
/// assert_eq!(shortest_subtour(&[broken]), Some(vec![(0, 1), (1, 0)]));
/// ```
pub fn shortest_subtour(edge_sets: &[Vec<Edge>]) -> Option<Vec<Edge>> {
    let mut min_subtour: Option<Vec<Edge>> = None;

    for edges in edge_sets {
        // Two edges or fewer form at most one cycle.
        if edges.len() <= 2 {
            continue;
        }

        let max_node = edges.iter().map(|&(i, j)| i.max(j)).max().unwrap_or(0);

        // Successor table: from-node -> index into `edges`.
        let mut successor: Vec<Option<usize>> = vec![None; max_node + 1];
        for (idx, &(from, _)) in edges.iter().enumerate() {
            debug_assert!(successor[from].is_none(), "node {from} has out-degree > 1");
            successor[from] = Some(idx);
        }

        let mut visited = vec![false; edges.len()];
        let mut cycles: Vec<Vec<Edge>> = Vec::new();

        for start_idx in 0..edges.len() {
            if visited[start_idx] {
                continue;
            }

            // Walk successor edges until we return to the start node.
            let start_node = edges[start_idx].0;
            let mut cycle = Vec::new();
            let mut idx = start_idx;
            loop {
                visited[idx] = true;
                let (_, to) = edges[idx];
                cycle.push(edges[idx]);
                if to == start_node {
                    break;
                }
                match successor[to] {
                    Some(next) if !visited[next] => idx = next,
                    // Open chain; the contract (in/out-degree <= 1, union of
                    // cycles) excludes this, so just drop the fragment.
                    _ => {
                        cycle.clear();
                        break;
                    }
                }
            }

            if cycle.len() == 2 {
                // A 2-cycle is a minimal subtour; nothing can beat it.
                return Some(cycle);
            }
            if !cycle.is_empty() {
                cycles.push(cycle);
            }
        }

        // A single cycle covering the whole edge set is the valid tour.
        if cycles.len() <= 1 {
            continue;
        }

        for cycle in cycles {
            match &min_subtour {
                Some(best) if cycle.len() >= best.len() => {}
                _ => min_subtour = Some(cycle),
            }
        }
    }

    min_subtour
}
