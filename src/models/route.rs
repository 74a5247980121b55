//! Route and edge types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;

/// A directed edge between two location indices.
pub type Edge = (usize, usize);

/// One vehicle's tour: an ordered cycle of directed edges through the depot.
///
/// The edge set visits each of its locations exactly once. Edges are stored
/// in the order the solver produced them, not necessarily in traversal order;
/// [`Route::node_sequence`] reconstructs the depot-first visit order.
///
/// # Examples
///
/// ```
/// use robomarkt::models::Route;
///
/// let route = Route::from_edges(vec![(0, 2), (2, 1), (1, 0)]);
/// assert_eq!(route.len(), 3);
/// assert_eq!(route.node_sequence(), Some(vec![0, 2, 1, 0]));
/// assert_eq!(route.to_string(), "0 2 1 0");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    edges: Vec<Edge>,
}

impl Route {
    /// Creates a route from a set of directed edges.
    pub fn from_edges(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    /// Returns the edges of this route.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the number of edges (equal to the number of visited locations).
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if this route has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Total length of the route under the given distance matrix.
    pub fn total_distance(&self, distances: &DistanceMatrix) -> f64 {
        self.edges.iter().map(|&(i, j)| distances.get(i, j)).sum()
    }

    /// Rewrites every edge through an index mapping table.
    ///
    /// Used to translate a route solved on a reduced instance (dense indices
    /// 0..m) back to original location IDs.
    pub fn map_indices(&self, mapping: &[usize]) -> Route {
        Route::from_edges(
            self.edges
                .iter()
                .map(|&(i, j)| (mapping[i], mapping[j]))
                .collect(),
        )
    }

    /// Reconstructs the visit order starting and ending at the depot (node 0).
    ///
    /// Returns `None` if the edges do not form a single cycle through node 0.
    pub fn node_sequence(&self) -> Option<Vec<usize>> {
        if self.edges.is_empty() {
            return None;
        }
        let max_node = self
            .edges
            .iter()
            .map(|&(i, j)| i.max(j))
            .max()
            .unwrap_or(0);
        let mut successor: Vec<Option<usize>> = vec![None; max_node + 1];
        for &(from, to) in &self.edges {
            if successor[from].is_some() {
                // Duplicate out-edge, not a simple cycle.
                return None;
            }
            successor[from] = Some(to);
        }

        let mut visited = vec![false; max_node + 1];
        let mut nodes = Vec::with_capacity(self.edges.len() + 1);
        let mut current = 0;
        for _ in 0..self.edges.len() {
            if visited[current] {
                // Returned to an earlier node before consuming every edge.
                return None;
            }
            visited[current] = true;
            nodes.push(current);
            current = successor.get(current).copied().flatten()?;
        }
        if current != 0 {
            return None;
        }
        nodes.push(0);
        Some(nodes)
    }
}

impl fmt::Display for Route {
    /// Formats the route as a space-separated node sequence, or the raw edge
    /// list if the edges do not form a depot cycle.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node_sequence() {
            Some(nodes) => {
                let parts: Vec<String> = nodes.iter().map(|n| n.to_string()).collect();
                write!(f, "{}", parts.join(" "))
            }
            None => write!(f, "{:?}", self.edges),
        }
    }
}
