//! Clustering strategies for cluster-first-route-second solving.
//!
//! - [`sweep`] — Polar-angle sweep heuristic, O(n log n)
//! - [`model_clusters`] — Distance-aware MIP clustering

mod model;
mod sweep;

pub use model::model_clusters;
pub use sweep::sweep;
