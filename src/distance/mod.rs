//! Distance computation.
//!
//! - [`DistanceMatrix`] — Dense pairwise Euclidean distance matrix

mod matrix;

pub use matrix::DistanceMatrix;
