//! Error types for the two-stage network design pipeline.
//!
//! Every solver-backed operation returns [`Result`]. A failed stage carries
//! enough context (the stage and the reported solver status) for the caller
//! to diagnose the model without the library printing or exiting on its own.

use std::fmt;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The pipeline stage that produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Facility location (site selection) model.
    FacilityLocation,
    /// MIP-based clustering model.
    Clustering,
    /// Vehicle routing (TSP or VRP) model.
    Routing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::FacilityLocation => write!(f, "facility location"),
            Stage::Clustering => write!(f, "clustering"),
            Stage::Routing => write!(f, "routing"),
        }
    }
}

/// Errors produced while building or solving the network design models.
///
/// # Examples
///
/// ```
/// use robomarkt::error::Error;
///
/// let err = Error::MalformedInput {
///     array: "usable",
///     expected: 5,
///     found: 4,
/// };
/// assert!(err.to_string().contains("usable"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Parallel input arrays have mismatched lengths.
    ///
    /// Detected before any model is built; the instance is rejected outright.
    MalformedInput {
        /// Name of the offending array.
        array: &'static str,
        /// Length of the reference array (x coordinates).
        expected: usize,
        /// Actual length found.
        found: usize,
    },
    /// The solver did not report an optimal solution.
    ///
    /// Covers infeasible and unbounded models as well as a time limit expiring
    /// without a feasible incumbent. Fatal to the stage that produced it; the
    /// orchestrator aborts the remaining pipeline instead of guessing.
    NoOptimalSolution {
        /// The stage whose model failed.
        stage: Stage,
        /// Status string reported by the solver.
        status: String,
    },
}

impl Error {
    /// Wraps a solver resolution failure for the given stage.
    pub(crate) fn no_optimal(stage: Stage, err: good_lp::ResolutionError) -> Self {
        let status = match err {
            good_lp::ResolutionError::Infeasible => "infeasible".to_string(),
            good_lp::ResolutionError::Unbounded => "unbounded".to_string(),
            other => other.to_string(),
        };
        Error::NoOptimalSolution { stage, status }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedInput {
                array,
                expected,
                found,
            } => write!(
                f,
                "malformed input: array `{array}` has length {found}, expected {expected}"
            ),
            Error::NoOptimalSolution { stage, status } => {
                write!(f, "{stage} problem has no optimal solution: {status}")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_input_display() {
        let err = Error::MalformedInput {
            array: "build_costs",
            expected: 10,
            found: 9,
        };
        let msg = err.to_string();
        assert!(msg.contains("build_costs"));
        assert!(msg.contains("10"));
        assert!(msg.contains("9"));
    }

    #[test]
    fn test_no_optimal_display() {
        let err = Error::NoOptimalSolution {
            stage: Stage::Routing,
            status: "infeasible".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "routing problem has no optimal solution: infeasible"
        );
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::FacilityLocation.to_string(), "facility location");
        assert_eq!(Stage::Clustering.to_string(), "clustering");
        assert_eq!(Stage::Routing.to_string(), "routing");
    }
}
