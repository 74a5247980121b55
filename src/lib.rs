//! # robomarkt
//!
//! Two-stage logistics network design: select facility sites with an
//! assignment-based MILP (coverage, cost, and minimum-separation
//! constraints), then route maintenance vehicles between the opened
//! facilities under per-vehicle capacity limits, using lazy subtour
//! elimination or cluster-first-route-second decomposition.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Location, Route, plans, boundary records)
//! - [`distance`] — Pairwise Euclidean distance matrix
//! - [`subtour`] — Cycle decomposition for subtour detection
//! - [`cluster`] — Sweep and MIP clustering strategies
//! - [`location`] — Facility location MILP
//! - [`routing`] — TSP and VRP solvers plus strategy dispatch
//! - [`pipeline`] — End-to-end orchestration with cost and timing aggregation
//! - [`error`] — Structured error taxonomy
//!
//! ## Example
//!
//! ```
//! use robomarkt::location::FacilityParams;
//! use robomarkt::pipeline::{solve, Instance};
//! use robomarkt::routing::{RoutingParams, Strategy};
//!
//! let instance = Instance::from_parallel_arrays(
//!     &[0.0, 1.0, 0.0],
//!     &[0.0, 0.0, 1.0],
//!     &[true, true, true],
//!     &[5.0, 5.0, 5.0],
//! )?;
//! let solution = solve(
//!     &instance,
//!     &FacilityParams {
//!         max_dist_from_market: 2.0,
//!         min_dist_between_markets: 0.0,
//!     },
//!     &RoutingParams {
//!         max_stores_per_route: 3,
//!         truck_fixed_fee: 10.0,
//!         truck_fee_per_km: 1.0,
//!     },
//!     Strategy::SweepClusterAndRoute,
//! )?;
//! assert!(solution.facility().is_opened(0));
//! # Ok::<(), robomarkt::error::Error>(())
//! ```

pub mod cluster;
pub mod distance;
pub mod error;
pub mod location;
pub mod models;
pub mod pipeline;
pub mod routing;
pub mod subtour;
