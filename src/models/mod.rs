//! Domain model types for the network design problem.
//!
//! Provides the core abstractions: candidate locations with build costs and
//! usability flags, directed edges and vehicle routes, the plans produced by
//! each pipeline stage, and the serializable boundary records handed to
//! persistence collaborators.

mod location;
mod plan;
mod report;
mod route;

pub use location::Location;
pub use plan::{FacilityPlan, MaintenancePlan};
pub use report::{FacilityReport, InstanceReport, MaintenanceReport};
pub use route::{Edge, Route};
