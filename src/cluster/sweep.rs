//! Sweep clustering heuristic.
//!
//! # Algorithm
//!
//! Sorts non-depot locations by polar angle around the depot, then packs them
//! into consecutive bounded-size clusters by sweeping through the angles.
//! This exploits geographic structure: nearby locations tend to have similar
//! angles and end up served by the same vehicle. O(n log n), no optimality
//! guarantee, and no solver involvement — it trades tour quality for speed.
//!
//! # Reference
//!
//! Gillett, B.E. & Miller, L.R. (1974). "A Heuristic Algorithm for the
//! Vehicle-Dispatch Problem", *Operations Research* 22(2), 340-349.

use std::f64::consts::PI;

use crate::models::Location;

/// Partitions the non-depot locations into clusters of at most
/// `max_per_cluster` members, each cluster including the depot (index 0).
///
/// Locations are taken in sweep order: polar angle around the depot,
/// normalized into [0, 2π). Every non-depot location lands in exactly one
/// cluster; only the last cluster may be smaller than `max_per_cluster`.
///
/// # Panics
///
/// Panics if `max_per_cluster` is zero.
///
/// # Examples
///
/// ```
/// use robomarkt::cluster::sweep;
/// use robomarkt::models::Location;
///
/// let locations = vec![
///     Location::depot(0.0, 0.0),
///     Location::new(1, 1.0, 1.0, true, 0.0),
///     Location::new(2, -1.0, 1.0, true, 0.0),
///     Location::new(3, -1.0, -1.0, true, 0.0),
///     Location::new(4, 1.0, -1.0, true, 0.0),
/// ];
/// let clusters = sweep(&locations, 2);
/// assert_eq!(clusters.len(), 2);
/// assert!(clusters.iter().all(|c| c[0] == 0 && c.len() == 3));
/// ```
pub fn sweep(locations: &[Location], max_per_cluster: usize) -> Vec<Vec<usize>> {
    assert!(max_per_cluster > 0, "cluster capacity must be positive");

    let angles = angles_around_depot(locations);

    // The sweep consumes the descending list from the back, i.e. in
    // increasing angle order.
    let order: Vec<usize> = angles.iter().rev().map(|&(i, _)| i).collect();

    order
        .chunks(max_per_cluster)
        .map(|chunk| {
            let mut cluster = Vec::with_capacity(chunk.len() + 1);
            cluster.push(0);
            cluster.extend_from_slice(chunk);
            cluster
        })
        .collect()
}

/// Computes each non-depot location's polar angle around the depot,
/// normalized into [0, 2π), sorted in descending order.
fn angles_around_depot(locations: &[Location]) -> Vec<(usize, f64)> {
    if locations.is_empty() {
        return Vec::new();
    }
    let depot_x = locations[0].x();
    let depot_y = locations[0].y();

    let mut angles: Vec<(usize, f64)> = locations
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, loc)| {
            let mut angle = (loc.y() - depot_y).atan2(loc.x() - depot_x);
            if angle < 0.0 {
                angle += 2.0 * PI;
            }
            (i, angle)
        })
        .collect();

    angles.sort_by(|a, b| b.1.partial_cmp(&a.1).expect("angles are finite"));
    angles
}
