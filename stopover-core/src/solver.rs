//! The route-optimizer seam.
//!
//! [`Solver`] turns an anchored destination set into an ordered [`Route`].
//! The engine's default implementation lives in `stopover-solver-greedy`;
//! the trait keeps the core embeddable and lets tests substitute stubs.

use std::time::Duration;

use geo::Coord;
use thiserror::Error;

use crate::{Destination, Route};

/// Parameters for a solve call.
///
/// The origin is optional: without one the solver anchors the route at the
/// first destination in input order. Destinations are taken read-only; the
/// solver never mutates or retains the caller's set.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use stopover_core::{Destination, SolveRequest};
///
/// let request = SolveRequest {
///     origin: Some(Coord { x: 0.0, y: 0.0 }),
///     destinations: vec![Destination::new(1, "only stop", Coord { x: 1.0, y: 0.0 })],
/// };
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveRequest {
    /// Anchor for the route's first leg, when known.
    pub origin: Option<Coord<f64>>,
    /// The destinations to sequence, in the caller's manual order.
    pub destinations: Vec<Destination>,
}

impl SolveRequest {
    /// Check that every coordinate in the request is finite.
    ///
    /// This is the solver's only failure condition: well-formed input can
    /// always be sequenced, and degenerate sizes are defined behaviours
    /// rather than errors.
    ///
    /// # Errors
    /// [`SolveError::NonFiniteOrigin`] or [`SolveError::NonFiniteCoordinate`]
    /// when a coordinate is NaN or infinite.
    pub fn validate(&self) -> Result<(), SolveError> {
        if let Some(origin) = self.origin {
            if !coord_is_finite(origin) {
                return Err(SolveError::NonFiniteOrigin);
            }
        }
        for destination in &self.destinations {
            if !coord_is_finite(destination.location) {
                return Err(SolveError::NonFiniteCoordinate {
                    id: destination.id,
                });
            }
        }
        Ok(())
    }
}

fn coord_is_finite(coord: Coord<f64>) -> bool {
    coord.x.is_finite() && coord.y.is_finite()
}

/// Measurements from a completed solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    /// Wall-clock time the solve took.
    pub solve_time: Duration,
    /// Path length after nearest-neighbor construction, before refinement.
    pub construction_km: f64,
    /// Number of full 2-opt scans performed, including the final one that
    /// found nothing left to improve.
    pub passes: u32,
}

/// Response from a successful solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResponse {
    /// The ordered route.
    pub route: Route,
    /// Measurements from this solve.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`Solver::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The origin coordinate was NaN or infinite.
    #[error("origin coordinates must be finite")]
    NonFiniteOrigin,
    /// A destination coordinate was NaN or infinite.
    #[error("destination {id} has non-finite coordinates")]
    NonFiniteCoordinate {
        /// Identifier of the offending destination.
        id: u64,
    },
}

/// Sequence a destination set into a visiting order.
///
/// Implementations must return a permutation of the request's destinations
/// for every valid input, run synchronously to completion, and hold no
/// state between calls: identical requests yield identical routes.
/// Solvers must be `Send + Sync` so callers may share them across threads.
pub trait Solver: Send + Sync {
    /// Solve a request, producing a route or a validation error.
    ///
    /// # Errors
    /// Only the coordinate checks of [`SolveRequest::validate`] can fail.
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError>;
}
