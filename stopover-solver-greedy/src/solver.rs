//! `GreedySolver` implementation: nearest-neighbor construction plus
//! 2-opt refinement.

use std::time::Instant;

use geo::Coord;
use stopover_core::{
    Destination, Diagnostics, Route, SolveError, SolveRequest, SolveResponse, Solver, distance_km,
    path_length_km,
};

use crate::refine::two_opt;

/// Gains smaller than this are treated as floating-point noise.
const IMPROVEMENT_THRESHOLD_KM: f64 = 1e-6;

/// Configuration for [`GreedySolver`].
#[derive(Debug, Clone)]
pub struct GreedySolverConfig {
    /// Minimum length reduction, in kilometres, for a 2-opt swap to be
    /// accepted.
    pub improvement_threshold_km: f64,
}

impl Default for GreedySolverConfig {
    fn default() -> Self {
        Self {
            improvement_threshold_km: IMPROVEMENT_THRESHOLD_KM,
        }
    }
}

/// Deterministic nearest-neighbor + 2-opt route solver.
///
/// The solver holds no state between calls; it reads the request, builds a
/// fresh permutation, and returns it. See the crate docs for the phase
/// breakdown.
#[derive(Debug, Clone, Default)]
pub struct GreedySolver {
    config: GreedySolverConfig,
}

impl GreedySolver {
    /// Construct a solver using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: GreedySolverConfig) -> Self {
        Self { config }
    }
}

impl Solver for GreedySolver {
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError> {
        request.validate()?;
        let started_at = Instant::now();

        // Zero or one destination: nothing to sequence.
        if request.destinations.len() <= 1 {
            let route = Route::new(request.destinations.clone());
            return Ok(SolveResponse {
                diagnostics: Diagnostics {
                    solve_time: started_at.elapsed(),
                    construction_km: route.length_km(),
                    passes: 0,
                },
                route,
            });
        }

        let anchor = request
            .origin
            .or_else(|| request.destinations.first().map(|d| d.location))
            .unwrap_or(Coord { x: 0.0, y: 0.0 });

        let mut stops = nearest_neighbor_chain(anchor, &request.destinations);
        let construction_km = stops_length_km(&stops);
        let passes = two_opt(&mut stops, self.config.improvement_threshold_km);

        let route = Route::new(stops);
        log::debug!(
            "sequenced {} stops in {} passes: {:.3} km -> {:.3} km",
            route.len(),
            passes,
            construction_km,
            route.length_km()
        );

        Ok(SolveResponse {
            diagnostics: Diagnostics {
                solve_time: started_at.elapsed(),
                construction_km,
                passes,
            },
            route,
        })
    }
}

/// Build the initial permutation by greedy chaining.
///
/// The first stop minimises distance from the anchor; each later stop is
/// the nearest not-yet-visited destination from the current last stop.
/// Ties go to the earlier input element because the input-order scan only
/// replaces its candidate on a strict improvement.
fn nearest_neighbor_chain(anchor: Coord<f64>, destinations: &[Destination]) -> Vec<Destination> {
    let mut pool = destinations.to_vec();
    let mut stops = Vec::with_capacity(pool.len());

    let mut from = anchor;
    while !pool.is_empty() {
        let next = pool.remove(index_of_nearest(from, &pool));
        from = next.location;
        stops.push(next);
    }
    stops
}

/// Index of the pool entry nearest to `from`; earlier entries win ties.
fn index_of_nearest(from: Coord<f64>, pool: &[Destination]) -> usize {
    let mut best = 0;
    let mut best_km = f64::INFINITY;
    for (index, destination) in pool.iter().enumerate() {
        let d = distance_km(from, destination.location);
        if d < best_km {
            best_km = d;
            best = index;
        }
    }
    best
}

fn stops_length_km(stops: &[Destination]) -> f64 {
    let points: Vec<Coord<f64>> = stops.iter().map(|d| d.location).collect();
    path_length_km(&points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn stop(id: u64, lat: f64, lon: f64) -> Destination {
        Destination::new(id, format!("stop {id}"), Coord { x: lon, y: lat })
    }

    fn ids(stops: &[Destination]) -> Vec<u64> {
        stops.iter().map(|d| d.id).collect()
    }

    #[rstest]
    fn chain_greedily_walks_the_nearest_unvisited() {
        // Collinear along the equator; each step picks the closest point
        // not yet visited.
        let destinations = vec![stop(1, 0.0, 1.0), stop(2, 0.0, 3.0), stop(3, 0.0, 2.0)];
        let stops = nearest_neighbor_chain(Coord { x: 0.0, y: 0.0 }, &destinations);
        assert_eq!(ids(&stops), vec![1, 3, 2]);
    }

    #[rstest]
    fn equidistant_candidates_resolve_to_input_order() {
        // Both destinations are one degree from the anchor.
        let destinations = vec![stop(1, 0.0, 1.0), stop(2, 1.0, 0.0)];
        let stops = nearest_neighbor_chain(Coord { x: 0.0, y: 0.0 }, &destinations);
        assert_eq!(ids(&stops), vec![1, 2]);
    }

    #[rstest]
    fn anchorless_requests_start_from_the_first_destination() {
        let request = SolveRequest {
            origin: None,
            destinations: vec![stop(1, 0.0, 3.0), stop(2, 0.0, 1.0), stop(3, 0.0, 2.0)],
        };
        let response = GreedySolver::new().solve(&request).expect("valid request");
        // The first input destination is zero distance from itself, so it
        // anchors the route.
        assert_eq!(ids(response.route.stops()), vec![1, 3, 2]);
    }

    #[rstest]
    fn empty_request_yields_an_empty_route() {
        let request = SolveRequest {
            origin: Some(Coord { x: 0.0, y: 0.0 }),
            destinations: Vec::new(),
        };
        let response = GreedySolver::new().solve(&request).expect("valid request");
        assert!(response.route.is_empty());
        assert_eq!(response.diagnostics.passes, 0);
    }

    #[rstest]
    fn single_destination_is_returned_unchanged() {
        let only = stop(7, 12.0, 34.0);
        let request = SolveRequest {
            origin: Some(Coord { x: 0.0, y: 0.0 }),
            destinations: vec![only.clone()],
        };
        let response = GreedySolver::new().solve(&request).expect("valid request");
        assert_eq!(response.route.stops(), &[only]);
    }

    #[rstest]
    fn non_finite_input_is_rejected() {
        let request = SolveRequest {
            origin: Some(Coord {
                x: f64::NAN,
                y: 0.0,
            }),
            destinations: vec![stop(1, 0.0, 1.0)],
        };
        let err = GreedySolver::new().solve(&request).expect_err("NaN origin");
        assert_eq!(err, SolveError::NonFiniteOrigin);
    }
}
