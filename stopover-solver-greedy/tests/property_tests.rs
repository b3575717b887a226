//! Property-based tests for the greedy solver.
//!
//! `proptest` asserts the invariants that must hold for every valid
//! input, complementing the fixed scenarios:
//!
//! - **Permutation:** the route visits exactly the input destinations.
//! - **Monotonic improvement:** refinement never lengthens the
//!   constructed path.
//! - **Idempotence:** re-solving the solver's own output never lengthens
//!   it.
//! - **Local optimality:** no improving 2-opt swap survives refinement.
//! - **Determinism:** identical requests give identical routes.

use geo::Coord;
use proptest::prelude::*;
use stopover_core::{Destination, SolveRequest, Solver, distance_km};
use stopover_solver_greedy::GreedySolver;

const THRESHOLD_KM: f64 = 1e-6;

fn destination_set(max: usize) -> impl Strategy<Value = Vec<Destination>> {
    prop::collection::vec((-85.0f64..85.0, -180.0f64..180.0), 0..=max).prop_map(|coords| {
        coords
            .into_iter()
            .enumerate()
            .map(|(index, (lat, lon))| {
                let id = index as u64 + 1;
                Destination::new(id, format!("stop {id}"), Coord { x: lon, y: lat })
            })
            .collect()
    })
}

fn origin() -> impl Strategy<Value = Option<Coord<f64>>> {
    prop::option::of(
        (-85.0f64..85.0, -180.0f64..180.0).prop_map(|(lat, lon)| Coord { x: lon, y: lat }),
    )
}

fn sorted_ids(destinations: &[Destination]) -> Vec<u64> {
    let mut ids: Vec<u64> = destinations.iter().map(|d| d.id).collect();
    ids.sort_unstable();
    ids
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The route is a permutation of the input: same ids, same length,
    /// nothing duplicated or dropped.
    #[test]
    fn route_is_a_permutation_of_the_input(
        origin in origin(),
        destinations in destination_set(10),
    ) {
        let request = SolveRequest { origin, destinations };
        let response = GreedySolver::new().solve(&request).expect("valid request");

        prop_assert_eq!(response.route.len(), request.destinations.len());
        prop_assert_eq!(
            sorted_ids(response.route.stops()),
            sorted_ids(&request.destinations)
        );
    }

    /// Phase 2 output is never longer than the phase 1 construction.
    #[test]
    fn refinement_never_lengthens_the_path(
        origin in origin(),
        destinations in destination_set(10),
    ) {
        let request = SolveRequest { origin, destinations };
        let response = GreedySolver::new().solve(&request).expect("valid request");

        prop_assert!(
            response.route.length_km() <= response.diagnostics.construction_km + 1e-9,
            "refined {} km vs constructed {} km",
            response.route.length_km(),
            response.diagnostics.construction_km
        );
    }

    /// A 2-opt local optimum is stable: feeding the solver its own output
    /// (with the same origin) never yields a longer route.
    #[test]
    fn resolving_own_output_never_lengthens_it(
        origin in origin(),
        destinations in destination_set(10),
    ) {
        let first = GreedySolver::new()
            .solve(&SolveRequest { origin, destinations })
            .expect("valid request");
        let second = GreedySolver::new()
            .solve(&SolveRequest {
                origin,
                destinations: first.route.stops().to_vec(),
            })
            .expect("valid request");

        prop_assert!(
            second.route.length_km() <= first.route.length_km() + 1e-9,
            "second solve {} km vs first {} km",
            second.route.length_km(),
            first.route.length_km()
        );
    }

    /// No index pair within the refinement scan bounds still offers an
    /// improving swap on the returned route.
    #[test]
    fn no_improving_swap_remains(
        origin in origin(),
        destinations in destination_set(10),
    ) {
        let request = SolveRequest { origin, destinations };
        let response = GreedySolver::new().solve(&request).expect("valid request");
        let stops = response.route.stops();

        for i in 1..stops.len().saturating_sub(2) {
            for k in (i + 1)..(stops.len() - 1) {
                let before = &stops[i - 1];
                let first = &stops[i];
                let last = &stops[k];
                let after = &stops[k + 1];
                let gain = distance_km(before.location, last.location)
                    + distance_km(first.location, after.location)
                    - distance_km(before.location, first.location)
                    - distance_km(last.location, after.location);
                prop_assert!(
                    gain >= -THRESHOLD_KM,
                    "pair ({}, {}) still improves by {} km",
                    i,
                    k,
                    -gain
                );
            }
        }
    }

    /// Solves are pure: the same request always yields the same route.
    #[test]
    fn identical_requests_are_deterministic(
        origin in origin(),
        destinations in destination_set(10),
    ) {
        let request = SolveRequest { origin, destinations };
        let first = GreedySolver::new().solve(&request).expect("valid request");
        let second = GreedySolver::new().solve(&request).expect("valid request");

        prop_assert_eq!(first.route, second.route);
    }
}
