//! Facade crate for the Stopover route-sequencing engine.
//!
//! This crate re-exports the core domain types and exposes the optional
//! solver and store implementations behind feature flags.

#![forbid(unsafe_code)]

pub use stopover_core::{
    Destination, DestinationStore, Diagnostics, Itinerary, ItineraryError, MAX_DESTINATIONS,
    ManualStart, Nearest, OriginProvider, OriginSelector, PlaceResolver, ResolveError,
    ResolvedPlace, Route, SavedPlan, SolveError, SolveRequest, SolveResponse, Solver, distance_km,
    nearest_destination, path_length_km,
};

#[cfg(feature = "store-sqlite")]
pub use stopover_core::{SqliteDestinationStore, SqliteStoreError};

#[cfg(feature = "solver-greedy")]
pub use stopover_solver_greedy::{GreedySolver, GreedySolverConfig};
