//! Core domain types and boundary traits for the Stopover engine.
//!
//! Stopover sequences a short multi-stop travel route: given a movable
//! origin and a set of named destinations, it produces a visiting order
//! that approximately minimises total great-circle distance. This crate
//! holds the pure pieces: the distance model, the destination and route
//! types, and the traits at the engine's seams (solver, origin feed,
//! place resolver, destination store). Concrete backends live in the
//! satellite crates.
//!
//! Coordinates are WGS84 [`geo::Coord`] values with `x = longitude` and
//! `y = latitude`, in degrees.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod destination;
pub mod distance;
pub mod nearest;
pub mod origin;
pub mod resolver;
pub mod route;
pub mod solver;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use destination::{Destination, Itinerary, ItineraryError, MAX_DESTINATIONS};
pub use distance::{EARTH_RADIUS_KM, distance_km, path_length_km};
pub use nearest::{Nearest, nearest_destination};
pub use origin::{ManualStart, OriginProvider, OriginSelector};
pub use resolver::{PlaceResolver, ResolveError, ResolvedPlace};
pub use route::Route;
pub use solver::{Diagnostics, SolveError, SolveRequest, SolveResponse, Solver};
pub use store::{DestinationStore, SavedPlan};

#[cfg(feature = "store-sqlite")]
#[cfg_attr(docsrs, doc(cfg(feature = "store-sqlite")))]
pub use store::sqlite::{SqliteDestinationStore, SqliteStoreError};
