//! External collaborators for the Stopover engine.
//!
//! The engine core consumes plain data; this crate supplies the pieces
//! that talk to the outside world, currently a Nominatim-backed
//! implementation of the [`PlaceResolver`](stopover_core::PlaceResolver)
//! seam.

#![forbid(unsafe_code)]

pub mod geocode;

pub use geocode::{NominatimResolver, NominatimResolverConfig, ResolverBuildError};
