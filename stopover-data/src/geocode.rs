//! Place-name resolution against a Nominatim service.

mod nominatim;
mod resolver;

pub use resolver::{NominatimResolver, NominatimResolverConfig, ResolverBuildError};
