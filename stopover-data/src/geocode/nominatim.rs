//! Nominatim API response types and their conversion to domain values.
//!
//! Nominatim's `/search` endpoint answers with an array of hits and its
//! `/reverse` endpoint with a single object; both report coordinates as
//! JSON strings. Conversion keeps the first hit (the service orders by
//! relevance) and rejects anything it cannot turn into a finite pair.
//!
//! See: <https://nominatim.org/release-docs/latest/api/Search/>

use geo::Coord;
use serde::Deserialize;
use stopover_core::{ResolveError, ResolvedPlace};

/// One `/search` hit.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchHit {
    /// Canonical display name of the matched place.
    pub(crate) display_name: String,
    /// Latitude in degrees, as a decimal string.
    pub(crate) lat: String,
    /// Longitude in degrees, as a decimal string.
    pub(crate) lon: String,
}

/// The `/reverse` payload.
///
/// On failure the service answers `200 OK` with an `error` field instead
/// of place data.
#[derive(Debug, Deserialize)]
pub(crate) struct ReverseReply {
    /// Display name of the nearest place, absent on failure.
    pub(crate) display_name: Option<String>,
    /// Latitude in degrees, as a decimal string.
    pub(crate) lat: Option<String>,
    /// Longitude in degrees, as a decimal string.
    pub(crate) lon: Option<String>,
    /// Service-reported failure, e.g. "Unable to geocode".
    pub(crate) error: Option<String>,
}

/// Keep the best `/search` hit, or report that nothing matched.
pub(crate) fn place_from_hits(
    query: &str,
    hits: Vec<SearchHit>,
) -> Result<ResolvedPlace, ResolveError> {
    let Some(hit) = hits.into_iter().next() else {
        return Err(ResolveError::NoResults {
            query: query.to_owned(),
        });
    };
    Ok(ResolvedPlace {
        location: Coord {
            x: parse_coordinate(&hit.lon)?,
            y: parse_coordinate(&hit.lat)?,
        },
        name: hit.display_name,
    })
}

/// Convert a `/reverse` payload, treating a service-side error as
/// "no results" for the queried coordinate.
pub(crate) fn place_from_reverse(
    location: Coord<f64>,
    reply: ReverseReply,
) -> Result<ResolvedPlace, ResolveError> {
    if let Some(error) = reply.error {
        log::debug!("reverse lookup of {}, {} failed: {error}", location.y, location.x);
        return Err(ResolveError::NoResults {
            query: format!("{}, {}", location.y, location.x),
        });
    }
    match (reply.display_name, reply.lat, reply.lon) {
        (Some(name), Some(lat), Some(lon)) => Ok(ResolvedPlace {
            location: Coord {
                x: parse_coordinate(&lon)?,
                y: parse_coordinate(&lat)?,
            },
            name,
        }),
        _ => Err(ResolveError::Parse {
            message: "reverse reply is missing place fields".to_owned(),
        }),
    }
}

fn parse_coordinate(raw: &str) -> Result<f64, ResolveError> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ResolveError::Parse {
            message: format!("invalid coordinate {raw:?}"),
        })
}
