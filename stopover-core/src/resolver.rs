//! Place-name resolution seam.
//!
//! The `PlaceResolver` trait abstracts turning free text into a coordinate
//! (and a coordinate back into a display name). The engine treats resolver
//! output as an opaque destination candidate; the HTTP-backed
//! implementation lives in `stopover-data`.

use geo::Coord;
use thiserror::Error;

/// A resolved place: canonical display name plus position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedPlace {
    /// Canonical display name reported by the resolver.
    pub name: String,
    /// Geographic position in degrees.
    pub location: Coord<f64>,
}

/// Errors from [`PlaceResolver`] lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The query matched nothing.
    #[error("no results for {query:?}")]
    NoResults {
        /// The text that was looked up.
        query: String,
    },
    /// The service answered with a non-success HTTP status.
    #[error("lookup request to {url} failed with status {status}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code received.
        status: u16,
    },
    /// The request never completed.
    #[error("lookup request to {url} failed: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Transport-level failure description.
        message: String,
    },
    /// The request exceeded the configured timeout.
    #[error("lookup request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The response body could not be decoded.
    #[error("failed to decode lookup response: {message}")]
    Parse {
        /// Decoder failure description.
        message: String,
    },
}

/// Resolve place names to coordinates and back.
///
/// Both directions are best-match: `resolve` returns the single best hit
/// for a free-text query, and `reverse` names the place nearest to a
/// coordinate.
pub trait PlaceResolver {
    /// Resolve free text to the best-matching place.
    ///
    /// # Errors
    /// [`ResolveError::NoResults`] when nothing matches; transport and
    /// decoding failures otherwise.
    fn resolve(&self, query: &str) -> Result<ResolvedPlace, ResolveError>;

    /// Name the place at (or nearest to) a coordinate.
    ///
    /// # Errors
    /// Same conditions as [`PlaceResolver::resolve`].
    fn reverse(&self, location: Coord<f64>) -> Result<ResolvedPlace, ResolveError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CannedResolver;

    fn resolver() -> CannedResolver {
        CannedResolver::with_places([(
            "india gate".to_owned(),
            ResolvedPlace {
                name: "India Gate, New Delhi".to_owned(),
                location: Coord {
                    x: 77.2295,
                    y: 28.6129,
                },
            },
        )])
    }

    #[test]
    fn known_queries_resolve() {
        let place = resolver().resolve("india gate").expect("query is canned");
        assert_eq!(place.name, "India Gate, New Delhi");
    }

    #[test]
    fn unknown_queries_report_no_results() {
        let err = resolver().resolve("atlantis").expect_err("not canned");
        assert_eq!(
            err,
            ResolveError::NoResults {
                query: "atlantis".to_owned()
            }
        );
    }

    #[test]
    fn reverse_matches_on_the_exact_coordinate() {
        let place = resolver()
            .reverse(Coord {
                x: 77.2295,
                y: 28.6129,
            })
            .expect("coordinate is canned");
        assert_eq!(place.name, "India Gate, New Delhi");
    }
}
