//! Ordered visiting sequences produced by the optimizer.

use geo::Coord;

use crate::{Destination, distance::path_length_km};

/// An ordered open path through destinations.
///
/// A route has no identity of its own: it is recomputed wholesale on every
/// solve and replaces the previous result. The recorded length covers the
/// legs between the stops; the leg from the origin to the first stop is the
/// caller's to add, since the route does not retain the anchor.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use stopover_core::{Destination, Route};
///
/// let stops = vec![
///     Destination::new(1, "first", Coord { x: 1.0, y: 0.0 }),
///     Destination::new(2, "second", Coord { x: 2.0, y: 0.0 }),
/// ];
/// let route = Route::new(stops);
/// assert_eq!(route.len(), 2);
/// assert!(route.length_km() > 111.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    stops: Vec<Destination>,
    length_km: f64,
}

impl Route {
    /// Construct a route from ordered stops, computing its total length.
    #[must_use]
    pub fn new(stops: Vec<Destination>) -> Self {
        let points: Vec<Coord<f64>> = stops.iter().map(|d| d.location).collect();
        Self {
            length_km: path_length_km(&points),
            stops,
        }
    }

    /// Construct an empty route.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            stops: Vec::new(),
            length_km: 0.0,
        }
    }

    /// The stops in visiting order.
    #[must_use]
    pub fn stops(&self) -> &[Destination] {
        &self.stops
    }

    /// Total great-circle length over the stops, in kilometres.
    #[must_use]
    pub const fn length_km(&self) -> f64 {
        self.length_km
    }

    /// Number of stops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the route has no stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Consume the route, yielding its stops.
    #[must_use]
    pub fn into_stops(self) -> Vec<Destination> {
        self.stops
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::empty()
    }
}
