//! Nearest-destination query.
//!
//! A one-shot use of the distance model, reported continuously to the
//! user: which destination is closest to where I am right now?

use geo::Coord;

use crate::{Destination, distance_km};

/// Result of a nearest-destination query.
#[derive(Debug, Clone, PartialEq)]
pub struct Nearest<'a> {
    /// The closest destination.
    pub destination: &'a Destination,
    /// Its great-circle distance from the queried origin, in kilometres.
    pub distance_km: f64,
}

/// Find the destination closest to `origin`.
///
/// Ties are broken by first occurrence in the slice. An empty slice yields
/// `None`; "no nearest" is a defined outcome, not a failure.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use stopover_core::{Destination, nearest_destination};
///
/// let destinations = vec![
///     Destination::new(1, "far", Coord { x: 5.0, y: 0.0 }),
///     Destination::new(2, "near", Coord { x: 1.0, y: 0.0 }),
/// ];
/// let nearest = nearest_destination(Coord { x: 0.0, y: 0.0 }, &destinations)
///     .expect("set is non-empty");
/// assert_eq!(nearest.destination.name, "near");
/// ```
#[must_use]
pub fn nearest_destination(
    origin: Coord<f64>,
    destinations: &[Destination],
) -> Option<Nearest<'_>> {
    let mut best: Option<Nearest<'_>> = None;
    for destination in destinations {
        let d = distance_km(origin, destination.location);
        // Strict `<` keeps the earlier destination on exact ties.
        if best.as_ref().is_none_or(|b| d < b.distance_km) {
            best = Some(Nearest {
                destination,
                distance_km: d,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: u64, name: &str, lat: f64, lon: f64) -> Destination {
        Destination::new(id, name, Coord { x: lon, y: lat })
    }

    #[test]
    fn empty_set_reports_no_nearest() {
        assert!(nearest_destination(Coord { x: 0.0, y: 0.0 }, &[]).is_none());
    }

    #[test]
    fn picks_the_closest_destination() {
        let destinations = vec![
            stop(1, "far", 0.0, 3.0),
            stop(2, "near", 0.0, 1.0),
            stop(3, "middling", 0.0, 2.0),
        ];
        let nearest = nearest_destination(Coord { x: 0.0, y: 0.0 }, &destinations)
            .expect("set is non-empty");
        assert_eq!(nearest.destination.id, 2);
        assert!((nearest.distance_km - 111.19493).abs() < 1e-3);
    }

    #[test]
    fn exact_tie_goes_to_the_first_occurrence() {
        // One degree of latitude and one degree of longitude at the
        // equator have identical haversine lengths.
        let destinations = vec![stop(1, "east", 0.0, 1.0), stop(2, "north", 1.0, 0.0)];
        let nearest = nearest_destination(Coord { x: 0.0, y: 0.0 }, &destinations)
            .expect("set is non-empty");
        assert_eq!(nearest.destination.id, 1);
    }
}
