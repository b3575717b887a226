//! Great-circle distance over geographic coordinates.
//!
//! The haversine formula on a spherical Earth is the engine's only
//! distance metric. It is deliberately a total function: callers own
//! coordinate validation, and out-of-range degree values produce a
//! mathematically defined (if non-physical) result rather than an error.

use geo::Coord;

/// Mean Earth radius in kilometres used by the haversine computation.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometres.
///
/// Symmetric, non-negative, and zero for identical points. Coordinates
/// are degrees with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use stopover_core::distance_km;
///
/// let delhi = Coord { x: 77.2090, y: 28.6139 };
/// let mumbai = Coord { x: 72.8777, y: 19.0760 };
/// let d = distance_km(delhi, mumbai);
/// assert!((d - 1148.1).abs() < 5.0);
/// assert_eq!(distance_km(delhi, delhi), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point by nature"
)]
pub fn distance_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 near antipodal pairs; asin must
    // stay in domain for the function to be total.
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Total length of the open path visiting `points` in order, in kilometres.
///
/// Returns `0.0` for fewer than two points.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "summing leg distances is floating-point by nature"
)]
pub fn path_length_km(points: &[Coord<f64>]) -> f64 {
    points
        .windows(2)
        .map(|leg| match leg {
            [from, to] => distance_km(*from, *to),
            _ => 0.0,
        })
        .sum()
}
