//! 2-opt refinement over an open path.

use stopover_core::{Destination, distance_km};

/// Improve `stops` in place by repeated 2-opt edge swaps.
///
/// The path is open: the first and last stops are not adjacent, and
/// position 0 never moves because the anchor fixed it during
/// construction. Pairs `(i, k)` are scanned with ascending `i`, then
/// ascending `k`; an accepted swap reverses `stops[i..=k]` and the scan
/// continues over the mutated path. After a full pass the scan restarts
/// if any swap was accepted. Termination follows from each swap strictly
/// shortening a bounded, finite-valued total.
///
/// Returns the number of full scans performed, counting the final one
/// that found nothing left to improve.
pub(crate) fn two_opt(stops: &mut [Destination], threshold_km: f64) -> u32 {
    let mut passes = 0;
    let mut improved = true;
    while improved {
        improved = false;
        passes += 1;
        for i in 1..stops.len().saturating_sub(2) {
            for k in (i + 1)..(stops.len() - 1) {
                // Strict improvement beyond the threshold, so float noise
                // cannot oscillate the scan forever.
                if swap_gain_km(stops, i, k) < -threshold_km {
                    if let Some(segment) = stops.get_mut(i..=k) {
                        segment.reverse();
                    }
                    improved = true;
                }
            }
        }
    }
    passes
}

/// Length change from reconnecting edges `(i-1, i)` and `(k, k+1)` as
/// `(i-1, k)` and `(i, k+1)`. Negative means the swap shortens the path.
///
/// Callers guarantee `1 <= i < k <= stops.len() - 2`.
#[expect(
    clippy::float_arithmetic,
    reason = "edge-swap gain is a difference of leg distances"
)]
fn swap_gain_km(stops: &[Destination], i: usize, k: usize) -> f64 {
    let (Some(before), Some(first), Some(last), Some(after)) = (
        stops.get(i - 1),
        stops.get(i),
        stops.get(k),
        stops.get(k + 1),
    ) else {
        return 0.0;
    };
    let current = distance_km(before.location, first.location)
        + distance_km(last.location, after.location);
    let swapped = distance_km(before.location, last.location)
        + distance_km(first.location, after.location);
    swapped - current
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use stopover_core::path_length_km;

    const THRESHOLD_KM: f64 = 1e-6;

    fn stop(id: u64, lat: f64, lon: f64) -> Destination {
        Destination::new(id, format!("stop {id}"), Coord { x: lon, y: lat })
    }

    fn length_km(stops: &[Destination]) -> f64 {
        let points: Vec<Coord<f64>> = stops.iter().map(|d| d.location).collect();
        path_length_km(&points)
    }

    #[test]
    fn short_paths_are_left_alone() {
        let all = [stop(1, 0.0, 0.0), stop(2, 0.0, 2.0), stop(3, 0.0, 1.0)];
        for n in 0..=all.len() {
            let mut stops = all.get(..n).map(<[Destination]>::to_vec).unwrap_or_default();
            let before = stops.clone();
            let passes = two_opt(&mut stops, THRESHOLD_KM);
            assert_eq!(stops, before);
            assert_eq!(passes, 1);
        }
    }

    #[test]
    fn crossing_edges_are_uncrossed() {
        // A zig-zag over two parallel rows; swapping the middle pair
        // removes the crossing.
        let mut stops = vec![
            stop(1, 0.0, 0.0),
            stop(2, 1.0, 1.0),
            stop(3, 0.0, 1.0),
            stop(4, 1.0, 2.0),
        ];
        let before = length_km(&stops);
        two_opt(&mut stops, THRESHOLD_KM);
        let after = length_km(&stops);
        assert!(after < before, "expected improvement, {before} -> {after}");
        let ids: Vec<u64> = stops.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 3, 2, 4]);
    }

    #[test]
    fn first_position_is_never_disturbed() {
        let mut stops = vec![
            stop(1, 0.0, 0.0),
            stop(2, 1.0, 1.0),
            stop(3, 0.0, 1.0),
            stop(4, 1.0, 2.0),
            stop(5, 0.0, 2.0),
        ];
        two_opt(&mut stops, THRESHOLD_KM);
        assert_eq!(stops.first().map(|d| d.id), Some(1));
    }

    #[test]
    fn converged_path_reports_a_single_pass() {
        // Already optimal: a straight west-to-east sweep.
        let mut stops = vec![
            stop(1, 0.0, 0.0),
            stop(2, 0.0, 1.0),
            stop(3, 0.0, 2.0),
            stop(4, 0.0, 3.0),
        ];
        let before = stops.clone();
        let passes = two_opt(&mut stops, THRESHOLD_KM);
        assert_eq!(stops, before);
        assert_eq!(passes, 1);
    }

    #[test]
    fn no_improving_swap_survives_refinement() {
        let mut stops = vec![
            stop(1, 0.3, 0.1),
            stop(2, -0.2, 0.4),
            stop(3, 0.1, 0.9),
            stop(4, 0.4, 0.5),
            stop(5, -0.1, 0.2),
        ];
        two_opt(&mut stops, THRESHOLD_KM);
        for i in 1..stops.len() - 2 {
            for k in (i + 1)..(stops.len() - 1) {
                assert!(
                    swap_gain_km(&stops, i, k) >= -THRESHOLD_KM,
                    "pair ({i}, {k}) still improves"
                );
            }
        }
    }
}
