//! Origin sources and their precedence.
//!
//! The route anchor can come from a live position feed or from a start
//! the user set by hand. At most one is authoritative at a time: a live
//! fix, when available, wins. [`OriginSelector`] encodes that rule so
//! callers never re-derive it.

use geo::Coord;

/// Supplies the latest live position, if one is known.
///
/// A feed may be absent until its first fix, and implementations must
/// return `None` rather than blocking while they wait for one.
pub trait OriginProvider {
    /// Latest known position in degrees, or `None` before the first fix.
    fn current(&self) -> Option<Coord<f64>>;
}

/// A manually chosen start point with its display name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManualStart {
    /// Display name, as resolved or entered by the user.
    pub name: String,
    /// Geographic position in degrees.
    pub location: Coord<f64>,
}

impl ManualStart {
    /// Construct a manual start from its parts.
    pub fn new(name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

/// Combines a live position feed with an optional manual start.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use stopover_core::{ManualStart, OriginProvider, OriginSelector};
///
/// struct Gps(Option<Coord<f64>>);
/// impl OriginProvider for Gps {
///     fn current(&self) -> Option<Coord<f64>> {
///         self.0
///     }
/// }
///
/// let mut selector = OriginSelector::new(Gps(Some(Coord { x: 1.0, y: 1.0 })));
/// selector.set_manual(ManualStart::new("Hotel", Coord { x: 9.0, y: 9.0 }));
///
/// // The live fix wins while it is available.
/// assert_eq!(selector.effective(), Some(Coord { x: 1.0, y: 1.0 }));
/// ```
#[derive(Debug, Clone)]
pub struct OriginSelector<P> {
    provider: P,
    manual: Option<ManualStart>,
}

impl<P: OriginProvider> OriginSelector<P> {
    /// Construct a selector over a live feed with no manual start.
    #[must_use]
    pub const fn new(provider: P) -> Self {
        Self {
            provider,
            manual: None,
        }
    }

    /// Construct a selector with a manual start already set.
    #[must_use]
    pub const fn with_manual(provider: P, manual: ManualStart) -> Self {
        Self {
            provider,
            manual: Some(manual),
        }
    }

    /// Set or replace the manual start.
    pub fn set_manual(&mut self, start: ManualStart) {
        self.manual = Some(start);
    }

    /// Drop the manual start, returning the previous one if any.
    pub fn clear_manual(&mut self) -> Option<ManualStart> {
        self.manual.take()
    }

    /// The manual start, if one is set.
    #[must_use]
    pub const fn manual(&self) -> Option<&ManualStart> {
        self.manual.as_ref()
    }

    /// The authoritative origin: the live fix when present, otherwise the
    /// manual start's position, otherwise `None`.
    #[must_use]
    pub fn effective(&self) -> Option<Coord<f64>> {
        self.provider
            .current()
            .or_else(|| self.manual.as_ref().map(|m| m.location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixedOrigin;
    use rstest::rstest;

    const LIVE: Coord<f64> = Coord { x: 77.0, y: 28.0 };
    const HOTEL: Coord<f64> = Coord { x: 72.0, y: 19.0 };

    #[rstest]
    fn live_fix_takes_precedence_over_manual_start() {
        let selector =
            OriginSelector::with_manual(FixedOrigin::at(LIVE), ManualStart::new("Hotel", HOTEL));
        assert_eq!(selector.effective(), Some(LIVE));
    }

    #[rstest]
    fn manual_start_applies_without_a_fix() {
        let selector =
            OriginSelector::with_manual(FixedOrigin::none(), ManualStart::new("Hotel", HOTEL));
        assert_eq!(selector.effective(), Some(HOTEL));
    }

    #[rstest]
    fn no_source_means_no_origin() {
        let selector = OriginSelector::new(FixedOrigin::none());
        assert_eq!(selector.effective(), None);
    }

    #[rstest]
    fn clearing_the_manual_start_restores_the_feed_only_view() {
        let mut selector =
            OriginSelector::with_manual(FixedOrigin::none(), ManualStart::new("Hotel", HOTEL));
        let cleared = selector.clear_manual();
        assert_eq!(cleared.map(|m| m.name), Some("Hotel".to_owned()));
        assert_eq!(selector.effective(), None);
    }
}
