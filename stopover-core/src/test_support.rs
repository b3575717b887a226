//! Test-only collaborators used by unit and behaviour tests across the
//! workspace: an in-memory plan store, a fixed origin feed, and a canned
//! place resolver.

use std::convert::Infallible;
use std::sync::Mutex;

use geo::Coord;

use crate::{
    DestinationStore, OriginProvider, PlaceResolver, ResolveError, ResolvedPlace, SavedPlan,
};

/// In-memory [`DestinationStore`] holding at most one saved plan.
#[derive(Debug, Default)]
pub struct MemoryPlanStore {
    plan: Mutex<Option<SavedPlan>>,
}

impl MemoryPlanStore {
    /// Create a store that already holds `plan`.
    #[must_use]
    pub fn with_plan(plan: SavedPlan) -> Self {
        Self {
            plan: Mutex::new(Some(plan)),
        }
    }
}

impl DestinationStore for MemoryPlanStore {
    type Error = Infallible;

    fn load(&self) -> Result<Option<SavedPlan>, Self::Error> {
        let guard = self
            .plan
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn save(&self, plan: &SavedPlan) -> Result<(), Self::Error> {
        let mut guard = self
            .plan
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(plan.clone());
        Ok(())
    }
}

/// [`OriginProvider`] returning a fixed, possibly absent, position.
#[derive(Debug, Copy, Clone, Default)]
pub struct FixedOrigin(Option<Coord<f64>>);

impl FixedOrigin {
    /// A feed that has a fix at `position`.
    #[must_use]
    pub const fn at(position: Coord<f64>) -> Self {
        Self(Some(position))
    }

    /// A feed that never acquires a fix.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }
}

impl OriginProvider for FixedOrigin {
    fn current(&self) -> Option<Coord<f64>> {
        self.0
    }
}

/// [`PlaceResolver`] answering from a canned list of places.
///
/// `resolve` matches queries exactly; `reverse` matches coordinates
/// exactly. Anything else is [`ResolveError::NoResults`].
#[derive(Debug, Default)]
pub struct CannedResolver {
    places: Vec<(String, ResolvedPlace)>,
}

impl CannedResolver {
    /// Create a resolver from `(query, place)` pairs.
    #[must_use]
    pub fn with_places<I>(places: I) -> Self
    where
        I: IntoIterator<Item = (String, ResolvedPlace)>,
    {
        Self {
            places: places.into_iter().collect(),
        }
    }
}

impl PlaceResolver for CannedResolver {
    fn resolve(&self, query: &str) -> Result<ResolvedPlace, ResolveError> {
        self.places
            .iter()
            .find(|(known, _)| known == query)
            .map(|(_, place)| place.clone())
            .ok_or_else(|| ResolveError::NoResults {
                query: query.to_owned(),
            })
    }

    fn reverse(&self, location: Coord<f64>) -> Result<ResolvedPlace, ResolveError> {
        self.places
            .iter()
            .find(|(_, place)| place.location == location)
            .map(|(_, place)| place.clone())
            .ok_or_else(|| ResolveError::NoResults {
                query: format!("{}, {}", location.y, location.x),
            })
    }
}
