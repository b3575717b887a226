//! Persistence seam for the destination set.
//!
//! The `DestinationStore` trait holds a session's plan across runs:
//! the ordered itinerary (including its id counter) and the manual start,
//! loaded on startup and saved after every mutation. The engine itself
//! never touches the store; it receives a sequence and returns a
//! sequence.

use crate::{Itinerary, ManualStart};

#[cfg(feature = "store-sqlite")]
#[cfg_attr(docsrs, doc(cfg(feature = "store-sqlite")))]
pub mod sqlite;

/// The persisted session state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedPlan {
    /// Destinations in manual order, with the id counter.
    pub itinerary: Itinerary,
    /// The manually chosen start, when one was set.
    pub manual_start: Option<ManualStart>,
}

/// Load and save the session's plan.
///
/// `load` distinguishes "never saved" (`Ok(None)`) from an empty plan
/// (`Ok(Some)` with an empty itinerary), so callers can seed defaults on
/// first run without clobbering a deliberately cleared plan.
pub trait DestinationStore {
    /// Backend-specific failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the previously saved plan, or `None` if nothing was ever saved.
    ///
    /// # Errors
    /// Backend-specific read or decode failures.
    fn load(&self) -> Result<Option<SavedPlan>, Self::Error>;

    /// Replace the saved plan with `plan`.
    ///
    /// # Errors
    /// Backend-specific write failures.
    fn save(&self, plan: &SavedPlan) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use geo::Coord;

    use super::*;
    use crate::test_support::MemoryPlanStore;

    fn plan_with(names: &[&str]) -> SavedPlan {
        let mut itinerary = Itinerary::new();
        for name in names {
            itinerary
                .add(*name, Coord { x: 0.0, y: 0.0 })
                .expect("itinerary has room");
        }
        SavedPlan {
            itinerary,
            manual_start: None,
        }
    }

    #[test]
    fn fresh_store_reports_never_saved() {
        let store = MemoryPlanStore::default();
        assert_eq!(store.load().expect("load is infallible"), None);
    }

    #[test]
    fn save_on_mutation_keeps_only_the_latest_plan() {
        let store = MemoryPlanStore::default();
        store
            .save(&plan_with(&["first"]))
            .expect("save is infallible");
        store
            .save(&plan_with(&["first", "second"]))
            .expect("save is infallible");

        let loaded = store
            .load()
            .expect("load is infallible")
            .expect("a plan was saved");
        assert_eq!(loaded.itinerary.len(), 2);
    }

    #[test]
    fn preloaded_store_yields_its_plan() {
        let plan = plan_with(&["only"]);
        let store = MemoryPlanStore::with_plan(plan.clone());
        assert_eq!(store.load().expect("load is infallible"), Some(plan));
    }
}
