//! Destinations and the caller-side itinerary collection.
//!
//! A [`Destination`] pairs a display name with a geographic position and a
//! session-stable identifier. [`Itinerary`] owns the ordered destination
//! list on behalf of the caller: it assigns identifiers monotonically,
//! never reuses one after deletion, and enforces the destination cap that
//! the route optimizer deliberately does not.

use geo::Coord;
use thiserror::Error;

/// Upper bound on the number of destinations an [`Itinerary`] accepts.
pub const MAX_DESTINATIONS: usize = 10;

/// A named place the route must visit.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The
/// identifier is unique within a session and survives reordering; the
/// optimizer treats destinations as read-only values.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use stopover_core::Destination;
///
/// let museum = Destination::new(1, "Museum", Coord { x: 77.2, y: 28.6 });
/// assert_eq!(museum.id, 1);
/// assert_eq!(museum.name, "Museum");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Destination {
    /// Session-stable identifier, assigned by [`Itinerary`].
    pub id: u64,
    /// Display name, as resolved or entered by the user.
    pub name: String,
    /// Geographic position in degrees.
    pub location: Coord<f64>,
}

impl Destination {
    /// Construct a destination from its parts.
    pub fn new(id: u64, name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            id,
            name: name.into(),
            location,
        }
    }
}

/// Errors returned by [`Itinerary`] mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItineraryError {
    /// The itinerary already holds the maximum number of destinations.
    #[error("itinerary is full ({cap} destinations)")]
    Full {
        /// The enforced cap.
        cap: usize,
    },
}

/// Ordered, capped collection of destinations with stable identifiers.
///
/// The itinerary preserves the user's manual order; the optimizer receives
/// its destinations read-only and returns a fresh [`Route`](crate::Route)
/// without touching it. Identifiers start at 1 and increase monotonically,
/// including across removals, so a deleted destination's id is never
/// reassigned within the same session.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use stopover_core::Itinerary;
///
/// let mut itinerary = Itinerary::new();
/// let id = itinerary
///     .add("Museum", Coord { x: 77.2, y: 28.6 })
///     .expect("itinerary has room");
/// assert_eq!(id, 1);
/// assert_eq!(itinerary.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    destinations: Vec<Destination>,
    next_id: u64,
}

impl Default for Itinerary {
    fn default() -> Self {
        Self::new()
    }
}

impl Itinerary {
    /// Construct an empty itinerary with the id counter at 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            destinations: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild an itinerary from persisted state.
    ///
    /// The id counter is clamped so it always exceeds every restored id,
    /// preserving the never-reused guarantee even against a stale counter.
    #[must_use]
    pub fn from_saved(destinations: Vec<Destination>, next_id: u64) -> Self {
        let min_next = destinations
            .iter()
            .map(|d| d.id.saturating_add(1))
            .max()
            .unwrap_or(1);
        Self {
            destinations,
            next_id: next_id.max(min_next),
        }
    }

    /// Append a destination, returning the identifier it was assigned.
    ///
    /// # Errors
    /// Returns [`ItineraryError::Full`] once [`MAX_DESTINATIONS`] entries
    /// are present; the caller rejects further additions before the
    /// optimizer ever sees them.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        location: Coord<f64>,
    ) -> Result<u64, ItineraryError> {
        if self.destinations.len() >= MAX_DESTINATIONS {
            return Err(ItineraryError::Full {
                cap: MAX_DESTINATIONS,
            });
        }
        let id = self.next_id;
        self.destinations.push(Destination::new(id, name, location));
        self.next_id = self.next_id.saturating_add(1);
        Ok(id)
    }

    /// Remove the destination with the given id, returning it if present.
    pub fn remove(&mut self, id: u64) -> Option<Destination> {
        let index = self.destinations.iter().position(|d| d.id == id)?;
        Some(self.destinations.remove(index))
    }

    /// Shift a destination up or down by `delta` positions.
    ///
    /// Returns `false` without changing anything when the id is unknown or
    /// the move would leave the list bounds.
    pub fn move_by(&mut self, id: u64, delta: isize) -> bool {
        let Some(index) = self.destinations.iter().position(|d| d.id == id) else {
            return false;
        };
        let Some(target) = index.checked_add_signed(delta) else {
            return false;
        };
        if target >= self.destinations.len() {
            return false;
        }
        let destination = self.destinations.remove(index);
        self.destinations.insert(target, destination);
        true
    }

    /// The destinations in manual order.
    #[must_use]
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// The id the next added destination will receive.
    #[must_use]
    pub const fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Number of destinations held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    /// Whether the itinerary holds no destinations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Whether the cap has been reached.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.destinations.len() >= MAX_DESTINATIONS
    }
}
