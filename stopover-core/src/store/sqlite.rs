//! SQLite-backed destination store.
//!
//! Persists the itinerary rows plus a small key/value `session` table for
//! the id counter and the JSON-encoded manual start. Saves are
//! transactional replaces: the store always holds exactly the last plan
//! given to it.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use crate::{Destination, Itinerary, ManualStart};

use super::{DestinationStore, SavedPlan};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS destinations (
    position INTEGER PRIMARY KEY,
    id       INTEGER NOT NULL,
    name     TEXT NOT NULL,
    lon      REAL NOT NULL,
    lat      REAL NOT NULL
);
CREATE TABLE IF NOT EXISTS session (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";

const KEY_NEXT_ID: &str = "next_id";
const KEY_MANUAL_START: &str = "manual_start";

/// Error raised when reading or writing the persisted plan.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open destination store at {path}: {source}")]
    Open {
        /// Location of the database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Creating the store's tables failed.
    #[error("failed to initialise destination store at {path}: {source}")]
    Schema {
        /// Location of the database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Generic SQLite failure while reading or writing rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
    /// The stored id counter was not a valid integer.
    #[error("stored id counter {value:?} is not a valid integer")]
    InvalidCounter {
        /// The raw stored value.
        value: String,
        /// Integer parse failure.
        #[source]
        source: std::num::ParseIntError,
    },
    /// A stored destination id was negative.
    #[error("stored destination id {value} is out of range")]
    StoredIdInvalid {
        /// The raw stored value.
        value: i64,
    },
    /// A destination id does not fit the storable integer range.
    #[error("destination id {id} exceeds the storable range")]
    IdOutOfRange {
        /// The offending identifier.
        id: u64,
    },
    /// The stored manual start was not valid JSON.
    #[error("failed to decode the stored manual start: {source}")]
    InvalidManualStart {
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The manual start could not be encoded for storage.
    #[error("failed to encode the manual start: {source}")]
    EncodeManualStart {
        /// JSON encoding failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Destination store backed by a single SQLite database file.
///
/// # Examples
/// ```no_run
/// use stopover_core::store::sqlite::SqliteDestinationStore;
/// use stopover_core::{DestinationStore, SavedPlan};
///
/// let store = SqliteDestinationStore::open("plan.db")?;
/// store.save(&SavedPlan::default())?;
/// assert!(store.load()?.is_some());
/// # Ok::<(), stopover_core::store::sqlite::SqliteStoreError>(())
/// ```
#[derive(Debug)]
pub struct SqliteDestinationStore {
    conn: Connection,
}

impl SqliteDestinationStore {
    /// Open (creating if necessary) the database at `path` and ensure the
    /// store's tables exist.
    ///
    /// # Errors
    /// [`SqliteStoreError::Open`] or [`SqliteStoreError::Schema`] when the
    /// file cannot be opened or initialised.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SqliteStoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| SqliteStoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        conn.execute_batch(SCHEMA)
            .map_err(|source| SqliteStoreError::Schema {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { conn })
    }

    fn session_value(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row("SELECT value FROM session WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
    }

    fn load_destinations(&self) -> Result<Vec<Destination>, SqliteStoreError> {
        let mut statement = self
            .conn
            .prepare("SELECT id, name, lon, lat FROM destinations ORDER BY position")?;
        let rows = statement.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, f64>(3)?,
            ))
        })?;

        let mut destinations = Vec::new();
        for row in rows {
            let (raw_id, name, lon, lat) = row?;
            let id = u64::try_from(raw_id)
                .map_err(|_| SqliteStoreError::StoredIdInvalid { value: raw_id })?;
            destinations.push(Destination::new(id, name, geo::Coord { x: lon, y: lat }));
        }
        Ok(destinations)
    }
}

impl DestinationStore for SqliteDestinationStore {
    type Error = SqliteStoreError;

    fn load(&self) -> Result<Option<SavedPlan>, Self::Error> {
        // The counter is written on every save, so its absence means the
        // store has never been saved.
        let Some(raw_next_id) = self.session_value(KEY_NEXT_ID)? else {
            return Ok(None);
        };
        let next_id =
            raw_next_id
                .parse::<u64>()
                .map_err(|source| SqliteStoreError::InvalidCounter {
                    value: raw_next_id,
                    source,
                })?;

        let destinations = self.load_destinations()?;
        let manual_start = self
            .session_value(KEY_MANUAL_START)?
            .map(|raw| serde_json::from_str::<ManualStart>(&raw))
            .transpose()
            .map_err(|source| SqliteStoreError::InvalidManualStart { source })?;

        Ok(Some(SavedPlan {
            itinerary: Itinerary::from_saved(destinations, next_id),
            manual_start,
        }))
    }

    fn save(&self, plan: &SavedPlan) -> Result<(), Self::Error> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM destinations", [])?;

        let mut position: i64 = 0;
        for destination in plan.itinerary.destinations() {
            let id = i64::try_from(destination.id).map_err(|_| SqliteStoreError::IdOutOfRange {
                id: destination.id,
            })?;
            tx.execute(
                "INSERT INTO destinations (position, id, name, lon, lat) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    position,
                    id,
                    destination.name,
                    destination.location.x,
                    destination.location.y
                ],
            )?;
            position += 1;
        }

        tx.execute(
            "INSERT OR REPLACE INTO session (key, value) VALUES (?1, ?2)",
            params![KEY_NEXT_ID, plan.itinerary.next_id().to_string()],
        )?;

        match &plan.manual_start {
            Some(start) => {
                let encoded = serde_json::to_string(start)
                    .map_err(|source| SqliteStoreError::EncodeManualStart { source })?;
                tx.execute(
                    "INSERT OR REPLACE INTO session (key, value) VALUES (?1, ?2)",
                    params![KEY_MANUAL_START, encoded],
                )?;
            }
            None => {
                tx.execute("DELETE FROM session WHERE key = ?1", [KEY_MANUAL_START])?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}
