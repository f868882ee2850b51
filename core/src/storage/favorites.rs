use crate::models::{parse_display_date, EventRecord};
use crate::storage::{Connection, Preferences};
use crate::Result;
use log::debug;

/// Storage key under which the favorites array is persisted.
pub const FAVORITES_KEY: &str = "favorites";

/// The ordered collection of favorite events, mirrored to local storage
/// as a JSON-encoded array under [`FAVORITES_KEY`].
///
/// Membership is decided by each record's identity key (title plus display
/// date), never by ordinal position.
#[derive(Debug, Default)]
pub struct FavoritesStore {
    records: Vec<EventRecord>,
}

impl FavoritesStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Replace the collection with the persisted state, if any.
    /// Called once at startup before first render.
    pub fn load(&mut self, conn: &Connection) -> Result<()> {
        if let Some(json) = Preferences::get_string(conn, FAVORITES_KEY)? {
            self.records = serde_json::from_str(&json)?;
        } else {
            self.records.clear();
        }
        Ok(())
    }

    /// Serialize the full ordered collection and write it under the fixed key
    pub fn save(&self, conn: &Connection) -> Result<()> {
        let json = serde_json::to_string(&self.records)?;
        Preferences::set_string(conn, FAVORITES_KEY, &json)?;
        debug!("persisted {} favorite(s)", self.records.len());
        Ok(())
    }

    /// Whether a record with `record`'s identity key is in the collection
    pub fn contains(&self, record: &EventRecord) -> bool {
        self.records.iter().any(|r| r.key() == record.key())
    }

    /// Toggle membership of `record` and persist.
    ///
    /// Returns true when the record is a favorite after the call.
    pub fn toggle(&mut self, conn: &Connection, record: &EventRecord) -> Result<bool> {
        let favorited = if self.contains(record) {
            self.records.retain(|r| r.key() != record.key());
            false
        } else {
            self.records.push(record.clone());
            true
        };
        self.save(conn)?;
        Ok(favorited)
    }

    /// Remove every entry matching `record`'s identity key, then persist
    pub fn remove(&mut self, conn: &Connection, record: &EventRecord) -> Result<()> {
        self.records.retain(|r| r.key() != record.key());
        self.save(conn)
    }

    /// The collection in storage order
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The collection ordered most-recent-first for display.
    ///
    /// The sort is stable, so entries sharing a date keep their storage
    /// order. Entries whose date string does not parse sort last. The
    /// stored collection itself is left untouched.
    pub fn sorted_by_date_desc(&self) -> Vec<EventRecord> {
        let mut sorted = self.records.clone();
        sorted.sort_by(|a, b| {
            match (
                parse_display_date(&a.date_display),
                parse_display_date(&b.date_display),
            ) {
                (Some(da), Some(db)) => db.cmp(&da),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        });
        sorted
    }
}
