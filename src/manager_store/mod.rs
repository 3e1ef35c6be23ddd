pub mod errors;

use chrono::{TimeDelta, Utc};
use log::{error, warn};
use rusqlite::{params, Connection, OptionalExtension};
use crate::manager_catalog::models::CityRecord;
use crate::manager_store::errors::StoreError;

const SAVED_CITIES: &str = "savedCities";
const SELECTED_CITY: &str = "selectedCity";

/// Durable key-value store for the favorites list and the last selected city.
/// Every entry expires a fixed number of days after it was last written.
pub struct Store {
    db_conn: Connection,
    ttl: TimeDelta,
}

impl Store {

    /// Creates a new instance of Store
    ///
    /// # Arguments
    ///
    /// * 'db_path' - full path to db file
    /// * 'ttl_in_days' - days an entry stays readable after being written, not negative
    pub fn new(db_path: &str, ttl_in_days: i64) -> Result<Self, StoreError> {
        let ttl = TimeDelta::try_days(ttl_in_days)
            .filter(|_| ttl_in_days >= 0)
            .ok_or_else(|| StoreError(format!("invalid time to live: {} days", ttl_in_days)))?;

        let db_conn = Connection::open(db_path)?;
        db_conn.execute(
            "CREATE TABLE IF NOT EXISTS entries (
                key text primary key,
                value text not null,
                expires_at integer not null
           )",
            [],
        )?;

        Ok(Store { db_conn, ttl })
    }

    /// Returns the saved favorites, or a list holding only the default city if nothing
    /// readable is stored
    ///
    /// # Arguments
    ///
    /// * 'default' - city to fall back to
    pub fn load(&self, default: &CityRecord) -> Vec<CityRecord> {
        let stored = self.get(SAVED_CITIES).and_then(|value| match value {
            Some(json) => Ok(Some(serde_json::from_str::<Vec<CityRecord>>(&json)?)),
            None => Ok(None),
        });

        match stored {
            Ok(Some(cities)) => cities,
            Ok(None) => vec![default.clone()],
            Err(e) => {
                warn!("failed to read saved cities, using default: {}", e);
                vec![default.clone()]
            }
        }
    }

    /// Saves the favorites list. An empty list is not written, whatever was saved
    /// before stays.
    ///
    /// # Arguments
    ///
    /// * 'cities' - favorites in display order
    pub fn save(&self, cities: &[CityRecord]) -> Result<(), StoreError> {
        if cities.is_empty() {
            return Ok(());
        }

        self.set(SAVED_CITIES, &serde_json::to_string(cities)?)
    }

    /// Returns the last selected city name, or the default if nothing readable is stored
    ///
    /// # Arguments
    ///
    /// * 'default' - city name to fall back to
    pub fn load_selected_city(&self, default: &str) -> String {
        match self.get(SELECTED_CITY) {
            Ok(Some(name)) => name,
            Ok(None) => default.to_string(),
            Err(e) => {
                warn!("failed to read selected city, using default: {}", e);
                default.to_string()
            }
        }
    }

    /// Saves the selected city name
    ///
    /// # Arguments
    ///
    /// * 'name' - city name
    pub fn save_selected_city(&self, name: &str) -> Result<(), StoreError> {
        self.set(SELECTED_CITY, name)
    }

    /// Deletes entries that have expired
    ///
    pub fn purge_expired(&self) {
        match self.db_conn.prepare(
            "DELETE FROM entries
                WHERE expires_at <= ?1;"
        ) {
            Ok(mut stmt) => {
                if let Err(e) = stmt.execute(params![Utc::now().timestamp()]) {
                    error!("error while deleting expired entries: {}", e);
                }
            },
            Err(e) => { error!("error while preparing delete statement: {}", e); }
        }
    }

    /// Returns the value for a key unless missing or expired
    ///
    /// # Arguments
    ///
    /// * 'key' - entry key
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut stmt = self.db_conn.prepare(
            "SELECT value
                FROM entries
                WHERE key = ?1 AND expires_at > ?2;",
        )?;

        Ok(stmt.query_row(params![key, Utc::now().timestamp()], |row| row.get(0)).optional()?)
    }

    /// Inserts or replaces the value for a key and restarts its expiry
    ///
    /// # Arguments
    ///
    /// * 'key' - entry key
    /// * 'value' - value to store
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| StoreError(format!("expiry out of range for {}", key)))?
            .timestamp();

        self.db_conn.execute(
            "INSERT OR REPLACE INTO entries (key, value, expires_at) values (?1, ?2, ?3)",
            params![key, value, expires_at],
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(id: u64, name: &str, country: &str) -> CityRecord {
        CityRecord { id, name: name.to_string(), country: country.to_string() }
    }

    fn seoul() -> CityRecord {
        city(315, "Seoul", "South Korea")
    }

    #[test]
    fn load_before_first_write_gives_default() {
        let store = Store::new(":memory:", 7).unwrap();

        assert_eq!(store.load(&seoul()), vec![seoul()]);
        assert_eq!(store.load_selected_city("Seoul"), "Seoul");
    }

    #[test]
    fn saved_list_loads_back_in_order() {
        let store = Store::new(":memory:", 7).unwrap();
        let cities = vec![city(2, "Paris", "France"), seoul(), city(3, "Oslo", "Norway")];

        store.save(&cities).unwrap();

        assert_eq!(store.load(&seoul()), cities);
    }

    #[test]
    fn empty_list_is_not_written() {
        let store = Store::new(":memory:", 7).unwrap();
        let cities = vec![city(2, "Paris", "France")];

        store.save(&cities).unwrap();
        store.save(&[]).unwrap();

        assert_eq!(store.load(&seoul()), cities);
    }

    #[test]
    fn selected_city_round_trip() {
        let store = Store::new(":memory:", 7).unwrap();

        store.save_selected_city("Paris").unwrap();
        store.save_selected_city("Oslo").unwrap();

        assert_eq!(store.load_selected_city("Seoul"), "Oslo");
    }

    #[test]
    fn expired_entries_read_as_default() {
        let store = Store::new(":memory:", 0).unwrap();

        store.save(&[city(2, "Paris", "France")]).unwrap();
        store.save_selected_city("Paris").unwrap();

        assert_eq!(store.load(&seoul()), vec![seoul()]);
        assert_eq!(store.load_selected_city("Seoul"), "Seoul");
    }

    #[test]
    fn purge_removes_expired_rows() {
        let store = Store::new(":memory:", 0).unwrap();
        store.save_selected_city("Paris").unwrap();

        store.purge_expired();

        let count: i64 = store.db_conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn corrupt_list_reads_as_default() {
        let store = Store::new(":memory:", 7).unwrap();
        store.set(SAVED_CITIES, "{not a list").unwrap();

        assert_eq!(store.load(&seoul()), vec![seoul()]);
    }

    #[test]
    fn rejects_unusable_ttl() {
        assert!(Store::new(":memory:", -1).is_err());
        assert!(Store::new(":memory:", i64::MAX / 1000).is_err());
    }

    #[test]
    fn expiry_past_calendar_range_is_an_error() {
        let store = Store::new(":memory:", 100_000_000).unwrap();

        assert!(store.save_selected_city("Paris").is_err());
        assert_eq!(store.load_selected_city("Seoul"), "Seoul");
    }

    #[test]
    fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");
        let path = path.to_str().unwrap();

        {
            let store = Store::new(path, 7).unwrap();
            store.save(&[city(2, "Paris", "France")]).unwrap();
            store.save_selected_city("Paris").unwrap();
        }

        let store = Store::new(path, 7).unwrap();
        assert_eq!(store.load(&seoul()), vec![city(2, "Paris", "France")]);
        assert_eq!(store.load_selected_city("Seoul"), "Paris");
    }
}
