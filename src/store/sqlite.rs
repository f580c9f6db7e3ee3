use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use rusqlite_migration::{Migrations, M};

use crate::app::{MirrorError, Result};
use crate::store::PreferenceStore;

pub struct SqlitePreferenceStore {
    conn: Mutex<Connection>,
}

impl SqlitePreferenceStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-preferences/up.sql"
        ))]);

        let mut conn = self.lock()?;
        migrations.to_latest(&mut conn)?;

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| MirrorError::Other(format!("Preference store lock poisoned: {}", e)))
    }
}

impl PreferenceStore for SqlitePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;

        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let store = SqlitePreferenceStore::in_memory().unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn test_set_and_overwrite() {
        let store = SqlitePreferenceStore::in_memory().unwrap();
        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));

        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.db");

        {
            let store = SqlitePreferenceStore::new(&path).unwrap();
            store.set("theme", "light").unwrap();
        }

        let reopened = SqlitePreferenceStore::new(&path).unwrap();
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("light"));
    }
}
