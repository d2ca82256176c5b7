use crate::Database;
use anyhow::Result;
use rusqlite::Connection;

impl Database {
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| query_value(conn, key))
    }

    /// Insert or overwrite a key.
    pub fn set_value(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO preferences (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
                (key, value),
            )?;
            Ok(())
        })
    }

    /// Presence check for flag-style keys whose value is irrelevant.
    pub fn has_key(&self, key: &str) -> Result<bool> {
        Ok(self.get_value(key)?.is_some())
    }
}

fn query_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM preferences WHERE key = ?1")?;

    let value = stmt.query_row([key], |row| row.get(0)).optional()?;

    Ok(value)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_value_overwrites() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get_value("flow-theme").unwrap(), None);

        db.set_value("flow-theme", "light").unwrap();
        db.set_value("flow-theme", "dark").unwrap();
        assert_eq!(db.get_value("flow-theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn has_key_ignores_value() {
        let db = Database::open_in_memory().unwrap();
        assert!(!db.has_key("flow-entered").unwrap());

        db.set_value("flow-entered", "").unwrap();
        assert!(db.has_key("flow-entered").unwrap());
    }
}
