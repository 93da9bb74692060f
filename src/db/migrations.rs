use anyhow::Result;
use rusqlite::Connection;

use crate::db::repository::MetaRepo;

pub const SCHEMA_VERSION: &str = "1";

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        CREATE TABLE IF NOT EXISTS activities (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id      TEXT NOT NULL,
            activity     TEXT NOT NULL,
            category     TEXT,
            occurred_at  TEXT NOT NULL,
            created_at   TEXT DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_activities_user
            ON activities(user_id, occurred_at);

        CREATE TABLE IF NOT EXISTS custom_emissions (
            user_id    TEXT NOT NULL,
            activity   TEXT NOT NULL,
            co2_value  REAL NOT NULL,
            PRIMARY KEY(user_id, activity)
        );

        CREATE TABLE IF NOT EXISTS goals (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     TEXT NOT NULL,
            text        TEXT NOT NULL,
            deadline    TEXT,
            completed   INTEGER NOT NULL DEFAULT 0,
            category    TEXT NOT NULL,
            created_at  TEXT DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
    ")?;

    let previous = MetaRepo::get(conn, "schema_version")?;
    if previous.as_deref() != Some(SCHEMA_VERSION) {
        log::info!("Schema {:?} -> {}", previous, SCHEMA_VERSION);
        MetaRepo::set(conn, "schema_version", SCHEMA_VERSION)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_rerunnable() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(
            MetaRepo::get(&conn, "schema_version").unwrap().as_deref(),
            Some(SCHEMA_VERSION)
        );
    }
}
