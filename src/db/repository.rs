use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;

use crate::models::{ActivityRecord, GoalRecord, NewGoal};

pub const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FMT: &str = "%Y-%m-%d";

// ─── Activity repo ───────────────────────────────────────────────────────────

pub struct ActivityRepo;

impl ActivityRepo {
    /// All activities for a user, oldest first. Rows with an unreadable
    /// timestamp are skipped.
    pub fn list(conn: &Connection, user_id: &str) -> Result<Vec<ActivityRecord>> {
        let mut stmt = conn.prepare(
            "SELECT id, activity, category, occurred_at
             FROM activities WHERE user_id = ?1
             ORDER BY occurred_at, id",
        )?;

        let rows = stmt.query_map(params![user_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut result = Vec::new();
        for r in rows {
            let (id, activity, category, occurred_at) = r?;
            match NaiveDateTime::parse_from_str(&occurred_at, DATETIME_FMT) {
                Ok(occurred_at) => result.push(ActivityRecord {
                    id,
                    activity,
                    category,
                    occurred_at,
                }),
                Err(e) => {
                    log::warn!("Skipping activity {} with bad timestamp '{}': {}", id, occurred_at, e);
                }
            }
        }
        Ok(result)
    }

    pub fn insert(
        conn: &Connection,
        user_id: &str,
        activity: &str,
        category: Option<&str>,
        occurred_at: NaiveDateTime,
    ) -> Result<i64> {
        conn.execute(
            "INSERT INTO activities (user_id, activity, category, occurred_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                user_id,
                activity,
                category,
                occurred_at.format(DATETIME_FMT).to_string()
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }
}

// ─── Custom emission repo ────────────────────────────────────────────────────

pub struct EmissionRepo;

impl EmissionRepo {
    pub fn get_all(conn: &Connection, user_id: &str) -> Result<HashMap<String, f64>> {
        let mut stmt = conn.prepare(
            "SELECT activity, co2_value FROM custom_emissions WHERE user_id = ?1",
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })?;
        rows.collect::<rusqlite::Result<HashMap<_, _>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn upsert(conn: &Connection, user_id: &str, activity: &str, co2_value: f64) -> Result<()> {
        conn.execute(
            "INSERT INTO custom_emissions (user_id, activity, co2_value) VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id, activity) DO UPDATE SET co2_value = ?3",
            params![user_id, activity, co2_value],
        )?;
        Ok(())
    }
}

// ─── Goal repo ───────────────────────────────────────────────────────────────

pub struct GoalRepo;

impl GoalRepo {
    /// Goals in insertion order, which is also the chart's category order.
    pub fn list(conn: &Connection, user_id: &str) -> Result<Vec<GoalRecord>> {
        let mut stmt = conn.prepare(
            "SELECT id, text, deadline, completed, category
             FROM goals WHERE user_id = ?1 ORDER BY id",
        )?;

        let rows = stmt.query_map(params![user_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, i32>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut result = Vec::new();
        for r in rows {
            let (id, text, deadline, completed, category) = r?;
            let deadline = deadline
                .filter(|s| !s.is_empty())
                .and_then(|s| match NaiveDate::parse_from_str(&s, DATE_FMT) {
                    Ok(d) => Some(d),
                    Err(_) => {
                        log::warn!("Ignoring bad deadline '{}' on goal {}", s, id);
                        None
                    }
                });
            result.push(GoalRecord {
                id,
                text,
                deadline,
                completed: completed != 0,
                category,
            });
        }
        Ok(result)
    }

    pub fn insert(conn: &Connection, user_id: &str, goal: &NewGoal) -> Result<i64> {
        conn.execute(
            "INSERT INTO goals (user_id, text, deadline, completed, category)
             VALUES (?1, ?2, ?3, 0, ?4)",
            params![
                user_id,
                goal.text,
                goal.deadline.map(|d| d.format(DATE_FMT).to_string()),
                goal.category.as_str()
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn get_completed(conn: &Connection, user_id: &str, goal_id: i64) -> Result<Option<bool>> {
        conn.query_row(
            "SELECT completed FROM goals WHERE id = ?1 AND user_id = ?2",
            params![goal_id, user_id],
            |row| row.get::<_, i32>(0),
        )
        .optional()
        .map(|v| v.map(|c| c != 0))
        .map_err(anyhow::Error::from)
    }

    pub fn set_completed(conn: &Connection, user_id: &str, goal_id: i64, completed: bool) -> Result<bool> {
        let changed = conn.execute(
            "UPDATE goals SET completed = ?1 WHERE id = ?2 AND user_id = ?3",
            params![completed as i32, goal_id, user_id],
        )?;
        Ok(changed > 0)
    }

    pub fn delete(conn: &Connection, user_id: &str, goal_id: i64) -> Result<bool> {
        let changed = conn.execute(
            "DELETE FROM goals WHERE id = ?1 AND user_id = ?2",
            params![goal_id, user_id],
        )?;
        Ok(changed > 0)
    }
}

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::Category;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn activities_are_scoped_per_user_and_ordered() {
        let conn = conn();
        ActivityRepo::insert(&conn, "a", "Biked to Work", Some("Transportation"), at(2, 9)).unwrap();
        ActivityRepo::insert(&conn, "a", "Planted a Tree", None, at(1, 9)).unwrap();
        ActivityRepo::insert(&conn, "b", "Recycled Paper", Some("Waste"), at(1, 9)).unwrap();

        let list = ActivityRepo::list(&conn, "a").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].activity, "Planted a Tree");
        assert_eq!(list[0].category, None);
        assert_eq!(list[1].occurred_at, at(2, 9));
        assert_eq!(ActivityRepo::list(&conn, "b").unwrap().len(), 1);
    }

    #[test]
    fn bad_timestamps_are_skipped() {
        let conn = conn();
        conn.execute(
            "INSERT INTO activities (user_id, activity, occurred_at) VALUES ('a', 'x', 'yesterday')",
            [],
        )
        .unwrap();
        ActivityRepo::insert(&conn, "a", "y", None, at(3, 10)).unwrap();
        let list = ActivityRepo::list(&conn, "a").unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].activity, "y");
    }

    #[test]
    fn custom_emission_upsert_replaces_value() {
        let conn = conn();
        EmissionRepo::upsert(&conn, "a", "Fixed a bike", 2.0).unwrap();
        EmissionRepo::upsert(&conn, "a", "Fixed a bike", 3.5).unwrap();
        let all = EmissionRepo::get_all(&conn, "a").unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all["Fixed a bike"], 3.5);
        assert!(EmissionRepo::get_all(&conn, "b").unwrap().is_empty());
    }

    #[test]
    fn goal_lifecycle() {
        let conn = conn();
        let goal = NewGoal {
            text: "Use reusable bags".into(),
            category: Category::Waste,
            deadline: NaiveDate::from_ymd_opt(2024, 6, 30),
        };
        let id = GoalRepo::insert(&conn, "a", &goal).unwrap();

        let goals = GoalRepo::list(&conn, "a").unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].category, "Waste");
        assert_eq!(goals[0].deadline, goal.deadline);
        assert!(!goals[0].completed);

        assert!(GoalRepo::set_completed(&conn, "a", id, true).unwrap());
        assert_eq!(GoalRepo::get_completed(&conn, "a", id).unwrap(), Some(true));

        // another user cannot touch it
        assert!(!GoalRepo::delete(&conn, "b", id).unwrap());
        assert!(GoalRepo::delete(&conn, "a", id).unwrap());
        assert_eq!(GoalRepo::get_completed(&conn, "a", id).unwrap(), None);
    }

    #[test]
    fn meta_set_overwrites() {
        let conn = conn();
        MetaRepo::set(&conn, "k", "1").unwrap();
        MetaRepo::set(&conn, "k", "2").unwrap();
        assert_eq!(MetaRepo::get(&conn, "k").unwrap().as_deref(), Some("2"));
        assert_eq!(MetaRepo::get(&conn, "missing").unwrap(), None);
    }
}
