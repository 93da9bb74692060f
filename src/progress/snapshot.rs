use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::db::EcoStore;
use crate::models::{ActivityRecord, BadgeProgress, DailyCount, GoalRecord, GoalSummary, StreakState};
use crate::progress::{badges, emissions, goals, streak};

/// Everything the dashboard shows, derived from one fetch of the user's data.
#[derive(Debug, Clone, Serialize)]
pub struct EcoSnapshot {
    pub today: NaiveDate,
    pub activities: Vec<ActivityRecord>,
    pub goals: Vec<GoalRecord>,
    pub streak: StreakState,
    pub badges: Vec<BadgeProgress>,
    pub top_activities: Vec<(String, u32)>,
    pub co2_saved_kg: f64,
    pub last_week: Vec<DailyCount>,
    pub goal_summary: GoalSummary,
}

impl EcoSnapshot {
    pub fn build<S: EcoStore + ?Sized>(
        store: &S,
        user_id: &str,
        today: NaiveDate,
        milestone: u32,
    ) -> Result<Self> {
        let activities = store.fetch_activities(user_id)?;
        let custom = store.custom_emissions(user_id)?;
        let goals = store.fetch_goals(user_id)?;

        let dates = streak::dates_of(&activities);
        let snapshot = Self {
            today,
            streak: streak::streak_state(&dates, today),
            badges: badges::badge_progress(&activities, milestone),
            top_activities: badges::activity_counts(&activities),
            co2_saved_kg: emissions::total_co2_saved(&activities, &custom),
            last_week: daily_counts(&activities, today, 7),
            goal_summary: goals::summarize(&goals),
            activities,
            goals,
        };
        log::debug!(
            "Snapshot for {}: {} activities, streak {}, {} goals",
            user_id,
            snapshot.activities.len(),
            snapshot.streak.current,
            snapshot.goal_summary.total
        );
        Ok(snapshot)
    }

    /// Most recent first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &ActivityRecord> {
        self.activities.iter().rev().take(limit)
    }

    pub fn logged_today(&self) -> u32 {
        self.last_week.last().map(|d| d.activities).unwrap_or(0)
    }
}

/// Activity counts for the `days` days ending at `today`, oldest first,
/// with zero-count days included.
pub fn daily_counts(records: &[ActivityRecord], today: NaiveDate, days: u32) -> Vec<DailyCount> {
    (0..days as i64)
        .rev()
        .map(|back| {
            let date = today - chrono::Duration::days(back);
            DailyCount {
                date: date.format("%Y-%m-%d").to_string(),
                activities: records.iter().filter(|r| r.date() == date).count() as u32,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::{Category, NewActivity, NewGoal};
    use rusqlite::Connection;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 10).unwrap()
    }

    fn log(conn: &Connection, name: &str, days_ago: i64) {
        let at = (today() - chrono::Duration::days(days_ago))
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let category = emissions::find_preset(name)
            .and_then(|p| p.category)
            .map(|c| c.as_str());
        let new = NewActivity::parse(name, category, None, at).unwrap();
        conn.log_activity("me", &new).unwrap();
    }

    #[test]
    fn empty_store_gives_neutral_snapshot() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let snap = EcoSnapshot::build(&conn, "me", today(), 5).unwrap();
        assert_eq!(snap.streak, StreakState::default());
        assert_eq!(snap.badges.len(), 4);
        assert!(snap.badges.iter().all(|b| !b.earned() && b.remaining_to_next == 5));
        assert_eq!(snap.co2_saved_kg, 0.0);
        assert_eq!(snap.last_week.len(), 7);
        assert_eq!(snap.logged_today(), 0);
        assert_eq!(snap.goal_summary.completion_rate_percent, 0);
    }

    #[test]
    fn derives_everything_from_one_fetch() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        for _ in 0..5 {
            log(&conn, "Biked to Work", 0);
        }
        log(&conn, "Ate Vegetarian Meal", 1);
        log(&conn, "Planted a Tree", 2);
        log(&conn, "Recycled Paper", 9);
        conn.add_goal(
            "me",
            &NewGoal {
                text: "Bike daily".into(),
                category: Category::Transportation,
                deadline: None,
            },
        )
        .unwrap();

        let snap = EcoSnapshot::build(&conn, "me", today(), 5).unwrap();
        assert_eq!(snap.streak.current, 3);
        assert_eq!(snap.streak.active_days, 4);

        let transport = snap
            .badges
            .iter()
            .find(|b| b.category == "Transportation")
            .unwrap();
        assert_eq!(transport.earned_count, 1);
        assert_eq!(transport.remaining_to_next, 5);

        assert_eq!(snap.top_activities[0], ("Biked to Work".to_string(), 5));
        assert!((snap.co2_saved_kg - (5.0 * 3.2 + 1.5 + 20.0 + 0.8)).abs() < 1e-9);
        assert_eq!(snap.logged_today(), 5);
        assert_eq!(snap.last_week[5].activities, 1);
        assert_eq!(snap.goal_summary.total, 1);
        assert_eq!(snap.recent(1).next().map(|r| r.activity.as_str()), Some("Biked to Work"));
    }

    #[test]
    fn daily_counts_include_empty_days() {
        let counts = daily_counts(&[], today(), 3);
        let dates: Vec<_> = counts.iter().map(|c| c.date.as_str()).collect();
        assert_eq!(dates, ["2024-04-08", "2024-04-09", "2024-04-10"]);
        assert!(counts.iter().all(|c| c.activities == 0));
    }
}
