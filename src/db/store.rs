use anyhow::{Context, Result};
use rusqlite::Connection;
use std::collections::HashMap;

use crate::db::repository::{ActivityRepo, EmissionRepo, GoalRepo};
use crate::models::{ActivityRecord, GoalRecord, NewActivity, NewGoal};

/// Everything the rest of the app needs from persistence. Handlers and the
/// TUI take an `EcoStore` and never reach for the database directly.
pub trait EcoStore {
    fn fetch_activities(&self, user_id: &str) -> Result<Vec<ActivityRecord>>;

    /// Insert a log entry and, when the user gave one, remember their CO₂
    /// estimate for that activity name.
    fn log_activity(&self, user_id: &str, activity: &NewActivity) -> Result<i64>;

    fn custom_emissions(&self, user_id: &str) -> Result<HashMap<String, f64>>;

    fn fetch_goals(&self, user_id: &str) -> Result<Vec<GoalRecord>>;

    fn add_goal(&self, user_id: &str, goal: &NewGoal) -> Result<i64>;

    /// Flip the completed flag. `None` if the goal does not exist.
    fn toggle_goal(&self, user_id: &str, goal_id: i64) -> Result<Option<bool>>;

    fn delete_goal(&self, user_id: &str, goal_id: i64) -> Result<bool>;
}

impl EcoStore for Connection {
    fn fetch_activities(&self, user_id: &str) -> Result<Vec<ActivityRecord>> {
        let records = ActivityRepo::list(self, user_id).context("Fetching activities")?;
        log::debug!("Fetched {} activities for {}", records.len(), user_id);
        Ok(records)
    }

    fn log_activity(&self, user_id: &str, activity: &NewActivity) -> Result<i64> {
        let tx = self.unchecked_transaction()?;
        let category = activity.category.map(|c| c.as_str());
        let id = ActivityRepo::insert(&tx, user_id, &activity.activity, category, activity.occurred_at)?;
        if let Some(kg) = activity.co2_kg {
            EmissionRepo::upsert(&tx, user_id, &activity.activity, kg)?;
        }
        tx.commit().context("Logging activity")?;
        log::info!("Logged '{}' (id {}) for {}", activity.activity, id, user_id);
        Ok(id)
    }

    fn custom_emissions(&self, user_id: &str) -> Result<HashMap<String, f64>> {
        EmissionRepo::get_all(self, user_id).context("Fetching custom emissions")
    }

    fn fetch_goals(&self, user_id: &str) -> Result<Vec<GoalRecord>> {
        let goals = GoalRepo::list(self, user_id).context("Fetching goals")?;
        log::debug!("Fetched {} goals for {}", goals.len(), user_id);
        Ok(goals)
    }

    fn add_goal(&self, user_id: &str, goal: &NewGoal) -> Result<i64> {
        let id = GoalRepo::insert(self, user_id, goal).context("Adding goal")?;
        log::info!("Added goal {} ({}) for {}", id, goal.category, user_id);
        Ok(id)
    }

    fn toggle_goal(&self, user_id: &str, goal_id: i64) -> Result<Option<bool>> {
        let Some(was) = GoalRepo::get_completed(self, user_id, goal_id)? else {
            return Ok(None);
        };
        GoalRepo::set_completed(self, user_id, goal_id, !was)?;
        log::info!("Goal {} completed = {}", goal_id, !was);
        Ok(Some(!was))
    }

    fn delete_goal(&self, user_id: &str, goal_id: i64) -> Result<bool> {
        let deleted = GoalRepo::delete(self, user_id, goal_id)?;
        if deleted {
            log::info!("Deleted goal {}", goal_id);
        }
        Ok(deleted)
    }
}
