use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreakState {
    pub current: u32,
    pub best: u32,
    pub active_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeProgress {
    pub category: String,
    pub count: u32,
    pub earned_count: u32,
    pub remaining_to_next: u32,
    pub fraction: f64,
}

impl BadgeProgress {
    pub fn earned(&self) -> bool {
        self.earned_count > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total: u32,
    pub completed: u32,
    pub percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalSummary {
    pub total: u32,
    pub completed: u32,
    pub planned: u32,
    pub completion_rate_percent: u32,
    pub per_category: Vec<CategorySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: String,
    pub activities: u32,
}
