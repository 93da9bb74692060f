use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::models::{ActivityRecord, StreakState};

/// Distinct calendar dates with at least one logged activity.
pub fn dates_of(records: &[ActivityRecord]) -> BTreeSet<NaiveDate> {
    records.iter().map(ActivityRecord::date).collect()
}

/// Consecutive days ending at `today`. Zero if nothing was logged today.
pub fn compute_streak(event_dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0u32;
    let mut day = today;
    while event_dates.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// Longest run of consecutive dates anywhere in the history.
pub fn best_streak(event_dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut best = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;

    // BTreeSet iterates in ascending order
    for &date in event_dates {
        run = match prev.and_then(|p| p.succ_opt()) {
            Some(next) if next == date => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(date);
    }
    best
}

pub fn streak_state(event_dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> StreakState {
    StreakState {
        current: compute_streak(event_dates, today),
        best: best_streak(event_dates),
        active_days: event_dates.len() as u32,
    }
}
