use crate::models::{ActivityRecord, BadgeProgress, Category};

pub const DEFAULT_MILESTONE: u32 = 5;

pub fn badges_earned(count: u32, milestone: u32) -> u32 {
    count / milestone.max(1)
}

/// Always in `[1, milestone]`: right after earning a badge (and at zero) the
/// full milestone is shown, never "0 more".
pub fn remaining_to_next_badge(count: u32, milestone: u32) -> u32 {
    let milestone = milestone.max(1);
    milestone - count % milestone
}

/// Progress towards the next badge, in `[0, 1)`.
pub fn progress_fraction(count: u32, milestone: u32) -> f64 {
    let milestone = milestone.max(1);
    (count % milestone) as f64 / milestone as f64
}

/// Count occurrences of each key, in first-seen order.
pub fn tally<'a, I>(keys: I) -> Vec<(String, u32)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<(String, u32)> = Vec::new();
    for key in keys {
        match out.iter_mut().find(|(k, _)| k == key) {
            Some((_, n)) => *n += 1,
            None => out.push((key.to_string(), 1)),
        }
    }
    out
}

/// Per-activity counts, most frequent first. Ties keep first-seen order.
pub fn activity_counts(records: &[ActivityRecord]) -> Vec<(String, u32)> {
    let mut counts = tally(records.iter().map(|r| r.activity.as_str()));
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn badge_for(category: &str, count: u32, milestone: u32) -> BadgeProgress {
    BadgeProgress {
        category: category.to_string(),
        count,
        earned_count: badges_earned(count, milestone),
        remaining_to_next: remaining_to_next_badge(count, milestone),
        fraction: progress_fraction(count, milestone),
    }
}

/// One entry per known category, including those with nothing logged.
pub fn badge_progress(records: &[ActivityRecord], milestone: u32) -> Vec<BadgeProgress> {
    let counts = tally(records.iter().filter_map(|r| r.category.as_deref()));
    Category::all()
        .into_iter()
        .map(|c| {
            let count = counts
                .iter()
                .find(|(k, _)| k == c.as_str())
                .map(|(_, n)| *n)
                .unwrap_or(0);
            badge_for(c.as_str(), count, milestone)
        })
        .collect()
}
