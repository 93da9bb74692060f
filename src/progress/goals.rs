use crate::models::{CategorySummary, GoalRecord, GoalSummary};

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn summarize(goals: &[GoalRecord]) -> GoalSummary {
    let total = goals.len() as u32;
    let completed = goals.iter().filter(|g| g.completed).count() as u32;
    let completion_rate_percent =
        (completed as f64 / total.max(1) as f64 * 100.0).round() as u32;

    // (category, total, completed) in first-seen order
    let mut groups: Vec<(String, u32, u32)> = Vec::new();
    for goal in goals {
        let idx = match groups.iter().position(|(c, _, _)| *c == goal.category) {
            Some(i) => i,
            None => {
                groups.push((goal.category.clone(), 0, 0));
                groups.len() - 1
            }
        };
        groups[idx].1 += 1;
        if goal.completed {
            groups[idx].2 += 1;
        }
    }

    let per_category = groups
        .into_iter()
        .map(|(category, total, completed)| CategorySummary {
            category,
            total,
            completed,
            percent: if total == 0 {
                0.0
            } else {
                round_to(completed as f64 / total as f64 * 100.0, 1)
            },
        })
        .collect();

    GoalSummary {
        total,
        completed,
        planned: total - completed,
        completion_rate_percent,
        per_category,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encouragement {
    NoGoals,
    AllDone,
    DoingGreat,
    KeepGoing,
}

impl Encouragement {
    pub fn for_summary(summary: &GoalSummary) -> Self {
        let threshold = (summary.total as f64 * 0.7).ceil() as u32;
        if summary.total == 0 {
            Encouragement::NoGoals
        } else if summary.completed == summary.total {
            Encouragement::AllDone
        } else if summary.completed >= threshold {
            Encouragement::DoingGreat
        } else {
            Encouragement::KeepGoing
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Encouragement::NoGoals => "🌱 Start setting your first goal!",
            Encouragement::AllDone => "🏅 You completed all your goals! Excellent work!",
            Encouragement::DoingGreat => "👏 You're doing great! Keep pushing!",
            Encouragement::KeepGoing => "🌱 Small steps matter. Keep going!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(id: i64, category: &str, completed: bool) -> GoalRecord {
        GoalRecord {
            id,
            text: format!("goal {}", id),
            deadline: None,
            completed,
            category: category.to_string(),
        }
    }

    #[test]
    fn empty_list_is_all_zero() {
        let s = summarize(&[]);
        assert_eq!(s, GoalSummary::default());
        assert_eq!(s.completion_rate_percent, 0);
        assert!(s.per_category.is_empty());
    }

    #[test]
    fn groups_in_first_seen_order() {
        let goals = vec![
            goal(1, "Diet", true),
            goal(2, "Diet", false),
            goal(3, "Energy", true),
        ];
        let s = summarize(&goals);
        assert_eq!(s.total, 3);
        assert_eq!(s.completed, 2);
        assert_eq!(s.planned, 1);
        assert_eq!(s.completion_rate_percent, 67);
        assert_eq!(
            s.per_category,
            vec![
                CategorySummary {
                    category: "Diet".into(),
                    total: 2,
                    completed: 1,
                    percent: 50.0
                },
                CategorySummary {
                    category: "Energy".into(),
                    total: 1,
                    completed: 1,
                    percent: 100.0
                },
            ]
        );
    }

    #[test]
    fn unexpected_categories_form_their_own_group() {
        let goals = vec![goal(1, "Waste", false), goal(2, "Garden", true)];
        let s = summarize(&goals);
        let names: Vec<_> = s.per_category.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, ["Waste", "Garden"]);
    }

    #[test]
    fn percent_rounds_to_one_decimal() {
        let goals = vec![
            goal(1, "Energy", true),
            goal(2, "Energy", true),
            goal(3, "Energy", false),
        ];
        let s = summarize(&goals);
        assert_eq!(s.per_category[0].percent, 66.7);
        assert_eq!(s.completion_rate_percent, 67);
    }

    #[test]
    fn summarize_is_idempotent() {
        let goals = vec![goal(1, "Diet", true), goal(2, "Waste", false)];
        assert_eq!(summarize(&goals), summarize(&goals));
    }

    #[test]
    fn encouragement_thresholds() {
        let msg = |done: usize, total: usize| {
            let goals: Vec<_> = (0..total)
                .map(|i| goal(i as i64, "Diet", i < done))
                .collect();
            Encouragement::for_summary(&summarize(&goals))
        };
        assert_eq!(msg(0, 0), Encouragement::NoGoals);
        assert_eq!(msg(3, 3), Encouragement::AllDone);
        assert_eq!(msg(7, 10), Encouragement::DoingGreat);
        assert_eq!(msg(6, 10), Encouragement::KeepGoing);
    }
}
