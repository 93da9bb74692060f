use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Category, InputError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub id: i64,
    pub text: String,
    pub deadline: Option<NaiveDate>,
    pub completed: bool,
    /// Kept as the raw stored string so unexpected values still group on their own
    pub category: String,
}

impl GoalRecord {
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.deadline.is_some_and(|d| d < today)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub text: String,
    pub category: Category,
    pub deadline: Option<NaiveDate>,
}

impl NewGoal {
    pub fn parse(text: &str, category: &str, deadline: Option<&str>) -> Result<Self, InputError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(InputError::EmptyGoal);
        }
        let category = category.parse::<Category>()?;
        let deadline = match deadline.map(str::trim).filter(|s| !s.is_empty()) {
            None => None,
            Some(s) => Some(
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|_| InputError::BadDate(s.to_string()))?,
            ),
        };
        Ok(Self {
            text: text.to_string(),
            category,
            deadline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_goal_with_deadline() {
        let g = NewGoal::parse(" Use reusable bags ", "waste", Some("2024-06-30")).unwrap();
        assert_eq!(g.text, "Use reusable bags");
        assert_eq!(g.category, Category::Waste);
        assert_eq!(g.deadline, Some(d(2024, 6, 30)));
    }

    #[test]
    fn blank_deadline_means_none() {
        let g = NewGoal::parse("Bike more", "transportation", Some("  ")).unwrap();
        assert_eq!(g.deadline, None);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(NewGoal::parse("", "diet", None), Err(InputError::EmptyGoal));
        assert_eq!(
            NewGoal::parse("x", "diet", Some("30/06/2024")),
            Err(InputError::BadDate("30/06/2024".into()))
        );
        assert!(matches!(
            NewGoal::parse("x", "garden", None),
            Err(InputError::UnknownCategory(_))
        ));
    }

    #[test]
    fn overdue_only_when_open_and_past_deadline() {
        let mut g = GoalRecord {
            id: 1,
            text: "Go vegetarian on Mondays".into(),
            deadline: Some(d(2024, 5, 1)),
            completed: false,
            category: "Diet".into(),
        };
        assert!(g.is_overdue(d(2024, 5, 2)));
        assert!(!g.is_overdue(d(2024, 5, 1)));
        g.completed = true;
        assert!(!g.is_overdue(d(2024, 5, 2)));
        g.completed = false;
        g.deadline = None;
        assert!(!g.is_overdue(d(2030, 1, 1)));
    }
}
