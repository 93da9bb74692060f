use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{Category, InputError};

/// One logged action. Never edited after insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: i64,
    pub activity: String,
    /// Badge category this activity counts towards, if any
    pub category: Option<String>,
    pub occurred_at: NaiveDateTime,
}

impl ActivityRecord {
    pub fn date(&self) -> NaiveDate {
        self.occurred_at.date()
    }
}

/// Validated input for a new activity log.
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub activity: String,
    pub category: Option<Category>,
    pub co2_kg: Option<f64>,
    pub occurred_at: NaiveDateTime,
}

impl NewActivity {
    pub fn parse(
        name: &str,
        category: Option<&str>,
        co2_kg: Option<f64>,
        occurred_at: NaiveDateTime,
    ) -> Result<Self, InputError> {
        let activity = name.trim();
        if activity.is_empty() {
            return Err(InputError::EmptyActivity);
        }
        let category = category.map(str::parse::<Category>).transpose()?;
        if let Some(kg) = co2_kg {
            if !kg.is_finite() || kg < 0.0 {
                return Err(InputError::BadEmission(kg));
            }
        }
        Ok(Self {
            activity: activity.to_string(),
            category,
            co2_kg,
            occurred_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn trims_name_and_parses_category() {
        let a = NewActivity::parse("  Biked to Work ", Some("transport"), None, noon()).unwrap();
        assert_eq!(a.activity, "Biked to Work");
        assert_eq!(a.category, Some(Category::Transportation));
    }

    #[test]
    fn rejects_blank_name() {
        assert_eq!(
            NewActivity::parse("   ", None, None, noon()),
            Err(InputError::EmptyActivity)
        );
    }

    #[test]
    fn rejects_negative_or_nan_emission() {
        assert!(matches!(
            NewActivity::parse("Composted", None, Some(-1.0), noon()),
            Err(InputError::BadEmission(_))
        ));
        assert!(NewActivity::parse("Composted", None, Some(f64::NAN), noon()).is_err());
    }

    #[test]
    fn record_date_drops_time_of_day() {
        let r = ActivityRecord {
            id: 1,
            activity: "Planted a Tree".into(),
            category: None,
            occurred_at: noon(),
        };
        assert_eq!(r.date(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }
}
