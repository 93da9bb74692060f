use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::InputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Diet,
    Transportation,
    Energy,
    Waste,
}

impl Category {
    pub fn all() -> Vec<Category> {
        vec![
            Category::Diet,
            Category::Transportation,
            Category::Energy,
            Category::Waste,
        ]
    }

    /// Stored form. Goals keep this exact string in the `category` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Diet => "Diet",
            Category::Transportation => "Transportation",
            Category::Energy => "Energy",
            Category::Waste => "Waste",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Diet => "🥗",
            Category::Transportation => "🚲",
            Category::Energy => "💡",
            Category::Waste => "🧼",
        }
    }

    /// Icon for an arbitrary stored category string; unknown ones get a box.
    pub fn icon_for(raw: &str) -> &'static str {
        Category::from_str(raw).map(|c| c.icon()).unwrap_or("📦")
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "diet" | "food" => Ok(Category::Diet),
            "transportation" | "transport" | "travel" => Ok(Category::Transportation),
            "energy" => Ok(Category::Energy),
            "waste" => Ok(Category::Waste),
            _ => Err(InputError::UnknownCategory(s.to_string())),
        }
    }
}
