use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::models::{ActivityRecord, Category, InputError, NewActivity};

#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub name: &'static str,
    /// Estimated kg of CO₂ saved per occurrence
    pub co2_kg: f64,
    pub category: Option<Category>,
    /// Shown without `--all`
    pub featured: bool,
}

const fn preset(name: &'static str, co2_kg: f64, category: Option<Category>, featured: bool) -> Preset {
    Preset {
        name,
        co2_kg,
        category,
        featured,
    }
}

pub const PRESETS: &[Preset] = &[
    preset("Used Public Transport", 2.5, Some(Category::Transportation), true),
    preset("Biked to Work", 3.2, Some(Category::Transportation), true),
    preset("Ate Vegetarian Meal", 1.5, Some(Category::Diet), true),
    preset("Planted a Tree", 20.0, None, true),
    preset("Recycled Plastic", 1.0, Some(Category::Waste), true),
    preset("Recycled Paper", 0.8, Some(Category::Waste), false),
    preset("Took Cold Shower", 0.5, Some(Category::Energy), false),
    preset("Avoided Disposable Cutlery", 0.3, Some(Category::Waste), false),
    preset("Composted Organic Waste", 1.1, Some(Category::Waste), false),
    preset("Air Dried Clothes", 1.4, Some(Category::Energy), false),
    preset("Reduced Home Heating", 2.2, Some(Category::Energy), false),
    preset("Carpooled with Friends", 3.0, Some(Category::Transportation), false),
    preset("Used Reusable Bags", 0.6, Some(Category::Waste), false),
    preset("Donated Old Clothes", 0.9, Some(Category::Waste), false),
    preset("Avoided Fast Fashion", 1.2, Some(Category::Diet), false),
];

pub fn presets(include_extra: bool) -> Vec<&'static Preset> {
    PRESETS
        .iter()
        .filter(|p| include_extra || p.featured)
        .collect()
}

/// Exact-name lookup; preset names are matched case-insensitively.
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

/// Preset value first, then the user's own estimate, else nothing saved.
pub fn co2_for(activity: &str, custom: &HashMap<String, f64>) -> f64 {
    find_preset(activity)
        .map(|p| p.co2_kg)
        .or_else(|| custom.get(activity).copied())
        .unwrap_or(0.0)
}

/// Build a log entry. A preset keeps its canonical name and its catalog
/// category unless one is given, and never stores a custom CO₂ value.
pub fn resolve_log(
    name: &str,
    category: Option<&str>,
    co2_kg: Option<f64>,
    occurred_at: NaiveDateTime,
) -> Result<NewActivity, InputError> {
    match find_preset(name) {
        Some(preset) => NewActivity::parse(
            preset.name,
            category.or_else(|| preset.category.map(|c| c.as_str())),
            None,
            occurred_at,
        ),
        None => NewActivity::parse(name, category, co2_kg, occurred_at),
    }
}

pub fn total_co2_saved(records: &[ActivityRecord], custom: &HashMap<String, f64>) -> f64 {
    records.iter().map(|r| co2_for(&r.activity, custom)).sum()
}
