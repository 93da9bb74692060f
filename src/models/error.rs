use thiserror::Error;

/// Rejected user input, before anything reaches the store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("Unknown category '{0}'. Use: diet, transportation, energy, waste")]
    UnknownCategory(String),
    #[error("Bad date '{0}', expected YYYY-MM-DD")]
    BadDate(String),
    #[error("Activity name cannot be empty")]
    EmptyActivity,
    #[error("Goal text cannot be empty")]
    EmptyGoal,
    #[error("CO₂ value must be a non-negative number, got {0}")]
    BadEmission(f64),
}
