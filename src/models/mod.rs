pub mod activity;
pub mod category;
pub mod error;
pub mod goal;
pub mod stats;

pub use activity::{ActivityRecord, NewActivity};
pub use category::Category;
pub use error::InputError;
pub use goal::{GoalRecord, NewGoal};
pub use stats::{BadgeProgress, CategorySummary, DailyCount, GoalSummary, StreakState};
