use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "greenstep", version, author, about = "A terminal companion for tracking eco-friendly habits")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log an eco-friendly activity for today
    Log {
        /// Activity name (a preset like "Biked to Work", or anything else)
        activity: String,
        /// Your estimate of kg CO₂ saved, for activities without a preset value
        #[arg(long)]
        co2: Option<f64>,
        /// Badge category (diet, transportation, energy, waste)
        #[arg(long)]
        category: Option<String>,
    },
    /// List logged activities and the estimated CO₂ saved
    Activities {
        /// How many recent entries to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Show the preset activities and their CO₂ values
    Presets {
        /// Include the extra presets
        #[arg(long)]
        all: bool,
    },
    /// Goal management
    Goal {
        #[command(subcommand)]
        action: GoalCommands,
    },
    /// Goal completion summary by category
    Summary,
    /// Badges per category and the daily streak
    Achievements,
    /// Show statistics
    Stats {
        /// Show activity counts for the last 7 days
        #[arg(long)]
        week: bool,
    },
    /// Export a weekly summary to stdout
    Export {
        /// Emit the full snapshot as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show or update your profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum GoalCommands {
    /// Set a new goal
    Add {
        /// What you want to achieve
        text: String,
        /// diet, transportation, energy or waste
        #[arg(long)]
        category: String,
        /// Due date, YYYY-MM-DD
        #[arg(long)]
        deadline: Option<String>,
    },
    /// Show all goals
    List,
    /// Toggle a goal between done and planned
    Done {
        id: i64,
    },
    /// Delete a goal
    Delete {
        id: i64,
    },
}
