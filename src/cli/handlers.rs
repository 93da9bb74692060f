use anyhow::{anyhow, Result};
use chrono::Local;

use crate::cli::args::GoalCommands;
use crate::config::AppConfig;
use crate::db::EcoStore;
use crate::models::{Category, NewGoal};
use crate::progress::emissions::{self, co2_for};
use crate::progress::goals::Encouragement;
use crate::progress::EcoSnapshot;
use crate::utils::format::{format_kg, format_percent, pad_display, plural, progress_bar, ratio_bar};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const LEAF: &str = "\x1b[38;2;120;190;110m";

fn snapshot<S: EcoStore>(store: &S, config: &AppConfig) -> Result<EcoSnapshot> {
    EcoSnapshot::build(
        store,
        &config.profile.user_id,
        Local::now().date_naive(),
        config.badges.milestone(),
    )
}

// ─── Activities ──────────────────────────────────────────────────────────────

pub fn handle_log<S: EcoStore>(
    store: &S,
    config: &AppConfig,
    activity: &str,
    co2: Option<f64>,
    category: Option<&str>,
) -> Result<()> {
    let new = emissions::resolve_log(activity, category, co2, Local::now().naive_local())?;
    store.log_activity(&config.profile.user_id, &new)?;

    let custom = store.custom_emissions(&config.profile.user_id)?;
    let saved = co2_for(&new.activity, &custom);
    println_colored!(
        GREEN,
        "  ✓ Logged {} — {} CO₂ saved",
        new.activity,
        format_kg(saved)
    );
    if saved == 0.0 {
        println_colored!(
            DIM,
            "  No CO₂ value known for this activity. Add one with --co2 <kg>."
        );
    }
    Ok(())
}

pub fn handle_activities<S: EcoStore>(store: &S, config: &AppConfig, limit: usize) -> Result<()> {
    let snap = snapshot(store, config)?;
    let custom = store.custom_emissions(&config.profile.user_id)?;

    println!();
    println_colored!(LEAF, "  Your Logs");
    println!();
    if snap.activities.is_empty() {
        println_colored!(DIM, "  No logs yet.");
    } else {
        for record in snap.recent(limit) {
            println!(
                "  {}  {:<32} {}",
                record.occurred_at.format("%Y-%m-%d %H:%M"),
                record.activity,
                format_kg(co2_for(&record.activity, &custom))
            );
        }
        if snap.activities.len() > limit {
            println_colored!(DIM, "  … {} older entries", snap.activities.len() - limit);
        }
    }
    println!();
    println_colored!(BOLD, "  Estimated CO₂ saved: {}", format_kg(snap.co2_saved_kg));
    println!();
    Ok(())
}

pub fn handle_presets(all: bool) -> Result<()> {
    println!();
    println_colored!(LEAF, "  Preset Activities");
    println!();
    for preset in emissions::presets(all) {
        let icon = preset.category.map(|c| c.icon()).unwrap_or("🌳");
        println!(
            "  {} {:<30} {}",
            pad_display(icon, 2),
            preset.name,
            format_kg(preset.co2_kg)
        );
    }
    if !all {
        println!();
        println_colored!(DIM, "  Use --all to see more");
    }
    println!();
    Ok(())
}

// ─── Goals ───────────────────────────────────────────────────────────────────

pub fn handle_goal<S: EcoStore>(store: &S, config: &AppConfig, action: &GoalCommands) -> Result<()> {
    let user = &config.profile.user_id;
    match action {
        GoalCommands::Add {
            text,
            category,
            deadline,
        } => {
            let goal = NewGoal::parse(text, category, deadline.as_deref())?;
            let id = store.add_goal(user, &goal)?;
            println_colored!(
                GREEN,
                "  ✓ Added goal #{}: {} {}",
                id,
                goal.category.icon(),
                goal.text
            );
        }
        GoalCommands::List => {
            let goals = store.fetch_goals(user)?;
            let today = Local::now().date_naive();
            println!();
            println_colored!(LEAF, "  Your Goals");
            println!();
            if goals.is_empty() {
                println_colored!(DIM, "  No goals set yet. Start now!");
            }
            for goal in &goals {
                let check = if goal.completed { "✓" } else { "○" };
                let due = goal
                    .deadline
                    .map(|d| format!("  due {}", d.format("%Y-%m-%d")))
                    .unwrap_or_default();
                let line = format!(
                    "  #{:<3} {} {} {}  [{}]{}",
                    goal.id,
                    check,
                    Category::icon_for(&goal.category),
                    goal.text,
                    goal.category,
                    due
                );
                if goal.completed {
                    println_colored!(DIM, "{}", line);
                } else if config.goals.highlight_overdue && goal.is_overdue(today) {
                    println_colored!(RED, "{}  (overdue)", line);
                } else {
                    println!("{}", line);
                }
            }
            println!();
        }
        GoalCommands::Done { id } => match store.toggle_goal(user, *id)? {
            Some(true) => println_colored!(GREEN, "  ✓ Goal #{} completed", id),
            Some(false) => println_colored!(AMBER, "  ○ Goal #{} moved back to planned", id),
            None => return Err(anyhow!("No goal with id {}", id)),
        },
        GoalCommands::Delete { id } => {
            if !store.delete_goal(user, *id)? {
                return Err(anyhow!("No goal with id {}", id));
            }
            println_colored!(DIM, "  Deleted goal #{}", id);
        }
    }
    Ok(())
}

pub fn handle_summary<S: EcoStore>(store: &S, config: &AppConfig) -> Result<()> {
    let snap = snapshot(store, config)?;
    let summary = &snap.goal_summary;

    println!();
    println_colored!(LEAF, "  Goal Summary");
    println!();
    println!("  Total goals:      {}", summary.total);
    println_colored!(GREEN, "  Completed:        {}", summary.completed);
    println_colored!(AMBER, "  Planned:          {}", summary.planned);
    println_colored!(BOLD, "  Completion rate:  {}%", summary.completion_rate_percent);
    println!();
    println!("  {}", Encouragement::for_summary(summary).message());
    println!();

    if summary.per_category.is_empty() {
        println_colored!(DIM, "  No category progress to show.");
    } else {
        println_colored!(LEAF, "  Category Completion %");
        println!();
        for cat in &summary.per_category {
            println!(
                "  {} {}  {}  {}  ({}/{})",
                pad_display(Category::icon_for(&cat.category), 2),
                pad_display(&cat.category, 16),
                ratio_bar(cat.percent / 100.0, 10),
                format_percent(cat.percent),
                cat.completed,
                cat.total
            );
        }
    }
    println!();
    Ok(())
}

// ─── Achievements ────────────────────────────────────────────────────────────

pub fn handle_achievements<S: EcoStore>(store: &S, config: &AppConfig) -> Result<()> {
    let snap = snapshot(store, config)?;

    println!();
    println_colored!(LEAF, "  🌿 Eco Journey");
    println!();
    println_colored!(
        AMBER,
        "  🔥 {} streak active!",
        plural(snap.streak.current, "day")
    );
    println!();

    for badge in &snap.badges {
        let icon = Category::icon_for(&badge.category);
        let status = if badge.earned() {
            format!("{}{}\x1b[0m", GREEN, plural(badge.earned_count, "Badge"))
        } else {
            format!("{}Not Yet Earned\x1b[0m", DIM)
        };
        println!(
            "  {} {}  {}  {}",
            pad_display(icon, 2),
            pad_display(&badge.category, 16),
            ratio_bar(badge.fraction, 10),
            status
        );
        println_colored!(
            DIM,
            "       {} more to next badge",
            badge.remaining_to_next
        );
    }
    println!();
    Ok(())
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats<S: EcoStore>(store: &S, config: &AppConfig, week: bool) -> Result<()> {
    let snap = snapshot(store, config)?;

    println!();
    println_colored!(LEAF, "  Statistics");
    println!();
    println_colored!(
        BOLD,
        "  Streak:      {} current  |  {} best",
        plural(snap.streak.current, "day"),
        plural(snap.streak.best, "day")
    );
    let logged = snap.activities.len();
    println!(
        "  Logged:      {} {} on {}",
        logged,
        if logged == 1 { "activity" } else { "activities" },
        plural(snap.streak.active_days, "day")
    );
    println_colored!(GREEN, "  CO₂ saved:   {}", format_kg(snap.co2_saved_kg));

    if !snap.top_activities.is_empty() {
        println!();
        println_colored!(DIM, "  Top activities");
        for (name, count) in snap.top_activities.iter().take(5) {
            println!("    {:<32} ×{}", name, count);
        }
    }

    if week {
        println!();
        println_colored!(DIM, "  Last 7 days  (● = 3+, ◕ = 2, ◑ = 1, ○ = none)");
        println!();
        print!("  ");
        for day in &snap.last_week {
            let icon = match day.activities {
                0 => format!("{}○\x1b[0m ", DIM),
                1 => format!("{}◑\x1b[0m ", AMBER),
                2 => format!("{}◕\x1b[0m ", GREEN),
                _ => format!("{}●\x1b[0m ", GREEN),
            };
            print!("{}", icon);
        }
        println!();
    }

    println!();
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

pub fn handle_export<S: EcoStore>(store: &S, config: &AppConfig, json: bool) -> Result<()> {
    let snap = snapshot(store, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snap)?);
        return Ok(());
    }

    println!("# greenstep — Weekly Summary");
    println!("# {}", snap.today.format("%Y-%m-%d"));
    println!();
    println!("Profile: {}", config.profile.name);
    println!();
    println!("## Activities (last 7 days)");
    for day in &snap.last_week {
        println!(
            "  {}  {:>2}  {}",
            day.date,
            day.activities,
            progress_bar(day.activities.min(5), 5, 5)
        );
    }
    println!();
    println!("## Badges");
    for badge in &snap.badges {
        println!(
            "  {:<16} {} earned, {} to next",
            badge.category, badge.earned_count, badge.remaining_to_next
        );
    }
    println!();
    println!("## Summary");
    println!("  Streak:     {} (best: {})", plural(snap.streak.current, "day"), snap.streak.best);
    println!("  CO₂ saved:  {}", format_kg(snap.co2_saved_kg));
    println!(
        "  Goals:      {}/{} completed ({}%)",
        snap.goal_summary.completed, snap.goal_summary.total, snap.goal_summary.completion_rate_percent
    );
    Ok(())
}

// ─── Profile ─────────────────────────────────────────────────────────────────

pub fn handle_profile(
    config: &mut AppConfig,
    name: Option<&str>,
    email: Option<&str>,
) -> Result<()> {
    let mut changed = false;
    if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
        config.profile.name = name.to_string();
        changed = true;
    }
    if let Some(email) = email.map(str::trim) {
        config.profile.email = (!email.is_empty()).then(|| email.to_string());
        changed = true;
    }
    if changed {
        config.save()?;
        println_colored!(GREEN, "  ✓ Profile updated");
    }

    println!();
    println_colored!(LEAF, "  Profile");
    println!();
    println!("  Name:   {}", config.profile.name);
    println!(
        "  Email:  {}",
        config.profile.email.as_deref().unwrap_or("—")
    );
    println_colored!(DIM, "  User:   {}", config.profile.user_id);
    println!();
    Ok(())
}
