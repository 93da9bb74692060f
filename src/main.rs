mod cli;
mod config;
mod db;
mod models;
mod progress;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    // Enable WAL mode for better concurrent access
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;
    log::debug!("Database ready at {:?}", db_path);

    match cli.command {
        Some(Commands::Log {
            activity,
            co2,
            category,
        }) => {
            handlers::handle_log(&conn, &config, &activity, co2, category.as_deref())?;
        }
        Some(Commands::Activities { limit }) => {
            handlers::handle_activities(&conn, &config, limit)?;
        }
        Some(Commands::Presets { all }) => {
            handlers::handle_presets(all)?;
        }
        Some(Commands::Goal { action }) => {
            handlers::handle_goal(&conn, &config, &action)?;
        }
        Some(Commands::Summary) => {
            handlers::handle_summary(&conn, &config)?;
        }
        Some(Commands::Achievements) => {
            handlers::handle_achievements(&conn, &config)?;
        }
        Some(Commands::Stats { week }) => {
            handlers::handle_stats(&conn, &config, week)?;
        }
        Some(Commands::Export { json }) => {
            handlers::handle_export(&conn, &config, json)?;
        }
        Some(Commands::Profile { name, email }) => {
            handlers::handle_profile(&mut config, name.as_deref(), email.as_deref())?;
        }

        // No subcommand → launch TUI
        None => {
            tui::app::run(conn, config)?;
        }
    }

    Ok(())
}
