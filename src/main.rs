mod cli;
mod config;
mod db;
mod models;
mod reports;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;
use db::repository::MetaRepo;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;
    log::debug!("Using database {:?}", db_path);

    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;

    match cli.command {
        Some(Commands::Setup { reset }) => {
            handlers::handle_setup(&conn, &config, reset)?;
        }

        // Export is meant for pipes, never prompt
        Some(Commands::Export) => {
            handlers::handle_export(&conn, &config)?;
        }

        Some(cmd) => {
            ensure_setup(&conn, &config)?;
            match cmd {
                Commands::Exercise { action } => {
                    handlers::handle_exercise(&conn, &action)?;
                }
                Commands::Routine { action } => {
                    handlers::handle_routine(&conn, &config, &action)?;
                }
                Commands::Workout {
                    routine,
                    duration,
                    sets,
                } => {
                    handlers::handle_workout(&conn, routine, duration, &sets)?;
                }
                Commands::History { calendar } => {
                    handlers::handle_history(&conn, &config, calendar)?;
                }
                Commands::Record { action } => {
                    handlers::handle_record(&conn, &config, &action)?;
                }
                Commands::Goal { goal } => {
                    handlers::handle_goal(&conn, goal)?;
                }
                Commands::Profile { username } => {
                    handlers::handle_profile(&conn, username.as_deref())?;
                }
                Commands::Stats => {
                    handlers::handle_stats(&conn, &config)?;
                }
                Commands::Setup { .. } | Commands::Export => unreachable!(),
            }
        }

        // No subcommand → profile overview
        None => {
            ensure_setup(&conn, &config)?;
            handlers::handle_stats(&conn, &config)?;
        }
    }

    Ok(())
}

/// Check if setup has been done; if not, run it first.
fn ensure_setup(conn: &Connection, config: &AppConfig) -> Result<()> {
    let done = MetaRepo::get(conn, "setup_done")?;
    if done.as_deref() != Some("1") {
        eprintln!("No profile found. Running setup...");
        eprintln!();
        handlers::handle_setup(conn, config, false)?;
    }
    Ok(())
}
