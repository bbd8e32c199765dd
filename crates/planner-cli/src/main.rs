//! `session-planner` CLI — browse trainer and room availability, plan
//! training requests, and re-anchor session schedules.
//!
//! ## Usage
//!
//! ```sh
//! # Who is free in the second week of January?
//! session-planner availability --start 2024-01-08 --end 2024-01-12
//!
//! # Rooms only, as JSON
//! session-planner availability --start 2024-01-08 --end 2024-01-12 --kind room --json
//!
//! # When does a 5-day training starting on Monday end?
//! session-planner end-date --start 2024-01-01 --days 5
//!
//! # Rank trainers and rooms for a request and draft the session
//! session-planner plan --request req-1
//!
//! # Move a session's schedule entries onto its current start date
//! session-planner shift --session ses-1
//! ```
//!
//! The dataset is read from `--data`, falling back to the configured
//! `dataset_path`.

mod config;
mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use availability_engine::planner::{
    browse_availability, plan_request, reschedule_session, session_trainers,
};
use availability_engine::{resolve_session_end_date, Dataset, DateRange, SchedulingStore};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "session-planner",
    version,
    about = "Plan training sessions around trainer and room availability"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the dataset JSON (overrides the configured dataset_path)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Trainer,
    Room,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank trainers and rooms by availability over a date range
    Availability {
        /// First day of the range (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        start: NaiveDate,
        /// Last day of the range (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        end: NaiveDate,
        /// Only show one kind of resource
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Resolve a session end date from a start date and a weekday count
    EndDate {
        /// First day of the session (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        start: NaiveDate,
        /// Session length in weekdays
        #[arg(long)]
        days: u32,
    },
    /// Rank eligible trainers and rooms for a training request
    Plan {
        /// Request id
        #[arg(long)]
        request: String,
        /// Start date, replacing the request's expected start
        #[arg(long, value_parser = parse_date)]
        start: Option<NaiveDate>,
        /// End date, replacing the one derived from the training duration
        #[arg(long, value_parser = parse_date)]
        end: Option<NaiveDate>,
        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Shift a session's schedule entries onto its start date
    Shift {
        /// Session id
        #[arg(long)]
        session: String,
        /// Anchor date, replacing the session's stored start date
        #[arg(long, value_parser = parse_date)]
        start: Option<NaiveDate>,
        /// Print JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
    /// Show the synchronised trainer list of a session
    Trainers {
        /// Session id
        #[arg(long)]
        session: String,
    },
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("'{}' is not a valid date (expected YYYY-MM-DD)", s))
}

fn load_dataset(path: &Path) -> Result<Dataset> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;
    let dataset = Dataset::from_json(&json)
        .with_context(|| format!("Failed to parse dataset: {}", path.display()))?;
    tracing::debug!(
        resources = dataset.resources.len(),
        sessions = dataset.sessions.len(),
        schedules = dataset.schedules.len(),
        "loaded dataset"
    );
    Ok(dataset)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("Failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    let options = config.planner_options()?;
    let dataset_path = cli.data.clone().unwrap_or_else(|| config.dataset_path.clone());

    match command {
        Commands::Availability {
            start,
            end,
            kind,
            json,
        } => {
            let target = DateRange::new(start, end)?;
            let store = load_dataset(&dataset_path)?;
            let overview = browse_availability(&store, &target, &options)
                .context("Failed to compute availability")?;

            let (show_trainers, show_rooms) = match kind {
                Some(KindArg::Trainer) => (true, false),
                Some(KindArg::Room) => (false, true),
                None => (true, true),
            };

            if json {
                match kind {
                    Some(KindArg::Trainer) => print_json(&overview.trainers)?,
                    Some(KindArg::Room) => print_json(&overview.rooms)?,
                    None => print_json(&overview)?,
                }
            } else {
                print!("{}", render::overview(&overview, show_trainers, show_rooms));
            }
        }
        Commands::EndDate { start, days } => {
            let end = resolve_session_end_date(start, days)?;
            println!("{}", end.format("%Y-%m-%d"));
        }
        Commands::Plan {
            request,
            start,
            end,
            json,
        } => {
            let store = load_dataset(&dataset_path)?;
            let plan = plan_request(&store, &request, start, end, &options)
                .with_context(|| format!("Failed to plan request '{}'", request))?;

            if json {
                print_json(&plan)?;
            } else {
                print!("{}", render::plan(&plan, options.timezone));
            }
        }
        Commands::Shift {
            session,
            start,
            json,
        } => {
            let store = load_dataset(&dataset_path)?;
            let shifted = reschedule_session(&store, &session, start)
                .with_context(|| format!("Failed to shift schedule of session '{}'", session))?;

            if json {
                print_json(&shifted)?;
            } else {
                print!("{}", render::schedule(&shifted, options.timezone));
            }
        }
        Commands::Trainers { session } => {
            let store = load_dataset(&dataset_path)?;
            let record = store.session(&session)?;
            let assignment =
                session_trainers(record.main_trainer.as_deref(), record.second_trainer.as_deref());
            print!("{}", render::trainers(&record.id, &assignment));
        }
    }

    Ok(())
}
