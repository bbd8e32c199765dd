//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use availability_engine::planner::{parse_timezone, PlannerOptions, DEFAULT_PARALLEL_THRESHOLD};
use chrono::NaiveTime;
use chrono_tz::Tz;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// JSON snapshot of the planning tables.
    pub dataset_path: PathBuf,
    /// IANA zone used to display timestamps and place session drafts.
    pub display_timezone: String,
    /// Candidate count at which scoring moves onto the thread pool.
    pub parallel_threshold: usize,
    /// Local start of a session day, `HH:MM`.
    pub day_start: String,
    /// Local end of a session day, `HH:MM`.
    pub day_end: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            dataset_path: data_dir.join("dataset.json"),
            display_timezone: "Europe/Amsterdam".to_string(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            day_start: "08:00".to_string(),
            day_end: "17:00".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Later layers win: defaults, the user config file, `config_path`, then
    /// `PLANNER_*` environment variables.
    #[allow(clippy::result_large_err)]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("PLANNER_"));

        figment.extract()
    }

    pub fn timezone(&self) -> Result<Tz> {
        parse_timezone(&self.display_timezone)
            .with_context(|| format!("invalid display_timezone '{}'", self.display_timezone))
    }

    /// Engine options derived from this configuration.
    pub fn planner_options(&self) -> Result<PlannerOptions> {
        Ok(PlannerOptions {
            parallel_threshold: self.parallel_threshold,
            timezone: self.timezone()?,
            day_start: parse_time(&self.day_start).context("invalid day_start")?,
            day_end: parse_time(&self.day_end).context("invalid day_end")?,
        })
    }
}

fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .with_context(|| format!("expected HH:MM, got '{}'", s))
}

/// Returns the platform-specific config directory.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("session-planner"))
}

/// Returns the platform-specific data directory.
///
/// On Linux: `~/.local/share/session-planner`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("session-planner"))
}
