pub mod generate;
pub mod select;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Args;
use daily_juz_core::config::{DEFAULT_CONFIG_FILE, JUZ_OVERRIDE_ENV};
use daily_juz_core::{Config, Selection, parse_config};
use std::path::Path;

/// How to pick the juz for a run
#[derive(Debug, Clone, Default, Args)]
pub struct SelectionArgs {
    /// Explicit juz number (1-30), bypasses date selection
    #[arg(long, env = JUZ_OVERRIDE_ENV)]
    pub juz: Option<String>,

    /// Date to select for, as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl SelectionArgs {
    /// Resolve the selection against `config`; the date defaults to today.
    /// A blank override (e.g. `JUZ_NUMBER=""` from a scheduled job) counts as none.
    pub fn resolve(&self, config: &Config) -> Result<(NaiveDate, Selection)> {
        let date = self.date.unwrap_or_else(|| today(config));
        let juz_override = self.juz.as_deref().filter(|raw| !raw.trim().is_empty());
        let selection =
            daily_juz_core::select(date, juz_override, config.schedule.anchor_date)?;
        Ok((date, selection))
    }
}

/// Load the config from an explicit path, ./daily-juz.toml, or defaults
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => parse_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                parse_config(default_path)
                    .with_context(|| format!("Failed to load {}", DEFAULT_CONFIG_FILE))
            } else {
                Ok(Config::default())
            }
        }
    }
}

/// Today's date at the configured UTC offset
pub fn today(config: &Config) -> NaiveDate {
    Utc::now()
        .with_timezone(&config.schedule.utc_offset)
        .date_naive()
}
