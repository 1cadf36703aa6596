use crate::error::{Error, Result};
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the Anthropic API key
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Environment variable holding an explicit juz override
pub const JUZ_OVERRIDE_ENV: &str = "JUZ_NUMBER";

/// Default config filename looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "daily-juz.toml";

/// Raw TOML configuration structure.
/// Every section and field is optional; missing values fall back to defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    site: RawSite,
    #[serde(default)]
    schedule: RawSchedule,
    #[serde(default)]
    model: RawModel,
    #[serde(default)]
    tafsir: RawTafsir,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSite {
    output_dir: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSchedule {
    anchor_date: Option<String>, // Parse as NaiveDate
    utc_offset_hours: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawModel {
    name: Option<String>,
    max_tokens: Option<u32>,
    api_base: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTafsir {
    enabled: Option<bool>,
    resource_id: Option<u32>,
    api_base: Option<String>,
    chunk_chars: Option<usize>,
    chunk_delay_secs: Option<u64>,
}

/// Validated run configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub site: SiteSettings,
    pub schedule: ScheduleSettings,
    pub model: ModelSettings,
    pub tafsir: TafsirSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteSettings {
    pub output_dir: PathBuf,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSettings {
    /// Date that maps to juz 1
    pub anchor_date: NaiveDate,
    /// Offset from UTC used to decide what "today" is
    pub utc_offset: FixedOffset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub name: String,
    pub max_tokens: u32,
    pub api_base: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TafsirSettings {
    pub enabled: bool,
    pub resource_id: u32,
    pub api_base: String,
    /// Maximum characters of source text sent in one summarisation call
    pub chunk_chars: usize,
    /// Pause between chunk calls to stay under rate limits
    pub chunk_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteSettings {
                output_dir: PathBuf::from("site"),
                title: "Daily Juz Tafsir".to_string(),
            },
            schedule: ScheduleSettings {
                // Ramadan 1447 schedule: 2026-02-23 lands on juz 7
                anchor_date: NaiveDate::from_ymd_opt(2026, 2, 17).unwrap_or_default(),
                utc_offset: FixedOffset::east_opt(0).unwrap_or_else(|| Utc.fix()),
            },
            model: ModelSettings {
                name: "claude-haiku-4-5-20251001".to_string(),
                max_tokens: 4096,
                api_base: "https://api.anthropic.com".to_string(),
                timeout: Duration::from_secs(120),
            },
            tafsir: TafsirSettings {
                enabled: false,
                resource_id: 169,
                api_base: "https://api.quran.com/api/v4".to_string(),
                chunk_chars: 120_000,
                chunk_delay: Duration::from_secs(65),
            },
        }
    }
}

/// Parse a config file from a path
pub fn parse_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    parse_config_str(&content)
}

/// Parse config from a string (useful for testing)
pub fn parse_config_str(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)?;
    convert(raw)
}

fn convert(raw: RawConfig) -> Result<Config> {
    let defaults = Config::default();

    let output_dir = match raw.site.output_dir {
        Some(dir) if dir.trim().is_empty() => {
            return Err(Error::ConfigParse(
                "Empty path in 'site.output_dir' field".to_string(),
            ));
        }
        Some(dir) => PathBuf::from(dir),
        None => defaults.site.output_dir,
    };

    let anchor_date = match raw.schedule.anchor_date {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|e| Error::ConfigParse(format!("Invalid schedule.anchor_date: {}", e)))?,
        None => defaults.schedule.anchor_date,
    };

    let utc_offset = match raw.schedule.utc_offset_hours {
        Some(hours) if (-12..=14).contains(&hours) => FixedOffset::east_opt(hours * 3600)
            .ok_or_else(|| Error::ConfigParse(format!("Invalid UTC offset: {}", hours)))?,
        Some(hours) => {
            return Err(Error::ConfigParse(format!(
                "schedule.utc_offset_hours must be between -12 and 14, got {}",
                hours
            )));
        }
        None => defaults.schedule.utc_offset,
    };

    let max_tokens = positive(
        raw.model.max_tokens.unwrap_or(defaults.model.max_tokens),
        "model.max_tokens",
    )?;
    let timeout_secs = positive(
        raw.model
            .timeout_secs
            .unwrap_or(defaults.model.timeout.as_secs()),
        "model.timeout_secs",
    )?;
    let chunk_chars = positive(
        raw.tafsir.chunk_chars.unwrap_or(defaults.tafsir.chunk_chars),
        "tafsir.chunk_chars",
    )?;

    Ok(Config {
        site: SiteSettings {
            output_dir,
            title: raw.site.title.unwrap_or(defaults.site.title),
        },
        schedule: ScheduleSettings {
            anchor_date,
            utc_offset,
        },
        model: ModelSettings {
            name: raw.model.name.unwrap_or(defaults.model.name),
            max_tokens,
            api_base: trim_base(raw.model.api_base.unwrap_or(defaults.model.api_base)),
            timeout: Duration::from_secs(timeout_secs),
        },
        tafsir: TafsirSettings {
            enabled: raw.tafsir.enabled.unwrap_or(defaults.tafsir.enabled),
            resource_id: raw.tafsir.resource_id.unwrap_or(defaults.tafsir.resource_id),
            api_base: trim_base(raw.tafsir.api_base.unwrap_or(defaults.tafsir.api_base)),
            chunk_chars,
            chunk_delay: raw
                .tafsir
                .chunk_delay_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.tafsir.chunk_delay),
        },
    })
}

fn positive<T: PartialEq + Default>(value: T, field: &str) -> Result<T> {
    if value == T::default() {
        return Err(Error::ConfigParse(format!("'{}' must be greater than 0", field)));
    }
    Ok(value)
}

fn trim_base(value: String) -> String {
    value.trim_end_matches('/').to_string()
}

/// Validate an API key taken from the environment or a flag
pub fn resolve_api_key(value: Option<String>) -> Result<String> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(Error::MissingCredential(API_KEY_ENV)),
    }
}
