//! TOML-based application configuration.
//!
//! Stores user preferences: timer durations, timetable defaults, the daily
//! study goal and notification toggles. Stored at
//! `~/.config/studydesk/config.toml`; missing fields take their defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{ConfigError, Result};

/// Pomodoro timer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
}

/// Timetable generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableConfig {
    /// Hour of day the first slot starts at.
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    /// Default daily study-hour budget.
    #[serde(default = "default_daily_study_hours")]
    pub daily_study_hours: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studydesk/config.toml`.
/// Notification toggles are not here: they live in the persisted state
/// document alongside the rest of the planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub timetable: TimetableConfig,
    /// Daily study goal in minutes.
    #[serde(default = "default_daily_goal_minutes")]
    pub daily_goal_minutes: u32,
}

fn default_work_minutes() -> u32 {
    25
}
fn default_break_minutes() -> u32 {
    5
}
fn default_start_hour() -> u32 {
    9
}
fn default_daily_study_hours() -> u32 {
    4
}
fn default_daily_goal_minutes() -> u32 {
    240
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
        }
    }
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            start_hour: default_start_hour(),
            daily_study_hours: default_daily_study_hours(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            timetable: TimetableConfig::default(),
            daily_goal_minutes: default_daily_goal_minutes(),
        }
    }
}

impl Config {
    /// Every settable key, in display order.
    pub const KEYS: &'static [&'static str] = &[
        "timer.work_minutes",
        "timer.break_minutes",
        "timetable.start_hour",
        "timetable.daily_study_hours",
        "daily_goal_minutes",
    ];

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing and returning the default config when no
    /// file exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path,
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "timer.work_minutes" => self.timer.work_minutes.to_string(),
            "timer.break_minutes" => self.timer.break_minutes.to_string(),
            "timetable.start_hour" => self.timetable.start_hour.to_string(),
            "timetable.daily_study_hours" => self.timetable.daily_study_hours.to_string(),
            "daily_goal_minutes" => self.daily_goal_minutes.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a value by key. Unknown keys and unparseable or out-of-range
    /// values are errors; the caller persists with [`Config::save`].
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "timer.work_minutes" => self.timer.work_minutes = parse_u32(key, value, 1, 60)?,
            "timer.break_minutes" => self.timer.break_minutes = parse_u32(key, value, 1, 30)?,
            "timetable.start_hour" => self.timetable.start_hour = parse_u32(key, value, 0, 23)?,
            "timetable.daily_study_hours" => {
                self.timetable.daily_study_hours = parse_u32(key, value, 1, 12)?
            }
            "daily_goal_minutes" => self.daily_goal_minutes = parse_u32(key, value, 1, 1440)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// All key/value pairs, for listing.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        Self::KEYS
            .iter()
            .filter_map(|&key| self.get(key).map(|value| (key, value)))
            .collect()
    }
}

fn parse_u32(key: &str, value: &str, min: u32, max: u32) -> Result<u32, ConfigError> {
    let parsed: u32 = value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("'{value}' is not a number"),
    })?;
    if parsed < min || parsed > max {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{parsed} is outside {min}..={max}"),
        });
    }
    Ok(parsed)
}
