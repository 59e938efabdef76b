mod backup;
mod config;
pub mod database;

pub use backup::{export_planner, import_planner};
pub use config::{Config, TimerConfig, TimetableConfig};
pub use database::{Database, SessionRecord, SessionSummary};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/studydesk[-dev]/` based on STUDYDESK_ENV.
///
/// Set STUDYDESK_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYDESK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studydesk-dev")
    } else {
        base_dir.join("studydesk")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
