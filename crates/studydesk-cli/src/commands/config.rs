use clap::Subcommand;
use studydesk_core::{Config, Database};

use crate::common::{load_state, CliResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print a value
    Get { key: String },
    /// Set a value
    Set { key: String, value: String },
    /// List all keys and values
    List,
}

/// Notification toggles live in the state document, not the config file;
/// `notifications.*` keys are routed there.
fn notification_get(db: &Database, field: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let planner = load_state(db)?;
    let value = match field {
        "daily_reminders" => planner.notifications.daily_reminders,
        "revision_alerts" => planner.notifications.revision_alerts,
        "test_alerts" => planner.notifications.test_alerts,
        _ => return Ok(None),
    };
    Ok(Some(value.to_string()))
}

fn notification_set(db: &Database, field: &str, value: &str) -> Result<bool, Box<dyn std::error::Error>> {
    let parsed: bool = value
        .parse()
        .map_err(|_| format!("'{value}' is not a boolean"))?;
    let mut planner = load_state(db)?;
    match field {
        "daily_reminders" => planner.notifications.daily_reminders = parsed,
        "revision_alerts" => planner.notifications.revision_alerts = parsed,
        "test_alerts" => planner.notifications.test_alerts = parsed,
        _ => return Ok(false),
    }
    db.save_planner(&planner)?;
    Ok(true)
}

pub fn run(action: ConfigAction) -> CliResult {
    match action {
        ConfigAction::Get { key } => {
            let value = match key.strip_prefix("notifications.") {
                Some(field) => notification_get(&Database::open()?, field)?,
                None => Config::load()?.get(&key),
            };
            match value {
                Some(value) => println!("{value}"),
                None => println!("Unknown key: {key}"),
            }
        }
        ConfigAction::Set { key, value } => {
            let known = match key.strip_prefix("notifications.") {
                Some(field) => notification_set(&Database::open()?, field, &value)?,
                None => {
                    let mut config = Config::load()?;
                    config.set(&key, &value)?;
                    config.save()?;
                    true
                }
            };
            if known {
                println!("{key} = {value}");
            } else {
                println!("Unknown key: {key}");
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            for (key, value) in config.entries() {
                println!("{key} = {value}");
            }
            let planner = load_state(&Database::open()?)?;
            let n = planner.notifications;
            println!("notifications.daily_reminders = {}", n.daily_reminders);
            println!("notifications.revision_alerts = {}", n.revision_alerts);
            println!("notifications.test_alerts = {}", n.test_alerts);
        }
    }
    Ok(())
}
