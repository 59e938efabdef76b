use clap::Subcommand;
use studydesk_core::timetable;
use studydesk_core::{Config, Database};

use crate::common::{load_state, CliResult};

#[derive(Subcommand)]
pub enum TimetableAction {
    /// Lay out today's study slots
    Generate {
        /// Study-hour budget; defaults to the configured value
        #[arg(long)]
        hours: Option<f64>,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: TimetableAction) -> CliResult {
    let db = Database::open()?;
    let planner = load_state(&db)?;

    match action {
        TimetableAction::Generate { hours, json } => {
            let config = Config::load_or_default();
            let hours = hours.unwrap_or(config.timetable.daily_study_hours as f64);
            let slots = timetable::generate_at(
                &planner.subjects,
                hours,
                &planner.streak.completed_today,
                config.timetable.start_hour,
            )?;

            if json {
                println!("{}", serde_json::to_string_pretty(&slots)?);
            } else {
                for slot in &slots {
                    let done = if slot.completed { "  [done]" } else { "" };
                    println!(
                        "{:>8} - {:<8} {:>4} min  {}{done}",
                        slot.start_time, slot.end_time, slot.duration_minutes, slot.subject
                    );
                }
            }
        }
    }

    Ok(())
}
