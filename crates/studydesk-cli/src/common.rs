use studydesk_core::{Clock, Database, Planner, StreakChange, SystemClock};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Load the planner and roll the study day forward; a day rollover is
/// persisted immediately so every command sees the same view.
pub fn load_state(db: &Database) -> Result<Planner, Box<dyn std::error::Error>> {
    let mut planner = db.load_planner()?;
    if planner.evaluate_day(SystemClock.today()) != StreakChange::Unchanged {
        db.save_planner(&planner)?;
    }
    Ok(planner)
}
