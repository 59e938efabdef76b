use clap::Subcommand;
use studydesk_core::stats::format_duration;
use studydesk_core::{Database, Overview};

use crate::common::{load_state, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Dashboard overview
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Today's recorded pomodoro sessions
    Sessions,
}

pub fn run(action: StatsAction) -> CliResult {
    let db = Database::open()?;

    match action {
        StatsAction::Show { json } => {
            let planner = load_state(&db)?;
            let overview = Overview::compute(&planner);
            if json {
                println!("{}", serde_json::to_string_pretty(&overview)?);
            } else {
                println!("Streak:          {} days", overview.streak_days);
                println!(
                    "Completed today: {}/{}",
                    overview.completed_today, overview.total_subjects
                );
                println!("Avg progress:    {}%", overview.average_progress);
                println!(
                    "Study today:     {}",
                    format_duration(overview.study_time_today_seconds)
                );
                println!("Pomodoros:       {}", overview.completed_pomodoros);
                println!(
                    "Tasks:           {} done / {} pending ({}%)",
                    overview.completed_tasks, overview.pending_tasks, overview.productivity_pct
                );
                for entry in &overview.categories {
                    println!("  {:<11} {}", entry.category.label(), entry.count);
                }
            }
        }
        StatsAction::Sessions => {
            let summary = db.today_summary()?;
            println!(
                "Today: {} focus sessions ({} min), {} breaks ({} min)",
                summary.focus_sessions,
                summary.focus_minutes,
                summary.break_sessions,
                summary.break_minutes
            );
            for session in db.recent_sessions(10)? {
                println!(
                    "  {:<6} {:>3} min  {}",
                    session.phase,
                    session.duration_min,
                    session.completed_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
    }
    Ok(())
}
