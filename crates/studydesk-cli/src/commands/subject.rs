use clap::Subcommand;
use studydesk_core::{Clock, Database, Priority, SystemClock};

use crate::common::{load_state, CliResult};

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Add a subject
    Add {
        name: String,
        /// High, Medium or Low
        #[arg(long, default_value = "Medium")]
        priority: String,
    },
    /// List subjects
    List {
        #[arg(long)]
        json: bool,
    },
    /// Mark a subject done for today
    Complete { name: String },
    /// Change a subject's priority
    Priority { name: String, priority: String },
    /// Remove a subject
    Remove { name: String },
}

fn parse_priority(s: &str) -> Result<Priority, Box<dyn std::error::Error>> {
    Priority::parse(s).ok_or_else(|| format!("unknown priority '{s}' (High, Medium, Low)").into())
}

pub fn run(action: SubjectAction) -> CliResult {
    let db = Database::open()?;
    let mut planner = load_state(&db)?;

    match action {
        SubjectAction::Add { name, priority } => {
            let priority = parse_priority(&priority)?;
            match planner.add_subject(&name, priority, SystemClock.now()) {
                Some(id) => println!("Subject added: {} ({id})", name.trim()),
                None => println!("Nothing added: subject name is empty"),
            }
        }
        SubjectAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&planner.subjects)?);
            } else if planner.subjects.is_empty() {
                println!("No subjects yet.");
            } else {
                for subject in &planner.subjects {
                    let done = if planner.streak.is_completed(subject.id) {
                        "  [done today]"
                    } else {
                        ""
                    };
                    println!(
                        "{:<24} {:>6?}  {:>3}%{done}",
                        subject.name, subject.priority, subject.progress
                    );
                }
            }
        }
        SubjectAction::Complete { name } => {
            match planner.mark_complete_by_name(&name, SystemClock.now()) {
                Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
                None => println!("No change: unknown subject or already completed today"),
            }
        }
        SubjectAction::Priority { name, priority } => {
            let priority = parse_priority(&priority)?;
            match planner.subject_by_name(&name).map(|s| s.id) {
                Some(id) => {
                    planner.set_priority(id, priority);
                    println!("Priority updated: {name}");
                }
                None => println!("No change: unknown subject '{name}'"),
            }
        }
        SubjectAction::Remove { name } => match planner.subject_by_name(&name).map(|s| s.id) {
            Some(id) => {
                planner.remove_subject(id);
                println!("Subject removed: {name}");
            }
            None => println!("No change: unknown subject '{name}'"),
        },
    }

    db.save_planner(&planner)?;
    Ok(())
}
