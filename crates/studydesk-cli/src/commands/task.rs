use clap::Subcommand;
use studydesk_core::{Clock, Database, SystemClock, TaskCategory};

use crate::common::{load_state, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        text: String,
        /// Study, Reading, Notes, Revision, Assignment or "Test Prep"
        #[arg(long, default_value = "Study")]
        category: String,
    },
    /// List tasks
    List {
        #[arg(long)]
        json: bool,
        /// Only show unfinished tasks
        #[arg(long)]
        pending: bool,
    },
    /// Flip a task's completion flag
    Toggle { id: i64 },
    /// Remove a task
    Remove { id: i64 },
}

pub fn run(action: TaskAction) -> CliResult {
    let db = Database::open()?;
    let mut planner = load_state(&db)?;

    match action {
        TaskAction::Add { text, category } => {
            let category = TaskCategory::parse(&category)
                .ok_or_else(|| format!("unknown category '{category}'"))?;
            match planner.add_task(&text, category, SystemClock.now()) {
                Some(id) => println!("Task added: {} ({id})", text.trim()),
                None => println!("Nothing added: task text is empty"),
            }
        }
        TaskAction::List { json, pending } => {
            let tasks: Vec<_> = planner
                .tasks
                .iter()
                .filter(|t| !pending || !t.completed)
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks.");
            } else {
                for task in tasks {
                    let mark = if task.completed { "x" } else { " " };
                    println!("[{mark}] {:<13} {:<40} {}", task.category.label(), task.text, task.id);
                }
            }
        }
        TaskAction::Toggle { id } => match planner.toggle_task(id) {
            Some(true) => println!("Task completed: {id}"),
            Some(false) => println!("Task reopened: {id}"),
            None => println!("No change: unknown task {id}"),
        },
        TaskAction::Remove { id } => {
            if planner.remove_task(id) {
                println!("Task removed: {id}");
            } else {
                println!("No change: unknown task {id}");
            }
        }
    }

    db.save_planner(&planner)?;
    Ok(())
}
