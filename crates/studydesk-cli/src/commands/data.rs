use std::path::PathBuf;

use clap::Subcommand;
use studydesk_core::storage::{export_planner, import_planner};
use studydesk_core::Database;

use crate::common::{load_state, CliResult};

#[derive(Subcommand)]
pub enum DataAction {
    /// Export the full state document to a JSON file
    Export { path: PathBuf },
    /// Import a state document, replacing the stored state
    Import { path: PathBuf },
    /// Clear all stored data
    Clear {
        /// Confirm: this cannot be undone
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: DataAction) -> CliResult {
    let db = Database::open()?;

    match action {
        DataAction::Export { path } => {
            let planner = load_state(&db)?;
            export_planner(&planner, &path)?;
            println!("Exported to {}", path.display());
        }
        DataAction::Import { path } => {
            // Parse and validate before anything is replaced; a bad payload
            // errors out here and the stored state stays as it was.
            let planner = import_planner(&path)?;
            db.save_planner(&planner)?;
            println!(
                "Imported {} subjects, {} tasks, {} notes",
                planner.subjects.len(),
                planner.tasks.len(),
                planner.notes.len()
            );
        }
        DataAction::Clear { yes } => {
            if !yes {
                println!("Refusing to clear without --yes");
                return Ok(());
            }
            db.clear_planner()?;
            println!("All data cleared");
        }
    }
    Ok(())
}
