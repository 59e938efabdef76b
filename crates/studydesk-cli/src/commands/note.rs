use clap::Subcommand;
use studydesk_core::{Clock, Database, SystemClock};

use crate::common::{load_state, CliResult};

#[derive(Subcommand)]
pub enum NoteAction {
    /// Add a note
    Add { title: String, content: String },
    /// List notes
    List {
        #[arg(long)]
        json: bool,
    },
    /// Remove a note
    Remove { id: i64 },
}

pub fn run(action: NoteAction) -> CliResult {
    let db = Database::open()?;
    let mut planner = load_state(&db)?;

    match action {
        NoteAction::Add { title, content } => {
            match planner.add_note(&title, &content, SystemClock.now()) {
                Some(id) => println!("Note added: {} ({id})", title.trim()),
                None => println!("Nothing added: a note needs both a title and content"),
            }
        }
        NoteAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&planner.notes)?);
            } else if planner.notes.is_empty() {
                println!("No notes.");
            } else {
                for note in &planner.notes {
                    println!("{} ({})\n  {}", note.title, note.id, note.content);
                }
            }
        }
        NoteAction::Remove { id } => {
            if planner.remove_note(id) {
                println!("Note removed: {id}");
            } else {
                println!("No change: unknown note {id}");
            }
        }
    }

    db.save_planner(&planner)?;
    Ok(())
}
