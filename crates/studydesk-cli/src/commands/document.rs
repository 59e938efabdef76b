use clap::Subcommand;
use studydesk_core::{Clock, Database, DocumentKind, SystemClock};

use crate::common::{load_state, CliResult};

#[derive(Subcommand)]
pub enum DocumentAction {
    /// Track a study document
    Add {
        name: String,
        /// Subject the document belongs to
        subject: String,
        /// PDF, Word, PowerPoint, Excel, Image, Video or Other
        #[arg(long, default_value = "PDF")]
        kind: String,
        /// Optional link
        #[arg(long, default_value = "")]
        url: String,
    },
    /// List documents, grouped by subject
    List {
        #[arg(long)]
        json: bool,
    },
    /// Remove a document
    Remove { id: i64 },
}

pub fn run(action: DocumentAction) -> CliResult {
    let db = Database::open()?;
    let mut planner = load_state(&db)?;

    match action {
        DocumentAction::Add {
            name,
            subject,
            kind,
            url,
        } => {
            let kind = DocumentKind::parse(&kind)
                .ok_or_else(|| format!("unknown document kind '{kind}'"))?;
            match planner.add_document(&name, &subject, kind, &url, SystemClock.now()) {
                Some(id) => println!("Document added: {} ({id})", name.trim()),
                None => println!("Nothing added: a document needs a name and a subject"),
            }
        }
        DocumentAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&planner.documents)?);
            } else if planner.documents.is_empty() {
                println!("No documents.");
            } else {
                let mut subjects: Vec<&str> = planner
                    .documents
                    .iter()
                    .map(|d| d.subject.as_str())
                    .collect();
                subjects.sort_unstable();
                subjects.dedup();
                for subject in subjects {
                    println!("{subject}:");
                    for doc in planner.documents.iter().filter(|d| d.subject == subject) {
                        let link = if doc.url.is_empty() {
                            String::new()
                        } else {
                            format!("  {}", doc.url)
                        };
                        println!("  {:<11} {} ({}){link}", doc.kind.label(), doc.name, doc.id);
                    }
                }
            }
        }
        DocumentAction::Remove { id } => {
            if planner.remove_document(id) {
                println!("Document removed: {id}");
            } else {
                println!("No change: unknown document {id}");
            }
        }
    }

    db.save_planner(&planner)?;
    Ok(())
}
