use studydesk_core::{Clock, Database, RemoteAssistant, Responder, RuleResponder, SystemClock};

use crate::common::{load_state, CliResult};

pub fn run(question: Vec<String>, remote: Option<String>, history: bool, clear: bool) -> CliResult {
    let db = Database::open()?;
    let mut planner = load_state(&db)?;

    if clear {
        planner.clear_assistant_history();
        db.save_planner(&planner)?;
        println!("Assistant history cleared");
        return Ok(());
    }

    if history {
        if planner.ai_messages.is_empty() {
            println!("No conversation yet.");
        } else {
            for message in &planner.ai_messages {
                println!("[{:?}] {}", message.role, message.text);
            }
        }
        return Ok(());
    }

    let question = question.join(" ");
    let answer = match remote {
        Some(url) => {
            let assistant = RemoteAssistant::new(&url)?;
            planner.ask(&question, &assistant, SystemClock.now())?
        }
        None => planner.ask(&question, &RuleResponder, SystemClock.now())?,
    };

    match answer {
        Some(text) => {
            db.save_planner(&planner)?;
            println!("{text}");
        }
        None => println!("Nothing asked: question is empty"),
    }
    Ok(())
}
