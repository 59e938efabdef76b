use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "studydesk-cli", version, about = "Studydesk CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Subject management
    Subject {
        #[command(subcommand)]
        action: commands::subject::SubjectAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Note management
    Note {
        #[command(subcommand)]
        action: commands::note::NoteAction,
    },
    /// Document management
    Document {
        #[command(subcommand)]
        action: commands::document::DocumentAction,
    },
    /// Timetable generation
    Timetable {
        #[command(subcommand)]
        action: commands::timetable::TimetableAction,
    },
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Ask the study assistant
    Ask {
        /// The question to ask
        question: Vec<String>,
        /// Route the question to a network-backed assistant endpoint
        #[arg(long)]
        remote: Option<String>,
        /// Print the stored conversation instead of asking
        #[arg(long)]
        history: bool,
        /// Clear the stored conversation
        #[arg(long)]
        clear: bool,
    },
    /// Progress statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Backup and restore
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Subject { action } => commands::subject::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Note { action } => commands::note::run(action),
        Commands::Document { action } => commands::document::run(action),
        Commands::Timetable { action } => commands::timetable::run(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Ask {
            question,
            remote,
            history,
            clear,
        } => commands::ask::run(question, remote, history, clear),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Data { action } => commands::data::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
