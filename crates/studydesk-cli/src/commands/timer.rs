use chrono::{DateTime, Utc};
use clap::Subcommand;
use serde::Serialize;
use studydesk_core::{Config, Countdown, Database, Event, Phase, Planner};

use crate::common::{load_state, CliResult};

/// Wall-clock anchor of the running countdown; lets a later invocation
/// replay the seconds that passed while no process was alive.
const ANCHOR_KEY: &str = "timer_anchor";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the countdown in the current phase
    Start,
    /// Print the current timer state as JSON (catches up elapsed time)
    Status,
    /// Force Work-Idle with a full countdown; cycle counters survive
    Reset,
    /// Configure durations (applied to the countdown on its next reset)
    Set {
        /// Work minutes (1-60)
        #[arg(long)]
        work: Option<u32>,
        /// Break minutes (1-30)
        #[arg(long = "break")]
        break_minutes: Option<u32>,
    },
    /// Run the countdown in the foreground until the phase ends
    Run,
}

#[derive(Serialize)]
struct TimerStatus {
    display: String,
    phase: Phase,
    remaining_seconds: u32,
    is_running: bool,
    work_minutes: u32,
    break_minutes: u32,
    completed_cycles: u32,
    study_seconds_today: u64,
}

fn status_of(planner: &Planner) -> TimerStatus {
    let timer = &planner.pomodoro;
    TimerStatus {
        display: timer.display(),
        phase: timer.phase(),
        remaining_seconds: timer.remaining_seconds(),
        is_running: timer.is_running(),
        work_minutes: timer.work_minutes(),
        break_minutes: timer.break_minutes(),
        completed_cycles: timer.completed_cycles(),
        study_seconds_today: timer.accumulated_study_seconds(),
    }
}

fn phase_minutes(planner: &Planner, phase: Phase) -> u64 {
    match phase {
        Phase::Work => planner.pomodoro.work_minutes() as u64,
        Phase::Break => planner.pomodoro.break_minutes() as u64,
    }
}

/// Replay wall-clock seconds that passed since the stored anchor, recording
/// a session if a phase completed while no process was alive.
fn catch_up(db: &Database, planner: &mut Planner) -> Result<(), Box<dyn std::error::Error>> {
    if !planner.pomodoro.is_running() {
        return Ok(());
    }
    let now = Utc::now();
    let anchor = match db.kv_get(ANCHOR_KEY)? {
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or(now),
        None => now,
    };

    let elapsed = (now - anchor).num_seconds().max(0) as u64;
    if let Some(end) = planner.pomodoro.advance_by(elapsed) {
        db.record_session(end.finished, phase_minutes(planner, end.finished), anchor, now)?;
    }

    if planner.pomodoro.is_running() {
        db.kv_set(ANCHOR_KEY, &now.to_rfc3339())?;
    } else {
        db.kv_delete(ANCHOR_KEY)?;
    }
    Ok(())
}

pub fn run(action: TimerAction) -> CliResult {
    let db = Database::open()?;
    let mut planner = load_state(&db)?;
    catch_up(&db, &mut planner)?;

    match action {
        TimerAction::Start => {
            if planner.pomodoro.start() {
                db.kv_set(ANCHOR_KEY, &Utc::now().to_rfc3339())?;
                println!(
                    "Timer started: {} ({:?})",
                    planner.pomodoro.display(),
                    planner.pomodoro.phase()
                );
            } else {
                println!("Timer already running");
            }
        }
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&status_of(&planner))?);
        }
        TimerAction::Reset => {
            let config = Config::load_or_default();
            planner.pomodoro.set_work_minutes(config.timer.work_minutes);
            planner.pomodoro.set_break_minutes(config.timer.break_minutes);
            planner.pomodoro.reset();
            db.kv_delete(ANCHOR_KEY)?;
            println!("{{\"type\": \"timer_reset\"}}");
        }
        TimerAction::Set {
            work,
            break_minutes,
        } => {
            let mut config = Config::load_or_default();
            if let Some(minutes) = work {
                config.set("timer.work_minutes", &minutes.to_string())?;
                planner.pomodoro.set_work_minutes(minutes);
            }
            if let Some(minutes) = break_minutes {
                config.set("timer.break_minutes", &minutes.to_string())?;
                planner.pomodoro.set_break_minutes(minutes);
            }
            config.save()?;
            println!(
                "Durations updated: {} min work / {} min break",
                config.timer.work_minutes, config.timer.break_minutes
            );
        }
        TimerAction::Run => {
            let runtime = tokio::runtime::Runtime::new()?;
            let started = Utc::now();
            let timer = planner.pomodoro.clone();

            let (final_timer, finished) = runtime.block_on(async move {
                let (countdown, mut events) = Countdown::new(timer);
                countdown.start().await;
                let mut finished = None;
                loop {
                    tokio::select! {
                        maybe_event = events.recv() => {
                            match maybe_event {
                                Some(event) => {
                                    if let Ok(line) = serde_json::to_string(&event) {
                                        println!("{line}");
                                    }
                                    if let Event::PhaseCompleted { finished: phase, .. } = event {
                                        finished = Some(phase);
                                        break;
                                    }
                                }
                                None => break,
                            }
                        }
                        _ = tokio::signal::ctrl_c() => break,
                    }
                }
                (countdown.snapshot().await, finished)
            });

            planner.pomodoro = final_timer;
            if let Some(phase) = finished {
                db.record_session(phase, phase_minutes(&planner, phase), started, Utc::now())?;
                db.kv_delete(ANCHOR_KEY)?;
            } else if planner.pomodoro.is_running() {
                // Interrupted mid-phase; the anchor lets `status` catch up.
                db.kv_set(ANCHOR_KEY, &Utc::now().to_rfc3339())?;
            }
        }
    }

    db.save_planner(&planner)?;
    Ok(())
}
