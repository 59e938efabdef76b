//! # Studydesk Core Library
//!
//! This library provides the core business logic for the Studydesk study
//! planner. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any GUI being a thin layer
//! over the same core library.
//!
//! ## Architecture
//!
//! - **Planner**: an explicit application-state struct; every operation takes
//!   the state by reference and mutates it, nothing reads ambient globals
//! - **Pomodoro Timer**: a tick-driven state machine plus a cancellable
//!   one-second countdown runner built on tokio
//! - **Streak Tracker**: day-over-day continuity from calendar-day gaps
//! - **Timetable**: deterministic slot layout from a subject list and a
//!   daily study-hour budget
//! - **Assistant**: ordered keyword rules with first-match-wins semantics,
//!   substitutable for a network-backed responder
//! - **Storage**: SQLite-backed state slot and session log, TOML config
//!
//! ## Key Components
//!
//! - [`Planner`]: Application state and operations
//! - [`PomodoroTimer`] / [`Countdown`]: Timer state machine and runner
//! - [`StreakTracker`]: Streak/completion state machine
//! - [`Database`] / [`Config`]: Persistence and configuration

pub mod assistant;
pub mod clock;
pub mod error;
pub mod events;
pub mod planner;
pub mod stats;
pub mod storage;
pub mod streak;
pub mod subject;
pub mod task;
pub mod timer;
pub mod timetable;

pub use assistant::{Responder, RemoteAssistant, RuleResponder};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{AssistantError, ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use events::Event;
pub use planner::{AssistantMessage, AssistantRole, Document, DocumentKind, Note, Notifications, Planner};
pub use stats::{CategoryCount, Overview};
pub use storage::{Config, Database};
pub use streak::{StreakChange, StreakTracker};
pub use subject::{Priority, Subject, SubjectId};
pub use task::{Task, TaskCategory, TaskId};
pub use timer::{Countdown, Phase, PhaseEnd, PomodoroTimer};
pub use timetable::TimetableSlot;
