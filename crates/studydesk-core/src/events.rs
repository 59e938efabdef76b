use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::subject::SubjectId;
use crate::timer::Phase;

/// Every observable state change produces an Event.
/// The CLI prints them; a GUI would poll or subscribe to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// A work or break phase counted down to zero. The machine idles in the
    /// next phase; it never auto-continues.
    PhaseCompleted {
        finished: Phase,
        completed_cycles: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// A subject was marked done for the current study day.
    CompletionRecorded {
        subject_id: SubjectId,
        subject: String,
        streak: u32,
        at: DateTime<Utc>,
    },
}
