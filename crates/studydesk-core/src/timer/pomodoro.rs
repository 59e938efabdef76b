//! Pomodoro timer state machine.
//!
//! The machine is tick-driven: the caller delivers one `tick()` per elapsed
//! second while the countdown is running (the [`Countdown`] runner does this
//! on a 1-second interval; the CLI catches up from wall-clock deltas via
//! [`PomodoroTimer::advance_by`]).
//!
//! ## State Transitions
//!
//! ```text
//! Work-Idle -> Work-Running -> Break-Idle -> Break-Running -> Work-Idle
//! ```
//!
//! A finished phase always lands in the Idle sub-state of the next phase;
//! the countdown never auto-continues across a phase boundary.
//!
//! [`Countdown`]: super::Countdown

use serde::{Deserialize, Serialize};

/// Work or Break, the two alternating phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

/// Emitted by [`PomodoroTimer::tick`] when a countdown reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseEnd {
    /// The phase that just finished.
    pub finished: Phase,
    /// Cycle count after the transition (one cycle = one completed Work phase).
    pub completed_cycles: u32,
}

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const MAX_WORK_MINUTES: u32 = 60;
pub const MAX_BREAK_MINUTES: u32 = 30;

/// The work/break countdown.
///
/// One instance per application session; serialized into the planner
/// document (field names match the persisted camelCase shape, so counters
/// from an original backup restore directly).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PomodoroTimer {
    remaining_seconds: u32,
    #[serde(rename = "isBreak", with = "phase_as_bool")]
    phase: Phase,
    #[serde(rename = "isRunning")]
    running: bool,
    work_minutes: u32,
    break_minutes: u32,
    #[serde(rename = "pomodoroCount")]
    completed_cycles: u32,
    #[serde(rename = "studyTimeToday")]
    accumulated_study_seconds: u64,
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new(DEFAULT_WORK_MINUTES, DEFAULT_BREAK_MINUTES)
    }
}

impl PomodoroTimer {
    /// Create an idle timer in the Work phase. Durations are clamped to
    /// `1..=60` work / `1..=30` break minutes.
    pub fn new(work_minutes: u32, break_minutes: u32) -> Self {
        let work_minutes = work_minutes.clamp(1, MAX_WORK_MINUTES);
        let break_minutes = break_minutes.clamp(1, MAX_BREAK_MINUTES);
        Self {
            remaining_seconds: work_minutes * 60,
            phase: Phase::Work,
            running: false,
            work_minutes,
            break_minutes,
            completed_cycles: 0,
            accumulated_study_seconds: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn work_minutes(&self) -> u32 {
        self.work_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    /// Seconds spent in Work-phase countdowns, across the whole day.
    pub fn accumulated_study_seconds(&self) -> u64 {
        self.accumulated_study_seconds
    }

    /// Full duration of the current phase in seconds.
    pub fn phase_duration_seconds(&self) -> u32 {
        match self.phase {
            Phase::Work => self.work_minutes * 60,
            Phase::Break => self.break_minutes * 60,
        }
    }

    /// Render the remaining time as zero-padded `MM:SS`.
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Idle -> Running in the current phase. No-op if already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Deliver one elapsed second.
    ///
    /// Ignored while idle. When the countdown reaches zero the machine
    /// switches phase, reloads the new phase's duration and stops; a
    /// finished Work phase also bumps the cycle counter.
    pub fn tick(&mut self) -> Option<PhaseEnd> {
        if !self.running {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.phase == Phase::Work {
            self.accumulated_study_seconds += 1;
        }
        if self.remaining_seconds > 0 {
            return None;
        }

        let finished = self.phase;
        match finished {
            Phase::Work => {
                self.completed_cycles += 1;
                self.phase = Phase::Break;
                self.remaining_seconds = self.break_minutes * 60;
            }
            Phase::Break => {
                self.phase = Phase::Work;
                self.remaining_seconds = self.work_minutes * 60;
            }
        }
        self.running = false;
        Some(PhaseEnd {
            finished,
            completed_cycles: self.completed_cycles,
        })
    }

    /// Deliver up to `seconds` elapsed seconds, stopping at a phase
    /// boundary (the machine idles there, so later seconds don't count).
    pub fn advance_by(&mut self, seconds: u64) -> Option<PhaseEnd> {
        for _ in 0..seconds {
            if let Some(end) = self.tick() {
                return Some(end);
            }
            if !self.running {
                break;
            }
        }
        None
    }

    /// Force Work-Idle with a full work countdown. Cycle and study-time
    /// counters survive.
    pub fn reset(&mut self) {
        self.running = false;
        self.phase = Phase::Work;
        self.remaining_seconds = self.work_minutes * 60;
    }

    /// Configure the work duration. Takes effect on the next phase reset,
    /// not retroactively on a running countdown.
    pub fn set_work_minutes(&mut self, minutes: u32) {
        self.work_minutes = minutes.clamp(1, MAX_WORK_MINUTES);
    }

    /// Configure the break duration. Takes effect on the next phase reset.
    pub fn set_break_minutes(&mut self, minutes: u32) {
        self.break_minutes = minutes.clamp(1, MAX_BREAK_MINUTES);
    }

    /// Repair a deserialized timer into a valid idle-capable state: clamp
    /// durations, and rebuild a zero or oversized countdown from the phase
    /// duration (a valid machine never rests at zero).
    pub fn normalize(&mut self) {
        self.work_minutes = self.work_minutes.clamp(1, MAX_WORK_MINUTES);
        self.break_minutes = self.break_minutes.clamp(1, MAX_BREAK_MINUTES);
        let full = self.phase_duration_seconds();
        if self.remaining_seconds == 0 || self.remaining_seconds > full {
            self.remaining_seconds = full;
        }
    }
}

mod phase_as_bool {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Phase;

    pub fn serialize<S: Serializer>(phase: &Phase, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(*phase == Phase::Break)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Phase, D::Error> {
        let is_break = bool::deserialize(deserializer)?;
        Ok(if is_break { Phase::Break } else { Phase::Work })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fresh_timer_is_work_idle_with_full_countdown() {
        let timer = PomodoroTimer::default();
        assert_eq!(timer.phase(), Phase::Work);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_seconds(), 25 * 60);
    }

    #[test]
    fn tick_is_ignored_while_idle() {
        let mut timer = PomodoroTimer::default();
        assert!(timer.tick().is_none());
        assert_eq!(timer.remaining_seconds(), 25 * 60);
        assert_eq!(timer.accumulated_study_seconds(), 0);
    }

    #[test]
    fn start_twice_is_a_no_op() {
        let mut timer = PomodoroTimer::default();
        assert!(timer.start());
        assert!(!timer.start());
    }

    #[test]
    fn full_work_phase_lands_in_break_idle() {
        let mut timer = PomodoroTimer::new(1, 5);
        timer.start();

        for _ in 0..59 {
            assert!(timer.tick().is_none());
        }
        let end = timer.tick().expect("60th tick ends the phase");

        assert_eq!(end.finished, Phase::Work);
        assert_eq!(end.completed_cycles, 1);
        assert_eq!(timer.phase(), Phase::Break);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_seconds(), 5 * 60);
        assert_eq!(timer.accumulated_study_seconds(), 60);
    }

    #[test]
    fn break_ticks_do_not_accumulate_study_time() {
        let mut timer = PomodoroTimer::new(1, 1);
        timer.start();
        timer.advance_by(60);
        assert_eq!(timer.phase(), Phase::Break);

        timer.start();
        timer.advance_by(60);
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.completed_cycles(), 1);
        assert_eq!(timer.accumulated_study_seconds(), 60);
    }

    #[test]
    fn reset_restores_work_idle_and_keeps_counters() {
        let mut timer = PomodoroTimer::new(25, 5);
        timer.start();
        timer.advance_by(100);
        assert_eq!(timer.remaining_seconds(), 1500 - 100);

        timer.reset();
        assert_eq!(timer.remaining_seconds(), 1500);
        assert!(!timer.is_running());
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.completed_cycles(), 0);
        assert_eq!(timer.accumulated_study_seconds(), 100);
    }

    #[test]
    fn duration_change_applies_on_next_reset_only() {
        let mut timer = PomodoroTimer::new(25, 5);
        timer.start();
        timer.advance_by(10);

        timer.set_work_minutes(10);
        assert_eq!(timer.remaining_seconds(), 1500 - 10);

        timer.reset();
        assert_eq!(timer.remaining_seconds(), 600);
    }

    #[test]
    fn advance_by_stops_at_the_phase_boundary() {
        let mut timer = PomodoroTimer::new(1, 5);
        timer.start();
        let end = timer.advance_by(10_000).expect("phase ends");
        assert_eq!(end.finished, Phase::Work);
        // Seconds past the boundary were not delivered.
        assert_eq!(timer.accumulated_study_seconds(), 60);
        assert_eq!(timer.remaining_seconds(), 5 * 60);
    }

    #[test]
    fn durations_are_clamped() {
        let timer = PomodoroTimer::new(0, 500);
        assert_eq!(timer.work_minutes(), 1);
        assert_eq!(timer.break_minutes(), 30);
    }

    #[test]
    fn display_is_zero_padded() {
        let mut timer = PomodoroTimer::new(25, 5);
        assert_eq!(timer.display(), "25:00");
        timer.start();
        timer.advance_by(61);
        assert_eq!(timer.display(), "23:59");
    }

    #[test]
    fn document_shape_uses_persisted_keys() {
        let timer = PomodoroTimer::default();
        let json = serde_json::to_value(&timer).unwrap();
        assert_eq!(json["remainingSeconds"], 1500);
        assert_eq!(json["isBreak"], false);
        assert_eq!(json["isRunning"], false);
        assert_eq!(json["pomodoroCount"], 0);
        assert_eq!(json["studyTimeToday"], 0);
    }

    #[test]
    fn counters_restore_from_a_sparse_document() {
        let timer: PomodoroTimer =
            serde_json::from_str(r#"{"pomodoroCount": 3, "studyTimeToday": 4200}"#).unwrap();
        assert_eq!(timer.completed_cycles(), 3);
        assert_eq!(timer.accumulated_study_seconds(), 4200);
        assert_eq!(timer.remaining_seconds(), 1500);
    }

    #[test]
    fn normalize_rebuilds_an_invalid_countdown() {
        let mut timer: PomodoroTimer =
            serde_json::from_str(r#"{"remainingSeconds": 0, "workMinutes": 90}"#).unwrap();
        timer.normalize();
        assert_eq!(timer.work_minutes(), 60);
        assert_eq!(timer.remaining_seconds(), 60 * 60);
    }

    proptest! {
        #[test]
        fn remaining_stays_within_phase_bounds(
            work in 1u32..=60,
            brk in 1u32..=30,
            ops in proptest::collection::vec(0u8..3, 0..200),
        ) {
            let mut timer = PomodoroTimer::new(work, brk);
            let bound = work.max(brk) * 60;
            for op in ops {
                match op {
                    0 => { timer.start(); }
                    1 => { timer.tick(); }
                    _ => { timer.reset(); }
                }
                prop_assert!(timer.remaining_seconds() <= bound);
                prop_assert!(timer.remaining_seconds() >= 1 || timer.is_running());
            }
        }
    }
}
