//! Study-streak continuity.
//!
//! A streak counts consecutive calendar days with at least one subject
//! completion. The tracker holds the streak count, the last study date and
//! the set of subjects completed on the current study day, and is evaluated
//! against "today" whenever state is loaded or the day may have rolled over.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::subject::SubjectId;

/// Outcome of a continuity evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// Same study day; nothing moved.
    Unchanged,
    /// A new day began with yesterday's streak intact; the completion set
    /// was cleared for the new day.
    NewDay,
    /// More than one full day was skipped; the streak reset to zero and the
    /// completion set was cleared.
    Broken,
}

/// Streak state machine.
///
/// Invariant: `count` is zero whenever `last_study_date` is `None` (the date
/// is only ever set by a completion, which also counts the day).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct StreakTracker {
    #[serde(rename = "streak")]
    pub count: u32,
    pub last_study_date: Option<NaiveDate>,
    pub completed_today: HashSet<SubjectId>,
}

impl StreakTracker {
    /// Re-evaluate continuity against `today`.
    ///
    /// No mutation when the last study date is `today` (idempotent within a
    /// day). A one-day gap starts a fresh completion set but keeps the
    /// streak: yesterday's qualifying activity already counted. A gap of
    /// more than one day breaks continuity.
    pub fn evaluate(&mut self, today: NaiveDate) -> StreakChange {
        let Some(last) = self.last_study_date else {
            return StreakChange::Unchanged;
        };

        match (today - last).num_days().abs() {
            0 => StreakChange::Unchanged,
            1 => {
                self.completed_today.clear();
                StreakChange::NewDay
            }
            _ => {
                self.count = 0;
                self.completed_today.clear();
                StreakChange::Broken
            }
        }
    }

    /// Record a subject completion for `today`.
    ///
    /// Returns `false` (and changes nothing) when the subject is already in
    /// today's completion set. The streak increments at most once per
    /// calendar day, on the first completion of that day.
    pub fn record_completion(&mut self, subject: SubjectId, today: NaiveDate) -> bool {
        if !self.completed_today.insert(subject) {
            return false;
        }
        if self.last_study_date != Some(today) {
            self.count += 1;
            self.last_study_date = Some(today);
        }
        true
    }

    pub fn is_completed(&self, subject: SubjectId) -> bool {
        self.completed_today.contains(&subject)
    }

    pub fn completed_count(&self) -> usize {
        self.completed_today.len()
    }
}
