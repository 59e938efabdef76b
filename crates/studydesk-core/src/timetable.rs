//! Timetable generation.
//!
//! Turns an ordered subject list and a daily study-hour budget into
//! back-to-back time slots starting at a fixed anchor hour. Slots are
//! ephemeral: every generation request lays the day out from scratch, and
//! the `completed` flag is derived from the current completion set rather
//! than stored, so a regenerated timetable always reflects reality.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::subject::{Subject, SubjectId};

/// Hour of day the first slot starts at.
pub const START_HOUR: u32 = 9;

/// Floor for a single slot, in minutes.
pub const MIN_SLOT_MINUTES: f64 = 30.0;

/// A contiguous block of time assigned to one subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableSlot {
    pub id: String,
    pub subject_id: SubjectId,
    pub subject: String,
    /// Clock-display string, e.g. `9:00 AM`.
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: u32,
    pub completed: bool,
}

/// Lay out one slot per subject, in list order, anchored at [`START_HOUR`].
///
/// Each slot is `max(30, study_hours * 60 / n)` minutes. Fails when
/// `subjects` is empty.
pub fn generate(
    subjects: &[Subject],
    study_hours: f64,
    completed: &HashSet<SubjectId>,
) -> Result<Vec<TimetableSlot>> {
    generate_at(subjects, study_hours, completed, START_HOUR)
}

/// [`generate`] with an explicit anchor hour.
pub fn generate_at(
    subjects: &[Subject],
    study_hours: f64,
    completed: &HashSet<SubjectId>,
    start_hour: u32,
) -> Result<Vec<TimetableSlot>> {
    if subjects.is_empty() {
        return Err(ValidationError::EmptyCollection("subjects".into()).into());
    }

    let slot_minutes = (study_hours * 60.0 / subjects.len() as f64).max(MIN_SLOT_MINUTES);

    let slots = subjects
        .iter()
        .enumerate()
        .map(|(index, subject)| {
            let start = start_hour as f64 + index as f64 * slot_minutes / 60.0;
            let end = start + slot_minutes / 60.0;
            TimetableSlot {
                id: uuid::Uuid::new_v4().to_string(),
                subject_id: subject.id,
                subject: subject.name.clone(),
                start_time: format_clock(start),
                end_time: format_clock(end),
                duration_minutes: slot_minutes.round() as u32,
                completed: completed.contains(&subject.id),
            }
        })
        .collect();

    Ok(slots)
}

/// Render a fractional hour as a 12-hour clock string with AM/PM.
///
/// Hours at exactly 12 display as `12`; above 12 subtract 12. A minute part
/// that rounds to 60 carries into the next hour.
pub fn format_clock(hour: f64) -> String {
    let mut h = hour.floor() as u32;
    let mut m = ((hour - hour.floor()) * 60.0).round() as u32;
    if m == 60 {
        h += 1;
        m = 0;
    }
    let period = if h >= 12 { "PM" } else { "AM" };
    let display = if h > 12 { h - 12 } else { h };
    format!("{display}:{m:02} {period}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::Priority;
    use proptest::prelude::*;

    fn subjects(names: &[&str]) -> Vec<Subject> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Subject::new(i as i64 + 1, *n, Priority::Medium))
            .collect()
    }

    #[test]
    fn two_subjects_four_hours() {
        let subjects = subjects(&["Math", "Physics"]);
        let slots = generate(&subjects, 4.0, &HashSet::new()).unwrap();

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].duration_minutes, 120);
        assert_eq!(slots[0].start_time, "9:00 AM");
        assert_eq!(slots[0].end_time, "11:00 AM");
        assert_eq!(slots[1].start_time, "11:00 AM");
        assert_eq!(slots[1].end_time, "1:00 PM");
    }

    #[test]
    fn empty_subject_list_is_an_error() {
        let err = generate(&[], 4.0, &HashSet::new()).unwrap_err();
        assert!(err.to_string().contains("subjects"));
    }

    #[test]
    fn slots_never_drop_below_thirty_minutes() {
        let subjects = subjects(&["A", "B", "C", "D", "E", "F"]);
        let slots = generate(&subjects, 1.0, &HashSet::new()).unwrap();
        assert!(slots.iter().all(|s| s.duration_minutes == 30));
    }

    #[test]
    fn completed_flag_comes_from_the_completion_set() {
        let subjects = subjects(&["Math", "Physics"]);
        let done: HashSet<_> = [subjects[1].id].into_iter().collect();
        let slots = generate(&subjects, 2.0, &done).unwrap();
        assert!(!slots[0].completed);
        assert!(slots[1].completed);
    }

    #[test]
    fn slots_preserve_subject_order() {
        let subjects = subjects(&["Chemistry", "Biology", "History"]);
        let slots = generate(&subjects, 3.0, &HashSet::new()).unwrap();
        let names: Vec<_> = slots.iter().map(|s| s.subject.as_str()).collect();
        assert_eq!(names, ["Chemistry", "Biology", "History"]);
    }

    #[test]
    fn explicit_anchor_moves_the_first_slot() {
        let subjects = subjects(&["Math"]);
        let slots = generate_at(&subjects, 1.0, &HashSet::new(), 14).unwrap();
        assert_eq!(slots[0].start_time, "2:00 PM");
        assert_eq!(slots[0].end_time, "3:00 PM");
    }

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(9.0), "9:00 AM");
        assert_eq!(format_clock(9.5), "9:30 AM");
        assert_eq!(format_clock(11.75), "11:45 AM");
        assert_eq!(format_clock(12.0), "12:00 PM");
        assert_eq!(format_clock(13.25), "1:15 PM");
        // A minute part that rounds up to 60 carries over.
        assert_eq!(format_clock(9.9999), "10:00 AM");
    }

    proptest! {
        #[test]
        fn durations_sum_to_the_budget_within_rounding(
            count in 1usize..10,
            hours in 1u32..=12,
        ) {
            let names: Vec<String> = (0..count).map(|i| format!("S{i}")).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let subjects = subjects(&refs);

            let slots = generate(&subjects, hours as f64, &HashSet::new()).unwrap();
            let total: u32 = slots.iter().map(|s| s.duration_minutes).sum();

            let raw = (hours as f64 * 60.0 / count as f64).max(MIN_SLOT_MINUTES);
            let expected = raw * count as f64;
            prop_assert!((total as f64 - expected).abs() <= count as f64);
            prop_assert!(slots.iter().all(|s| s.duration_minutes >= 30));
        }
    }
}
