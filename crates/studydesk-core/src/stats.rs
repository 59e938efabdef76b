//! Aggregate progress reads.
//!
//! Per-subject progress lives on the subjects themselves and moves only
//! through completion events; this module derives the dashboard numbers
//! from a [`Planner`] snapshot.

use serde::Serialize;

use crate::planner::Planner;
use crate::task::TaskCategory;

/// Task tally for one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: TaskCategory,
    pub count: usize,
}

/// Dashboard aggregates computed from the current state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_subjects: usize,
    /// Integer rounding of the mean subject progress; 0 with no subjects.
    pub average_progress: u8,
    /// Size of today's completion set.
    pub completed_today: usize,
    pub streak_days: u32,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    /// `round(completed / total * 100)`; 0 with no tasks.
    pub productivity_pct: u8,
    pub categories: Vec<CategoryCount>,
    pub study_time_today_seconds: u64,
    pub completed_pomodoros: u32,
}

impl Overview {
    pub fn compute(planner: &Planner) -> Self {
        let total_subjects = planner.subjects.len();
        let average_progress = if total_subjects == 0 {
            0
        } else {
            let sum: u32 = planner.subjects.iter().map(|s| s.progress as u32).sum();
            (sum as f64 / total_subjects as f64).round() as u8
        };

        let total_tasks = planner.tasks.len();
        let completed_tasks = planner.tasks.iter().filter(|t| t.completed).count();
        let productivity_pct = if total_tasks == 0 {
            0
        } else {
            (completed_tasks as f64 / total_tasks as f64 * 100.0).round() as u8
        };

        let categories = TaskCategory::ALL
            .iter()
            .map(|&category| CategoryCount {
                category,
                count: planner
                    .tasks
                    .iter()
                    .filter(|t| t.category == category)
                    .count(),
            })
            .collect();

        Self {
            total_subjects,
            average_progress,
            completed_today: planner.streak.completed_count(),
            streak_days: planner.streak.count,
            total_tasks,
            completed_tasks,
            pending_tasks: total_tasks - completed_tasks,
            productivity_pct,
            categories,
            study_time_today_seconds: planner.pomodoro.accumulated_study_seconds(),
            completed_pomodoros: planner.pomodoro.completed_cycles(),
        }
    }
}

/// Render a second count as `Xh Ym`.
pub fn format_duration(seconds: u64) -> String {
    format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::Priority;
    use chrono::Utc;

    #[test]
    fn empty_state_yields_zeroes() {
        let overview = Overview::compute(&Planner::default());
        assert_eq!(overview.total_subjects, 0);
        assert_eq!(overview.average_progress, 0);
        assert_eq!(overview.productivity_pct, 0);
        assert_eq!(overview.pending_tasks, 0);
    }

    #[test]
    fn average_progress_rounds_the_mean() {
        let mut planner = Planner::default();
        let now = Utc::now();
        let a = planner.add_subject("A", Priority::High, now).unwrap();
        planner.add_subject("B", Priority::Low, now).unwrap();

        // One completion: progress 10 and 0, mean 5.
        planner.mark_complete(a, now);
        let overview = Overview::compute(&planner);
        assert_eq!(overview.average_progress, 5);
        assert_eq!(overview.completed_today, 1);
    }

    #[test]
    fn productivity_tracks_completed_over_total() {
        let mut planner = Planner::default();
        let now = Utc::now();
        let a = planner.add_task("one", TaskCategory::Study, now).unwrap();
        planner.add_task("two", TaskCategory::Study, now).unwrap();
        planner.add_task("three", TaskCategory::Reading, now).unwrap();
        planner.toggle_task(a);

        let overview = Overview::compute(&planner);
        assert_eq!(overview.total_tasks, 3);
        assert_eq!(overview.completed_tasks, 1);
        assert_eq!(overview.pending_tasks, 2);
        assert_eq!(overview.productivity_pct, 33);
    }

    #[test]
    fn categories_cover_the_full_fixed_set() {
        let mut planner = Planner::default();
        let now = Utc::now();
        planner.add_task("drill", TaskCategory::TestPrep, now);

        let overview = Overview::compute(&planner);
        assert_eq!(overview.categories.len(), TaskCategory::ALL.len());
        let test_prep = overview
            .categories
            .iter()
            .find(|c| c.category == TaskCategory::TestPrep)
            .unwrap();
        assert_eq!(test_prep.count, 1);
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(0), "0h 0m");
        assert_eq!(format_duration(3599), "0h 59m");
        assert_eq!(format_duration(4500), "1h 15m");
    }
}
