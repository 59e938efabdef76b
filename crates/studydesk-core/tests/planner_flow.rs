//! End-to-end flows across the planner, streak, timetable and storage.

use chrono::{DateTime, Duration, TimeZone, Utc};

use studydesk_core::storage::{export_planner, import_planner};
use studydesk_core::{
    Clock, Database, FixedClock, Overview, Planner, Priority, RuleResponder, StreakChange,
};

fn morning(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, day, 9, 30, 0).unwrap()
}

#[test]
fn consecutive_days_build_a_streak_and_a_gap_breaks_it() {
    let mut planner = Planner::default();
    let math = planner
        .add_subject("Math", Priority::High, morning(1))
        .unwrap();
    let physics = planner
        .add_subject("Physics", Priority::Medium, morning(1))
        .unwrap();

    // Three consecutive study days; two completions on day one still
    // count the day once.
    for day in 1..=3 {
        let clock = FixedClock(morning(day));
        planner.evaluate_day(clock.today());
        planner.mark_complete(math, clock.now());
        if day == 1 {
            planner.mark_complete(physics, clock.now());
        }
    }
    assert_eq!(planner.streak.count, 3);

    // Skipping day 4 and 5 entirely breaks continuity on day 6.
    let clock = FixedClock(morning(6));
    assert_eq!(planner.evaluate_day(clock.today()), StreakChange::Broken);
    assert_eq!(planner.streak.count, 0);
    assert_eq!(planner.streak.completed_count(), 0);

    // The chain restarts from one.
    planner.mark_complete(math, clock.now());
    assert_eq!(planner.streak.count, 1);
}

#[test]
fn regenerated_timetable_tracks_the_completion_set() {
    let mut planner = Planner::default();
    let now = morning(2);
    let math = planner.add_subject("Math", Priority::High, now).unwrap();
    planner.add_subject("Physics", Priority::Low, now).unwrap();

    let slots = planner.generate_timetable(4.0).unwrap();
    assert_eq!(slots.len(), 2);
    assert!(slots.iter().all(|s| !s.completed));
    assert_eq!(slots[0].start_time, "9:00 AM");
    assert_eq!(slots[1].end_time, "1:00 PM");

    // Completing from a slot's subject name and regenerating reflects it.
    planner.mark_complete_by_name(&slots[0].subject, now);
    let slots = planner.generate_timetable(4.0).unwrap();
    assert!(slots[0].completed);
    assert!(!slots[1].completed);
    assert!(planner.streak.is_completed(math));
}

#[test]
fn state_survives_database_and_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open_at(&dir.path().join("studydesk.db")).unwrap();

    let mut planner = db.load_planner().unwrap();
    let now = morning(3);
    let id = planner
        .add_subject("Chemistry", Priority::High, now)
        .unwrap();
    planner.mark_complete(id, now);
    planner
        .ask("How to prepare for exams?", &RuleResponder, now)
        .unwrap();
    db.save_planner(&planner).unwrap();

    let reloaded = db.load_planner().unwrap();
    assert_eq!(reloaded.subjects.len(), 1);
    assert_eq!(reloaded.streak.count, 1);
    assert_eq!(reloaded.ai_messages.len(), 2);

    // File backup of the same document shape.
    let backup = dir.path().join("backup.json");
    export_planner(&reloaded, &backup).unwrap();
    let imported = import_planner(&backup).unwrap();
    assert_eq!(imported.subjects[0].name, "Chemistry");
    assert_eq!(imported.streak.count, 1);

    // A malformed backup leaves the stored state untouched.
    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "]{").unwrap();
    assert!(import_planner(&broken).is_err());
    assert_eq!(db.load_planner().unwrap().subjects.len(), 1);
}

#[test]
fn pomodoro_state_carries_across_a_reload() {
    let mut planner = Planner::default();
    planner.pomodoro.set_work_minutes(1);
    planner.pomodoro.reset();
    planner.pomodoro.start();

    // The process was away for two minutes; catch up stops at the boundary.
    let end = planner.pomodoro.advance_by(120).expect("work phase ends");
    assert_eq!(end.completed_cycles, 1);

    let json = planner.to_json_pretty().unwrap();
    let restored = Planner::from_json(&json).unwrap();
    assert_eq!(restored.pomodoro.completed_cycles(), 1);
    assert_eq!(restored.pomodoro.accumulated_study_seconds(), 60);
    assert!(!restored.pomodoro.is_running());

    let overview = Overview::compute(&restored);
    assert_eq!(overview.completed_pomodoros, 1);
    assert_eq!(overview.study_time_today_seconds, 60);
}

#[test]
fn one_day_gap_preserves_the_streak_across_a_reload() {
    let mut planner = Planner::default();
    let id = planner
        .add_subject("History", Priority::Medium, morning(10))
        .unwrap();
    planner.mark_complete(id, morning(10));

    let json = planner.to_json_pretty().unwrap();
    let mut restored = Planner::from_json(&json).unwrap();

    let next_day = morning(10) + Duration::days(1);
    assert_eq!(
        restored.evaluate_day(next_day.date_naive()),
        StreakChange::NewDay
    );
    assert_eq!(restored.streak.count, 1);
    assert_eq!(restored.streak.completed_count(), 0);
}
