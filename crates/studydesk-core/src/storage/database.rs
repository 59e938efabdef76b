//! SQLite-backed persistence.
//!
//! Provides:
//! - a key-value slot holding the full planner document as one JSON value
//! - a log of completed work/break phases with per-day summaries

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::error::{DatabaseError, Result};
use crate::planner::Planner;
use crate::timer::Phase;

use super::data_dir;

const PLANNER_KEY: &str = "planner_state";

/// A completed work or break phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: i64,
    pub phase: String,
    pub duration_min: u64,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Today's session totals.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionSummary {
    pub focus_sessions: u64,
    pub focus_minutes: u64,
    pub break_sessions: u64,
    pub break_minutes: u64,
}

/// SQLite database for the state slot and session log.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/studydesk/studydesk.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("studydesk.db");
        Self::open_at(&path)
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        conn.busy_timeout(std::time::Duration::from_secs(5))
            .map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate().map_err(DatabaseError::from)?;
        Ok(db)
    }

    /// Open an in-memory database (tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| DatabaseError::OpenFailed {
            path: ":memory:".into(),
            source,
        })?;
        let db = Self { conn };
        db.migrate().map_err(DatabaseError::from)?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS sessions (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                phase        TEXT NOT NULL,
                duration_min INTEGER NOT NULL,
                started_at   TEXT NOT NULL,
                completed_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_completed_at ON sessions(completed_at);
            CREATE INDEX IF NOT EXISTS idx_sessions_phase ON sessions(phase);",
        )?;
        Ok(())
    }

    // ── Key-value slot ───────────────────────────────────────────────

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Load the planner document, or a default planner when the slot is
    /// empty. A present-but-unparseable slot is an error, not data loss.
    pub fn load_planner(&self) -> Result<Planner> {
        match self.kv_get(PLANNER_KEY)? {
            Some(json) => Planner::from_json(&json),
            None => Ok(Planner::default()),
        }
    }

    /// Serialize the full planner document back into the slot.
    pub fn save_planner(&self, planner: &Planner) -> Result<()> {
        let json = serde_json::to_string(planner)?;
        self.kv_set(PLANNER_KEY, &json)?;
        Ok(())
    }

    /// Drop the planner slot entirely.
    pub fn clear_planner(&self) -> Result<(), DatabaseError> {
        self.kv_delete(PLANNER_KEY)
    }

    // ── Session log ──────────────────────────────────────────────────

    /// Record a completed phase.
    pub fn record_session(
        &self,
        phase: Phase,
        duration_min: u64,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<i64, DatabaseError> {
        let phase_str = match phase {
            Phase::Work => "work",
            Phase::Break => "break",
        };
        self.conn.execute(
            "INSERT INTO sessions (phase, duration_min, started_at, completed_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                phase_str,
                duration_min,
                started_at.to_rfc3339(),
                completed_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn today_summary(&self) -> Result<SessionSummary, DatabaseError> {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        let mut stmt = self.conn.prepare(
            "SELECT phase, COUNT(*), COALESCE(SUM(duration_min), 0)
             FROM sessions
             WHERE completed_at >= ?1
             GROUP BY phase",
        )?;

        let mut summary = SessionSummary::default();
        let rows = stmt.query_map(params![format!("{today}T00:00:00+00:00")], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u64>(1)?,
                row.get::<_, u64>(2)?,
            ))
        })?;
        for row in rows {
            let (phase, count, minutes) = row?;
            match phase.as_str() {
                "work" => {
                    summary.focus_sessions = count;
                    summary.focus_minutes = minutes;
                }
                "break" => {
                    summary.break_sessions = count;
                    summary.break_minutes = minutes;
                }
                _ => {}
            }
        }
        Ok(summary)
    }

    pub fn recent_sessions(&self, limit: u32) -> Result<Vec<SessionRecord>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, phase, duration_min, started_at, completed_at
             FROM sessions ORDER BY completed_at DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut sessions = Vec::new();
        for row in rows {
            let (id, phase, duration_min, started_at, completed_at) = row?;
            let started_at = DateTime::parse_from_rfc3339(&started_at)
                .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?
                .with_timezone(&Utc);
            let completed_at = DateTime::parse_from_rfc3339(&completed_at)
                .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?
                .with_timezone(&Utc);
            sessions.push(SessionRecord {
                id,
                phase,
                duration_min,
                started_at,
                completed_at,
            });
        }
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::Priority;

    #[test]
    fn kv_set_get_overwrite() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.kv_get("missing").unwrap(), None);

        db.kv_set("k", "v1").unwrap();
        assert_eq!(db.kv_get("k").unwrap().as_deref(), Some("v1"));

        db.kv_set("k", "v2").unwrap();
        assert_eq!(db.kv_get("k").unwrap().as_deref(), Some("v2"));

        db.kv_delete("k").unwrap();
        assert_eq!(db.kv_get("k").unwrap(), None);
    }

    #[test]
    fn planner_slot_round_trip() {
        let db = Database::open_memory().unwrap();
        assert!(db.load_planner().unwrap().subjects.is_empty());

        let mut planner = Planner::default();
        planner
            .add_subject("Math", Priority::High, Utc::now())
            .unwrap();
        db.save_planner(&planner).unwrap();

        let loaded = db.load_planner().unwrap();
        assert_eq!(loaded.subjects.len(), 1);
        assert_eq!(loaded.subjects[0].name, "Math");

        db.clear_planner().unwrap();
        assert!(db.load_planner().unwrap().subjects.is_empty());
    }

    #[test]
    fn sessions_are_recorded_and_summarized() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        db.record_session(Phase::Work, 25, now, now).unwrap();
        db.record_session(Phase::Work, 25, now, now).unwrap();
        db.record_session(Phase::Break, 5, now, now).unwrap();

        let summary = db.today_summary().unwrap();
        assert_eq!(summary.focus_sessions, 2);
        assert_eq!(summary.focus_minutes, 50);
        assert_eq!(summary.break_sessions, 1);
        assert_eq!(summary.break_minutes, 5);

        let recent = db.recent_sessions(10).unwrap();
        assert_eq!(recent.len(), 3);
    }
}
