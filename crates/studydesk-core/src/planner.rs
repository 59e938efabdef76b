//! Application state and operations.
//!
//! [`Planner`] is the single explicit state struct: subjects, tasks, notes,
//! documents, streak fields, pomodoro timer and assistant history. Every
//! operation takes the state by reference and returns what changed; nothing
//! reads ambient globals. The serialized form is a flat camelCase JSON
//! document with defaults for any missing field, so older or sparser
//! backups import cleanly.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::assistant::Responder;
use crate::error::{AssistantError, CoreError, Result};
use crate::events::Event;
use crate::streak::{StreakChange, StreakTracker};
use crate::subject::{Priority, Subject, SubjectId};
use crate::task::{Task, TaskCategory, TaskId};
use crate::timer::PomodoroTimer;
use crate::timetable::{self, TimetableSlot};

/// A free-form study note.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// File format of a tracked document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DocumentKind {
    #[serde(rename = "PDF")]
    #[default]
    Pdf,
    Word,
    PowerPoint,
    Excel,
    Image,
    Video,
    Other,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 7] = [
        DocumentKind::Pdf,
        DocumentKind::Word,
        DocumentKind::PowerPoint,
        DocumentKind::Excel,
        DocumentKind::Image,
        DocumentKind::Video,
        DocumentKind::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Word => "Word",
            DocumentKind::PowerPoint => "PowerPoint",
            DocumentKind::Excel => "Excel",
            DocumentKind::Image => "Image",
            DocumentKind::Video => "Video",
            DocumentKind::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.label().eq_ignore_ascii_case(s))
    }
}

/// A reference to study material (link or file name), grouped by subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    pub name: String,
    pub subject: String,
    #[serde(rename = "type", default)]
    pub kind: DocumentKind,
    #[serde(default)]
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Who authored an assistant chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistantRole {
    User,
    Ai,
}

/// One entry of the persisted assistant conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantMessage {
    pub id: i64,
    #[serde(rename = "type")]
    pub role: AssistantRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Notification preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Notifications {
    pub daily_reminders: bool,
    pub revision_alerts: bool,
    pub test_alerts: bool,
}

impl Default for Notifications {
    fn default() -> Self {
        Self {
            daily_reminders: true,
            revision_alerts: true,
            test_alerts: true,
        }
    }
}

/// The full application state.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Planner {
    pub subjects: Vec<Subject>,
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
    pub documents: Vec<Document>,
    #[serde(flatten)]
    pub streak: StreakTracker,
    #[serde(flatten)]
    pub pomodoro: PomodoroTimer,
    pub notifications: Notifications,
    pub ai_messages: Vec<AssistantMessage>,
}

impl Planner {
    // ── Streak and completion ────────────────────────────────────────

    /// Re-evaluate streak continuity against `today`; call after loading
    /// state and whenever the day may have rolled over.
    pub fn evaluate_day(&mut self, today: NaiveDate) -> StreakChange {
        self.streak.evaluate(today)
    }

    /// Mark a subject done for the current study day.
    ///
    /// Idempotent per day; the first completion of a calendar day advances
    /// the streak, every completion bumps the subject's progress by 10
    /// (capped at 100) and stamps its revision time.
    pub fn mark_complete(&mut self, id: SubjectId, now: DateTime<Utc>) -> Option<Event> {
        let position = self.subjects.iter().position(|s| s.id == id)?;
        if !self.streak.record_completion(id, now.date_naive()) {
            return None;
        }
        let subject = &mut self.subjects[position];
        subject.progress = subject.progress.saturating_add(10).min(100);
        subject.last_revised = Some(now);
        Some(Event::CompletionRecorded {
            subject_id: id,
            subject: subject.name.clone(),
            streak: self.streak.count,
            at: now,
        })
    }

    /// Completion by display name, as driven from a timetable slot.
    pub fn mark_complete_by_name(&mut self, name: &str, now: DateTime<Utc>) -> Option<Event> {
        let id = self.subject_by_name(name)?.id;
        self.mark_complete(id, now)
    }

    // ── Subjects ─────────────────────────────────────────────────────

    /// Add a subject. Blank names are declined without error.
    pub fn add_subject(
        &mut self,
        name: &str,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Option<SubjectId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let id = next_id(self.subjects.iter().map(|s| s.id), now);
        self.subjects.push(Subject::new(id, name, priority));
        Some(id)
    }

    pub fn subject(&self, id: SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn subject_by_name(&self, name: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.name == name)
    }

    /// Remove a subject. A stale id left in today's completion set is
    /// tolerated; it simply no longer references anything.
    pub fn remove_subject(&mut self, id: SubjectId) -> bool {
        let before = self.subjects.len();
        self.subjects.retain(|s| s.id != id);
        self.subjects.len() != before
    }

    pub fn set_priority(&mut self, id: SubjectId, priority: Priority) -> bool {
        match self.subjects.iter_mut().find(|s| s.id == id) {
            Some(subject) => {
                subject.priority = priority;
                true
            }
            None => false,
        }
    }

    // ── Timetable ────────────────────────────────────────────────────

    /// Generate today's timetable from the current subject list; the
    /// `completed` flag on each slot reflects today's completion set.
    pub fn generate_timetable(&self, study_hours: f64) -> Result<Vec<TimetableSlot>> {
        timetable::generate(&self.subjects, study_hours, &self.streak.completed_today)
    }

    // ── Tasks ────────────────────────────────────────────────────────

    /// Add a task. Blank text is declined without error.
    pub fn add_task(
        &mut self,
        text: &str,
        category: TaskCategory,
        now: DateTime<Utc>,
    ) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = next_id(self.tasks.iter().map(|t| t.id), now);
        self.tasks.push(Task::new(id, text, category, now));
        Some(id)
    }

    /// Flip a task's completion flag; returns the new state.
    pub fn toggle_task(&mut self, id: TaskId) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    pub fn remove_task(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    // ── Notes ────────────────────────────────────────────────────────

    /// Add a note. Requires both a title and content.
    pub fn add_note(&mut self, title: &str, content: &str, now: DateTime<Utc>) -> Option<i64> {
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() || content.is_empty() {
            return None;
        }
        let id = next_id(self.notes.iter().map(|n| n.id), now);
        self.notes.push(Note {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
        });
        Some(id)
    }

    pub fn remove_note(&mut self, id: i64) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        self.notes.len() != before
    }

    // ── Documents ────────────────────────────────────────────────────

    /// Track a document. Requires a name and a subject label.
    pub fn add_document(
        &mut self,
        name: &str,
        subject: &str,
        kind: DocumentKind,
        url: &str,
        now: DateTime<Utc>,
    ) -> Option<i64> {
        let name = name.trim();
        let subject = subject.trim();
        if name.is_empty() || subject.is_empty() {
            return None;
        }
        let id = next_id(self.documents.iter().map(|d| d.id), now);
        self.documents.push(Document {
            id,
            name: name.to_string(),
            subject: subject.to_string(),
            kind,
            url: url.trim().to_string(),
            uploaded_at: now,
        });
        Some(id)
    }

    pub fn remove_document(&mut self, id: i64) -> bool {
        let before = self.documents.len();
        self.documents.retain(|d| d.id != id);
        self.documents.len() != before
    }

    // ── Assistant ────────────────────────────────────────────────────

    /// Ask the assistant a question, appending both sides of the exchange
    /// to the history. Blank questions are declined without error; a
    /// responder failure leaves the history untouched.
    pub fn ask(
        &mut self,
        question: &str,
        responder: &dyn Responder,
        now: DateTime<Utc>,
    ) -> Result<Option<String>, AssistantError> {
        let question = question.trim();
        if question.is_empty() {
            return Ok(None);
        }
        let answer = responder.respond(question)?;

        let id = next_id(self.ai_messages.iter().map(|m| m.id), now);
        self.ai_messages.push(AssistantMessage {
            id,
            role: AssistantRole::User,
            text: question.to_string(),
            timestamp: now,
        });
        self.ai_messages.push(AssistantMessage {
            id: id + 1,
            role: AssistantRole::Ai,
            text: answer.clone(),
            timestamp: now,
        });
        Ok(Some(answer))
    }

    pub fn clear_assistant_history(&mut self) {
        self.ai_messages.clear();
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Wipe everything back to defaults.
    pub fn clear(&mut self) {
        *self = Planner::default();
    }

    /// Repair a deserialized document: clamp subject progress, rebuild an
    /// invalid timer countdown.
    pub fn normalize(&mut self) {
        for subject in &mut self.subjects {
            if subject.progress > 100 {
                subject.progress = 100;
            }
        }
        self.pomodoro.normalize();
    }

    /// Serialize the full state document.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a state document, substituting defaults for missing fields.
    /// Fails without producing a planner when the payload is not valid.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut planner: Planner = serde_json::from_str(json)
            .map_err(|e| CoreError::Import(format!("not a valid planner document: {e}")))?;
        planner.normalize();
        Ok(planner)
    }
}

/// Millisecond-epoch id, bumped past the collection's current maximum so a
/// burst of additions within one millisecond stays unique and ordered.
fn next_id(existing: impl Iterator<Item = i64>, now: DateTime<Utc>) -> i64 {
    let floor = existing.max().map_or(i64::MIN, |max| max.saturating_add(1));
    now.timestamp_millis().max(floor)
}
