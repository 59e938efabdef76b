use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Millisecond-epoch identifier, unique and monotonic within a collection.
pub type TaskId = i64;

/// Category of a task. Fixed set; also drives the per-category analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TaskCategory {
    #[default]
    Study,
    Reading,
    Notes,
    Revision,
    Assignment,
    #[serde(rename = "Test Prep")]
    TestPrep,
}

impl TaskCategory {
    /// All categories in display order.
    pub const ALL: [TaskCategory; 6] = [
        TaskCategory::Study,
        TaskCategory::Reading,
        TaskCategory::Notes,
        TaskCategory::Revision,
        TaskCategory::Assignment,
        TaskCategory::TestPrep,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaskCategory::Study => "Study",
            TaskCategory::Reading => "Reading",
            TaskCategory::Notes => "Notes",
            TaskCategory::Revision => "Revision",
            TaskCategory::Assignment => "Assignment",
            TaskCategory::TestPrep => "Test Prep",
        }
    }

    /// Parse from the user-facing label.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(s))
    }
}

/// A one-off to-do item, independent of subjects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub category: TaskCategory,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(
        id: TaskId,
        text: impl Into<String>,
        category: TaskCategory,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            category,
            completed: false,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_round_trip() {
        for cat in TaskCategory::ALL {
            assert_eq!(TaskCategory::parse(cat.label()), Some(cat));
        }
    }

    #[test]
    fn test_prep_serializes_with_space() {
        let json = serde_json::to_string(&TaskCategory::TestPrep).unwrap();
        assert_eq!(json, "\"Test Prep\"");
        let back: TaskCategory = serde_json::from_str("\"Test Prep\"").unwrap();
        assert_eq!(back, TaskCategory::TestPrep);
    }

    #[test]
    fn task_document_shape() {
        let t = Task::new(1, "revise chapter 3", TaskCategory::Revision, Utc::now());
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["category"], "Revision");
        assert_eq!(json["completed"], false);
        assert!(json.get("createdAt").is_some());
    }
}
