use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Millisecond-epoch identifier, unique and monotonic within a collection.
pub type SubjectId = i64;

/// Study priority of a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Parse from the user-facing label.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            _ if s.eq_ignore_ascii_case("high") => Some(Priority::High),
            _ if s.eq_ignore_ascii_case("medium") => Some(Priority::Medium),
            _ if s.eq_ignore_ascii_case("low") => Some(Priority::Low),
            _ => None,
        }
    }
}

/// A subject under study.
///
/// `progress` moves only through completion events (+10 per completed day,
/// capped at 100); `last_revised` is stamped at the same time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub last_revised: Option<DateTime<Utc>>,
}

impl Subject {
    pub fn new(id: SubjectId, name: impl Into<String>, priority: Priority) -> Self {
        Self {
            id,
            name: name.into(),
            priority,
            progress: 0,
            last_revised: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!(Priority::parse("high"), Some(Priority::High));
        assert_eq!(Priority::parse("MEDIUM"), Some(Priority::Medium));
        assert_eq!(Priority::parse("Low"), Some(Priority::Low));
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn subject_document_shape_is_camel_case() {
        let s = Subject::new(1700000000000, "Math", Priority::High);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["priority"], "High");
        assert_eq!(json["progress"], 0);
        assert!(json["lastRevised"].is_null());
    }

    #[test]
    fn subject_deserializes_with_missing_fields() {
        let s: Subject =
            serde_json::from_str(r#"{"id": 42, "name": "Physics"}"#).unwrap();
        assert_eq!(s.priority, Priority::Medium);
        assert_eq!(s.progress, 0);
        assert!(s.last_revised.is_none());
    }
}
