//! File-based backup and restore.
//!
//! Export writes the same JSON document the persistence slot holds; import
//! parses and validates the payload before anything else is touched, so a
//! malformed file is reported and the existing state stays as it was.

use std::path::Path;

use crate::error::Result;
use crate::planner::Planner;

/// Write the full state document to `path` as pretty-printed JSON.
pub fn export_planner(planner: &Planner, path: &Path) -> Result<()> {
    std::fs::write(path, planner.to_json_pretty()?)?;
    Ok(())
}

/// Read a state document from `path`.
///
/// Missing fields take their defaults; an unreadable or unparseable payload
/// is an error and produces no planner.
pub fn import_planner(path: &Path) -> Result<Planner> {
    let payload = std::fs::read_to_string(path)?;
    Planner::from_json(&payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::subject::Priority;
    use chrono::Utc;

    #[test]
    fn export_import_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");

        let mut planner = Planner::default();
        let id = planner
            .add_subject("Math", Priority::High, Utc::now())
            .unwrap();
        planner.mark_complete(id, Utc::now());
        export_planner(&planner, &path).unwrap();

        let restored = import_planner(&path).unwrap();
        assert_eq!(restored.subjects.len(), 1);
        assert_eq!(restored.streak.count, 1);
        assert!(restored.streak.is_completed(id));
    }

    #[test]
    fn malformed_payload_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "definitely not json").unwrap();

        assert!(matches!(
            import_planner(&path).unwrap_err(),
            CoreError::Import(_)
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = import_planner(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
