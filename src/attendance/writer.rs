//! Merges an attendance submission into the roster and the history.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{AttendanceEntry, AttendanceRecord, AttendanceStatus};
use crate::store::RecordStore;

/// Result of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Roster and history both written.
    Saved,
    /// Roster written; the history could not be read or written.
    RosterOnly,
    /// Roster could not be updated; nothing was written.
    Failed,
}

impl SubmitOutcome {
    /// Whether the caller should see the submission as accepted.
    ///
    /// `RosterOnly` counts as accepted: current status wins over history.
    pub fn is_accepted(self) -> bool {
        !matches!(self, SubmitOutcome::Failed)
    }
}

/// Record a session for `class_id` on `date`.
///
/// Entries naming students that are not in the roster are ignored for the
/// status update but kept verbatim in the history record. Any earlier record
/// for the same class and date is replaced.
pub fn submit(
    store: &mut RecordStore,
    class_id: i64,
    date: NaiveDate,
    entries: Vec<AttendanceEntry>,
) -> SubmitOutcome {
    let mut students = match store.reload_students() {
        Ok(students) => students,
        Err(e) => {
            tracing::error!("Failed to load roster for attendance update: {}", e);
            return SubmitOutcome::Failed;
        }
    };

    let index: HashMap<String, usize> = students
        .iter()
        .enumerate()
        .map(|(i, s)| (s.student_id.clone(), i))
        .collect();

    for entry in &entries {
        match index.get(&entry.student_id) {
            Some(&i) => students[i].status = AttendanceStatus::from_present(entry.present),
            None => tracing::debug!(
                "Ignoring attendance for unknown student {}",
                entry.student_id
            ),
        }
    }

    if let Err(e) = store.save_students(students) {
        tracing::error!("Failed to save roster: {}", e);
        return SubmitOutcome::Failed;
    }

    let mut history = match store.load_history() {
        Ok(history) => history,
        Err(e) => {
            tracing::warn!("Roster updated but history could not be read: {}", e);
            return SubmitOutcome::RosterOnly;
        }
    };

    history.retain(|r| !r.is_same_session(class_id, date));
    history.push(AttendanceRecord::new(class_id, date, entries));

    match store.save_history(&history) {
        Ok(()) => {
            tracing::info!("Saved attendance for class {} on {}", class_id, date);
            SubmitOutcome::Saved
        }
        Err(e) => {
            tracing::warn!("Roster updated but history could not be written: {}", e);
            SubmitOutcome::RosterOnly
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seeded_store(dir: &TempDir) -> RecordStore {
        let mut store = RecordStore::new(
            dir.path().join("students.csv"),
            dir.path().join("attendance.json"),
        );
        store.ensure_schema().unwrap();
        store
    }

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_submit_updates_roster_and_history() {
        let dir = TempDir::new().unwrap();
        let mut store = seeded_store(&dir);

        let outcome = submit(
            &mut store,
            1,
            jan(15),
            vec![
                AttendanceEntry::new("2024001", true),
                AttendanceEntry::new("2024002", false),
            ],
        );

        assert_eq!(outcome, SubmitOutcome::Saved);

        store.invalidate();
        let students = store.load_students().unwrap();
        let status = |id: &str| students.iter().find(|s| s.student_id == id).unwrap().status;
        assert_eq!(status("2024001"), AttendanceStatus::Present);
        assert_eq!(status("2024002"), AttendanceStatus::Absent);

        let history = store.load_history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].summary.present, 1);
        assert_eq!(history[0].summary.absent, 1);
    }

    #[test]
    fn test_resubmission_replaces_same_session() {
        let dir = TempDir::new().unwrap();
        let mut store = seeded_store(&dir);

        submit(&mut store, 1, jan(15), vec![AttendanceEntry::new("2024001", true)]);
        submit(&mut store, 1, jan(16), vec![AttendanceEntry::new("2024001", true)]);
        submit(&mut store, 1, jan(15), vec![AttendanceEntry::new("2024001", false)]);

        let history = store.load_history().unwrap();
        assert_eq!(history.len(), 2);
        let replaced: Vec<_> = history.iter().filter(|r| r.date == jan(15)).collect();
        assert_eq!(replaced.len(), 1);
        assert_eq!(replaced[0].entries, vec![AttendanceEntry::new("2024001", false)]);
    }

    #[test]
    fn test_unknown_student_is_ignored() {
        let dir = TempDir::new().unwrap();
        let mut store = seeded_store(&dir);

        let outcome = submit(&mut store, 1, jan(15), vec![AttendanceEntry::new("9999999", false)]);

        assert_eq!(outcome, SubmitOutcome::Saved);
        let students = store.reload_students().unwrap();
        assert_eq!(students.len(), 8);
        assert!(students.iter().all(|s| s.student_id != "9999999"));
        assert_eq!(store.load_history().unwrap()[0].entries.len(), 1);
    }

    #[test]
    fn test_history_failure_is_partial_success() {
        let dir = TempDir::new().unwrap();
        let mut store = RecordStore::new(
            dir.path().join("students.csv"),
            // A directory cannot be written as a file.
            dir.path().to_path_buf(),
        );
        store.ensure_schema().unwrap();

        let outcome = submit(&mut store, 1, jan(15), vec![AttendanceEntry::new("2024003", false)]);

        assert_eq!(outcome, SubmitOutcome::RosterOnly);
        assert!(outcome.is_accepted());
        let students = store.reload_students().unwrap();
        let carlos = students.iter().find(|s| s.student_id == "2024003").unwrap();
        assert_eq!(carlos.status, AttendanceStatus::Absent);
    }

    #[test]
    fn test_missing_roster_fails() {
        let dir = TempDir::new().unwrap();
        let mut store = RecordStore::new(
            dir.path().join("missing.csv"),
            dir.path().join("attendance.json"),
        );

        let outcome = submit(&mut store, 1, jan(15), vec![AttendanceEntry::new("2024001", true)]);

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert!(!outcome.is_accepted());
        assert!(!dir.path().join("attendance.json").exists());
    }
}
