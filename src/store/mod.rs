//! Flat-file record store.
//!
//! The roster CSV holds the current status of every student; the history JSON
//! holds one record per (class, date) session. Both files are rewritten in full
//! on every change.

mod history;
mod roster;

use history::{read_history, write_history};
use roster::{read_roster, seed_students, write_roster};

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::StoreError;
use crate::models::{AttendanceRecord, Student};

/// What `ensure_schema` had to do to the roster file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterInit {
    Unchanged,
    Seeded,
    Migrated,
}

/// Outcome of schema initialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaReport {
    pub roster: RosterInit,
    pub history_created: bool,
}

/// Handle on the two data files plus a cached roster snapshot.
#[derive(Debug)]
pub struct RecordStore {
    roster_path: PathBuf,
    history_path: PathBuf,
    students: Option<Vec<Student>>,
}

impl RecordStore {
    pub fn new(roster_path: impl Into<PathBuf>, history_path: impl Into<PathBuf>) -> Self {
        Self {
            roster_path: roster_path.into(),
            history_path: history_path.into(),
            students: None,
        }
    }

    pub fn roster_path(&self) -> &Path {
        &self.roster_path
    }

    pub fn history_path(&self) -> &Path {
        &self.history_path
    }

    /// Create missing files and add the status column to old rosters.
    ///
    /// Safe to call repeatedly; a second call reports no changes.
    pub fn ensure_schema(&mut self) -> Result<SchemaReport, StoreError> {
        create_parent_dir(&self.roster_path)?;
        create_parent_dir(&self.history_path)?;

        let roster = if !self.roster_path.exists() {
            let students = seed_students();
            write_roster(&self.roster_path, &students)?;
            tracing::info!(
                "Seeded roster {:?} with {} demo students",
                self.roster_path,
                students.len()
            );
            self.students = Some(students);
            RosterInit::Seeded
        } else {
            let file = read_roster(&self.roster_path)?;
            let init = if file.missing_status {
                write_roster(&self.roster_path, &file.students)?;
                tracing::info!("Added status column to roster {:?}", self.roster_path);
                RosterInit::Migrated
            } else {
                RosterInit::Unchanged
            };
            self.students = Some(file.students);
            init
        };

        let history_created = if !self.history_path.exists() {
            write_history(&self.history_path, &[])?;
            true
        } else {
            false
        };

        Ok(SchemaReport {
            roster,
            history_created,
        })
    }

    /// Roster from the cache, loading it on first use.
    pub fn load_students(&mut self) -> Result<Vec<Student>, StoreError> {
        if let Some(students) = &self.students {
            return Ok(students.clone());
        }
        self.reload_students()
    }

    /// Roster read fresh from disk; refreshes the cache.
    pub fn reload_students(&mut self) -> Result<Vec<Student>, StoreError> {
        let file = read_roster(&self.roster_path)?;
        self.students = Some(file.students.clone());
        Ok(file.students)
    }

    /// Drop the cached roster so the next load reads the file.
    pub fn invalidate(&mut self) {
        self.students = None;
    }

    /// Persist the full roster and cache what was written.
    pub fn save_students(&mut self, students: Vec<Student>) -> Result<(), StoreError> {
        if let Err(e) = write_roster(&self.roster_path, &students) {
            self.invalidate();
            return Err(e);
        }
        self.students = Some(students);
        Ok(())
    }

    pub fn load_history(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
        read_history(&self.history_path)
    }

    pub fn save_history(&self, records: &[AttendanceRecord]) -> Result<(), StoreError> {
        write_history(&self.history_path, records)
    }
}

fn create_parent_dir(path: &Path) -> Result<(), StoreError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceStatus;
    use tempfile::TempDir;

    fn temp_store(dir: &TempDir) -> RecordStore {
        RecordStore::new(
            dir.path().join("data/students.csv"),
            dir.path().join("data/attendance.json"),
        )
    }

    #[test]
    fn test_ensure_schema_seeds_then_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut store = temp_store(&dir);

        let first = store.ensure_schema().unwrap();
        assert_eq!(first.roster, RosterInit::Seeded);
        assert!(first.history_created);

        let students = store.reload_students().unwrap();
        assert_eq!(students.len(), 8);
        assert_eq!(students.iter().filter(|s| s.class_id == 1).count(), 4);
        assert!(students.iter().all(|s| s.status == AttendanceStatus::Present));
        assert!(store.load_history().unwrap().is_empty());

        let second = store.ensure_schema().unwrap();
        assert_eq!(second.roster, RosterInit::Unchanged);
        assert!(!second.history_created);
    }

    #[test]
    fn test_ensure_schema_migrates_roster_without_status() {
        let dir = TempDir::new().unwrap();
        let mut store = temp_store(&dir);
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(
            store.roster_path(),
            "cod_aluno,cod_turma,nome_aluno\n2024001,1,Ana Silva\n",
        )
        .unwrap();

        let report = store.ensure_schema().unwrap();

        assert_eq!(report.roster, RosterInit::Migrated);
        let text = fs::read_to_string(store.roster_path()).unwrap();
        assert_eq!(
            text,
            "student_id,class_id,name,status\n2024001,1,Ana Silva,present\n"
        );
        assert_eq!(store.ensure_schema().unwrap().roster, RosterInit::Unchanged);
    }

    #[test]
    fn test_cache_is_stale_until_reload() {
        let dir = TempDir::new().unwrap();
        let mut store = temp_store(&dir);
        store.ensure_schema().unwrap();
        assert_eq!(store.load_students().unwrap().len(), 8);

        write_roster(store.roster_path(), &seed_students()[..2]).unwrap();

        assert_eq!(store.load_students().unwrap().len(), 8);
        assert_eq!(store.reload_students().unwrap().len(), 2);
        assert_eq!(store.load_students().unwrap().len(), 2);
    }

    #[test]
    fn test_load_without_roster_file_fails() {
        let dir = TempDir::new().unwrap();
        let mut store = temp_store(&dir);
        assert!(matches!(
            store.load_students(),
            Err(StoreError::Io { .. })
        ));
    }
}
