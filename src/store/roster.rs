//! Roster CSV reading and writing.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;

use crate::errors::StoreError;
use crate::models::{AttendanceStatus, Student};

/// Canonical roster header, in column order.
pub const ROSTER_HEADER: [&str; 4] = ["student_id", "class_id", "name", "status"];

/// A roster row as found on disk. Older rosters have no status column.
#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(alias = "cod_aluno")]
    student_id: String,
    #[serde(alias = "cod_turma")]
    class_id: i64,
    #[serde(alias = "nome_aluno")]
    name: String,
    #[serde(default)]
    status: Option<AttendanceStatus>,
}

/// Parsed roster plus whether it lacked status values.
#[derive(Debug)]
pub struct RosterFile {
    pub students: Vec<Student>,
    pub missing_status: bool,
}

/// Read the roster, defaulting absent status values to present.
pub fn read_roster(path: &Path) -> Result<RosterFile, StoreError> {
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let has_status_column = rdr
        .headers()
        .map_err(|e| StoreError::csv(path, e))?
        .iter()
        .any(|h| h == "status");

    let mut missing_status = !has_status_column;
    let mut students = Vec::new();
    for result in rdr.deserialize() {
        let row: RosterRow = result.map_err(|e| StoreError::csv(path, e))?;
        let status = match row.status {
            Some(status) => status,
            None => {
                missing_status = true;
                AttendanceStatus::Present
            }
        };
        students.push(Student {
            student_id: row.student_id,
            class_id: row.class_id,
            name: row.name,
            status,
        });
    }

    Ok(RosterFile {
        students,
        missing_status,
    })
}

/// Rewrite the whole roster with the canonical header.
pub fn write_roster(path: &Path, students: &[Student]) -> Result<(), StoreError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| StoreError::csv(path, e))?;

    wtr.write_record(ROSTER_HEADER)
        .map_err(|e| StoreError::csv(path, e))?;
    for student in students {
        wtr.serialize(student)
            .map_err(|e| StoreError::csv(path, e))?;
    }
    wtr.flush().map_err(|e| StoreError::io(path, e))?;
    Ok(())
}

/// Demo roster written when no roster file exists yet.
pub fn seed_students() -> Vec<Student> {
    [
        ("2024001", 1, "Ana Silva"),
        ("2024002", 1, "Bruno Costa"),
        ("2024003", 1, "Carlos Santos"),
        ("2024004", 1, "Diana Oliveira"),
        ("2024005", 2, "Eduardo Lima"),
        ("2024006", 2, "Fernanda Souza"),
        ("2024007", 2, "Gabriel Pereira"),
        ("2024008", 2, "Helena Rodrigues"),
    ]
    .into_iter()
    .map(|(id, class_id, name)| Student::new(id, class_id, name))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read_keeps_status() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.csv");
        let mut students = seed_students();
        students[1].status = AttendanceStatus::Absent;

        write_roster(&path, &students).unwrap();
        let roster = read_roster(&path).unwrap();

        assert!(!roster.missing_status);
        assert_eq!(roster.students, students);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("student_id,class_id,name,status\n"));
        assert!(text.contains("2024002,1,Bruno Costa,absent"));
    }

    #[test]
    fn test_read_legacy_roster_without_status() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.csv");
        std::fs::write(
            &path,
            "cod_aluno,cod_turma,nome_aluno\n2024001,1,Ana Silva\n2024005,2,Eduardo Lima\n",
        )
        .unwrap();

        let roster = read_roster(&path).unwrap();

        assert!(roster.missing_status);
        assert_eq!(roster.students.len(), 2);
        assert_eq!(roster.students[0].student_id, "2024001");
        assert_eq!(roster.students[1].class_id, 2);
        assert!(roster
            .students
            .iter()
            .all(|s| s.status == AttendanceStatus::Present));
    }

    #[test]
    fn test_read_blank_status_cell_counts_as_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.csv");
        std::fs::write(
            &path,
            "student_id,class_id,name,status\n1,1,Ana,absent\n2,1,Bruno,\n",
        )
        .unwrap();

        let roster = read_roster(&path).unwrap();

        assert!(roster.missing_status);
        assert_eq!(roster.students[0].status, AttendanceStatus::Absent);
        assert_eq!(roster.students[1].status, AttendanceStatus::Present);
    }

    #[test]
    fn test_empty_roster_writes_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.csv");

        write_roster(&path, &[]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "student_id,class_id,name,status\n");
        assert!(read_roster(&path).unwrap().students.is_empty());
    }
}
