//! Student roster model.

use serde::{Deserialize, Serialize};

/// Current attendance status of a student, as stored in the roster.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum AttendanceStatus {
    #[default]
    #[serde(rename = "present", alias = "presente")]
    Present,
    #[serde(rename = "absent", alias = "ausente")]
    Absent,
}

impl AttendanceStatus {
    pub fn from_present(present: bool) -> Self {
        if present {
            AttendanceStatus::Present
        } else {
            AttendanceStatus::Absent
        }
    }

    pub fn is_present(self) -> bool {
        self == AttendanceStatus::Present
    }
}

/// A student row from the roster file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    #[serde(alias = "cod_aluno")]
    pub student_id: String,
    #[serde(alias = "cod_turma")]
    pub class_id: i64,
    #[serde(alias = "nome_aluno")]
    pub name: String,
    pub status: AttendanceStatus,
}

impl Student {
    pub fn new(student_id: &str, class_id: i64, name: &str) -> Self {
        Self {
            student_id: student_id.to_string(),
            class_id,
            name: name.to_string(),
            status: AttendanceStatus::Present,
        }
    }
}

/// Student as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct StudentView {
    pub id: String,
    pub matricula: String,
    pub name: String,
    pub class_id: i64,
    pub present: bool,
}

impl From<&Student> for StudentView {
    fn from(student: &Student) -> Self {
        Self {
            id: student.student_id.clone(),
            matricula: student.student_id.clone(),
            name: student.name.clone(),
            class_id: student.class_id,
            present: student.status.is_present(),
        }
    }
}
