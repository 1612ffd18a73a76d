//! Per-class attendance statistics.

use serde::Serialize;

/// Attendance counts and rate for one student.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StudentStatistics {
    pub student_id: String,
    pub name: String,
    pub present: usize,
    pub absent: usize,
    /// Percentage of recorded sessions attended, 0 when never recorded.
    pub rate: f64,
}

/// Aggregated statistics for a class.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassStatistics {
    pub class_id: i64,
    pub total_students: usize,
    pub total_sessions: usize,
    pub avg_rate: f64,
    pub per_student: Vec<StudentStatistics>,
}

impl ClassStatistics {
    pub fn empty(class_id: i64, total_students: usize) -> Self {
        Self {
            class_id,
            total_students,
            total_sessions: 0,
            avg_rate: 0.0,
            per_student: Vec::new(),
        }
    }
}
