//! Per-class attendance statistics over the session history.

use std::collections::HashMap;

use crate::models::{AttendanceRecord, ClassStatistics, Student, StudentStatistics};

/// Compute statistics for `class_id`.
///
/// `students` and `history` may contain other classes; they are filtered here.
/// Only students currently on the roster are counted, and each student's rate
/// covers only the sessions that recorded them.
pub fn compute(class_id: i64, students: &[Student], history: &[AttendanceRecord]) -> ClassStatistics {
    let class_students: Vec<&Student> = students.iter().filter(|s| s.class_id == class_id).collect();
    let sessions: Vec<&AttendanceRecord> =
        history.iter().filter(|r| r.class_id == class_id).collect();

    let total_students = class_students.len();
    if sessions.is_empty() {
        return ClassStatistics::empty(class_id, total_students);
    }

    // (present, absent) per student id
    let mut counts: HashMap<&str, (usize, usize)> = class_students
        .iter()
        .map(|s| (s.student_id.as_str(), (0, 0)))
        .collect();

    for session in &sessions {
        for entry in &session.entries {
            if let Some((present, absent)) = counts.get_mut(entry.student_id.as_str()) {
                if entry.present {
                    *present += 1;
                } else {
                    *absent += 1;
                }
            }
        }
    }

    let per_student: Vec<StudentStatistics> = class_students
        .iter()
        .map(|s| {
            let (present, absent) = counts[s.student_id.as_str()];
            StudentStatistics {
                student_id: s.student_id.clone(),
                name: s.name.clone(),
                present,
                absent,
                rate: attendance_rate(present, absent),
            }
        })
        .collect();

    let avg_rate = if total_students == 0 {
        0.0
    } else {
        let sum: f64 = per_student.iter().map(|s| s.rate).sum();
        round2(sum / total_students as f64)
    };

    ClassStatistics {
        class_id,
        total_students,
        total_sessions: sessions.len(),
        avg_rate,
        per_student,
    }
}

fn attendance_rate(present: usize, absent: usize) -> f64 {
    let recorded = present + absent;
    if recorded == 0 {
        0.0
    } else {
        present as f64 / recorded as f64 * 100.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
