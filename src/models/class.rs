//! Class model, derived from the roster by grouping on `class_id`.

use std::collections::BTreeMap;

use serde::Serialize;

use super::Student;

/// Display names for the known classes.
const CLASS_NAMES: &[(i64, &str)] = &[
    (1, "1º Ano A - Matemática"),
    (2, "1º Ano B - Matemática"),
    (3, "2º Ano A - Física"),
    (4, "2º Ano B - Física"),
    (5, "3º Ano A - Química"),
];

/// A class summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassInfo {
    pub id: i64,
    pub name: String,
    pub student_count: usize,
}

/// Display name for a class id, falling back to a generated label.
pub fn class_display_name(class_id: i64) -> String {
    CLASS_NAMES
        .iter()
        .find(|(id, _)| *id == class_id)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("Class {}", class_id))
}

/// Group students into classes, ordered by class id.
pub fn group_classes(students: &[Student]) -> Vec<ClassInfo> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for student in students {
        *counts.entry(student.class_id).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(id, student_count)| ClassInfo {
            id,
            name: class_display_name(id),
            student_count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_classes_sorted_with_counts() {
        let students = vec![
            Student::new("3", 7, "C"),
            Student::new("1", 1, "A"),
            Student::new("2", 1, "B"),
        ];

        let classes = group_classes(&students);

        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].id, 1);
        assert_eq!(classes[0].name, "1º Ano A - Matemática");
        assert_eq!(classes[0].student_count, 2);
        assert_eq!(classes[1].id, 7);
        assert_eq!(classes[1].name, "Class 7");
        assert_eq!(classes[1].student_count, 1);
    }
}
