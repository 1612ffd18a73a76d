//! Read-side lookups over the roster and the history.
//!
//! Store failures degrade to empty results after being logged.

use crate::models::{group_classes, AttendanceRecord, ClassInfo, ClassStatistics, Student};
use crate::store::RecordStore;

use super::statistics;

fn cached_students(store: &mut RecordStore) -> Vec<Student> {
    store.load_students().unwrap_or_else(|e| {
        tracing::error!("Failed to load roster: {}", e);
        Vec::new()
    })
}

fn history(store: &RecordStore) -> Vec<AttendanceRecord> {
    store.load_history().unwrap_or_else(|e| {
        tracing::error!("Failed to load attendance history: {}", e);
        Vec::new()
    })
}

/// All classes, from the cached roster.
pub fn list_classes(store: &mut RecordStore) -> Vec<ClassInfo> {
    group_classes(&cached_students(store))
}

/// Students of a class with their current status, always read from disk.
pub fn students_in_class(store: &mut RecordStore, class_id: i64) -> Vec<Student> {
    match store.reload_students() {
        Ok(students) => students
            .into_iter()
            .filter(|s| s.class_id == class_id)
            .collect(),
        Err(e) => {
            tracing::error!("Failed to reload roster: {}", e);
            Vec::new()
        }
    }
}

/// History records matching every given filter.
pub fn filter_history(
    store: &RecordStore,
    class_id: Option<i64>,
    date: Option<&str>,
) -> Vec<AttendanceRecord> {
    history(store)
        .into_iter()
        .filter(|r| class_id.map_or(true, |id| r.class_id == id))
        .filter(|r| date.map_or(true, |d| r.date_string() == d))
        .collect()
}

/// Case-insensitive substring search on student names, from the cached roster.
pub fn search_by_name(store: &mut RecordStore, query: &str) -> Vec<Student> {
    let needle = query.to_lowercase();
    cached_students(store)
        .into_iter()
        .filter(|s| s.name.to_lowercase().contains(&needle))
        .collect()
}

/// Statistics for a class from the cached roster and the current history.
pub fn class_statistics(store: &mut RecordStore, class_id: i64) -> ClassStatistics {
    let students = cached_students(store);
    statistics::compute(class_id, &students, &history(store))
}
