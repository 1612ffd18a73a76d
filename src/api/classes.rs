//! Class API endpoints.

use axum::extract::{rejection::PathRejection, Path, State};

use super::{lock_store, not_found_empty, success, ApiResult};
use crate::attendance::query;
use crate::errors::AppError;
use crate::models::{ClassInfo, ClassStatistics, StudentView};
use crate::AppState;

fn class_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::Validation("Class id must be an integer".to_string()))
}

/// GET /api/classes - List all classes.
pub async fn list_classes(State(state): State<AppState>) -> ApiResult<Vec<ClassInfo>> {
    let classes = query::list_classes(&mut *lock_store(&state)?);
    let message = format!("{} class(es) found", classes.len());
    success(classes, message)
}

/// GET /api/classes/:id/students - Roster of a class with current status.
pub async fn list_class_students(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Vec<StudentView>> {
    let class_id = class_id(path)?;
    let students = query::students_in_class(&mut *lock_store(&state)?, class_id);

    if students.is_empty() {
        return not_found_empty(format!("No students found in class {}", class_id));
    }

    let message = format!("{} student(s) found", students.len());
    success(students.iter().map(StudentView::from).collect(), message)
}

/// GET /api/classes/:id/stats - Attendance statistics of a class.
pub async fn class_stats(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<ClassStatistics> {
    let class_id = class_id(path)?;
    let stats = query::class_statistics(&mut *lock_store(&state)?, class_id);
    success(stats, "Statistics computed successfully")
}
