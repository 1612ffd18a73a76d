//! Student API endpoints.

use axum::extract::{rejection::QueryRejection, Query, State};
use serde::Deserialize;

use super::{lock_store, success, ApiResult};
use crate::attendance::query;
use crate::errors::AppError;
use crate::models::StudentView;
use crate::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Name fragment to look for.
    #[serde(default)]
    pub q: Option<String>,
}

/// GET /api/students/search - Search students by name.
pub async fn search_students(
    State(state): State<AppState>,
    params: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Vec<StudentView>> {
    let Query(params) = params.map_err(|e| AppError::Validation(e.body_text()))?;

    let q = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::Validation("Query parameter \"q\" is required".to_string()))?;

    let students = query::search_by_name(&mut *lock_store(&state)?, &q);
    let message = format!("{} student(s) found", students.len());
    success(students.iter().map(StudentView::from).collect(), message)
}
