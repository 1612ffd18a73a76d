//! Attendance API endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use super::{created, lock_store, success, ApiResult};
use crate::attendance::{self, query};
use crate::errors::AppError;
use crate::models::{
    parse_session_date, AttendanceRecord, SubmitAttendanceRequest, SUBMIT_REQUIRED_FIELDS,
};
use crate::AppState;

/// History filter parameters.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub class_id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Check required fields before decoding, so every missing one is reported.
fn parse_submission(body: Value) -> Result<SubmitAttendanceRequest, AppError> {
    let Some(fields) = body.as_object() else {
        return Err(AppError::Validation(
            "Request body must be a JSON object".to_string(),
        ));
    };

    let missing: Vec<&str> = SUBMIT_REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|f| !fields.contains_key(*f))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    serde_json::from_value(body)
        .map_err(|e| AppError::Validation(format!("Invalid attendance payload: {}", e)))
}

/// POST /api/attendance - Record a session.
pub async fn submit_attendance(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<()> {
    let Json(body) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    let request = parse_submission(body)?;

    let date = parse_session_date(&request.date).ok_or_else(|| {
        AppError::Validation("Date must be in YYYY-MM-DD format".to_string())
    })?;

    let outcome = attendance::submit(
        &mut *lock_store(&state)?,
        request.class_id,
        date,
        request.presencas,
    );

    if outcome.is_accepted() {
        created("Attendance saved successfully")
    } else {
        Err(AppError::Persistence(
            "Failed to save attendance".to_string(),
        ))
    }
}

/// GET /api/attendance - Query session history with optional filters.
pub async fn list_attendance(
    State(state): State<AppState>,
    params: Result<Query<HistoryQuery>, QueryRejection>,
) -> ApiResult<Vec<AttendanceRecord>> {
    let Query(params) = params.map_err(|e| AppError::Validation(e.body_text()))?;

    let records = query::filter_history(
        &*lock_store(&state)?,
        params.class_id,
        params.date.as_deref(),
    );
    let message = format!("{} record(s) found", records.len());
    success(records, message)
}
