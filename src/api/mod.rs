//! REST API module.
//!
//! Contains all API routes and handlers following the frontend contract.

mod attendance;
mod classes;
mod students;

pub use attendance::*;
pub use classes::*;
pub use students::*;

use std::sync::MutexGuard;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::store::RecordStore;
use crate::AppState;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip)]
    pub status: StatusCode,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T, message: impl Into<String>) -> ApiResult<T> {
    Ok(ApiResponse::new(data, message))
}

/// Create a 201 response without a data field.
pub fn created(message: impl Into<String>) -> ApiResult<()> {
    Ok(ApiResponse {
        status: StatusCode::CREATED,
        success: true,
        message: message.into(),
        data: None,
    })
}

/// 404 that still carries an empty list, for lookups that found nothing.
pub fn not_found_empty<T: Serialize>(message: impl Into<String>) -> ApiResult<Vec<T>> {
    Ok(ApiResponse {
        status: StatusCode::NOT_FOUND,
        success: false,
        message: message.into(),
        data: Some(Vec::new()),
    })
}

/// Take the record store for the duration of one request.
pub(crate) fn lock_store(state: &AppState) -> Result<MutexGuard<'_, RecordStore>, AppError> {
    state
        .store
        .lock()
        .map_err(|_| AppError::Internal("record store lock poisoned".to_string()))
}

/// Fallback for unknown routes.
pub async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

/// Fallback for known routes called with the wrong method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
