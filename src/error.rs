use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Field-level validation failures, each with a stable wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    CourseNameRequired,
    CourseCodeRequired,
    RollNumberRequired,
    FirstNameRequired,
    CourseDoesNotExist,
    StudentDoesNotExist,
}

impl ErrorCode {
    pub fn code(self) -> &'static str {
        match self {
            ErrorCode::CourseNameRequired => "COURSE001",
            ErrorCode::CourseCodeRequired => "COURSE002",
            ErrorCode::RollNumberRequired => "STUDENT001",
            ErrorCode::FirstNameRequired => "STUDENT002",
            ErrorCode::CourseDoesNotExist => "ENROLLMENT001",
            ErrorCode::StudentDoesNotExist => "ENROLLMENT002",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::CourseNameRequired => "Course Name is required",
            ErrorCode::CourseCodeRequired => "Course Code is required",
            ErrorCode::RollNumberRequired => "Roll Number required",
            ErrorCode::FirstNameRequired => "First Name is required",
            ErrorCode::CourseDoesNotExist => "Course does not exist",
            ErrorCode::StudentDoesNotExist => "Student does not exist",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Not found")]
    NotFound,

    #[error("Already exists")]
    Conflict,

    #[error("{}: {}", .0.code(), .0.message())]
    Invalid(ErrorCode),
}

// A unique index rejecting a write is the same outcome as the explicit
// existence check losing a race, so both answer 409.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let unique = err
            .as_database_error()
            .is_some_and(|db_err| db_err.is_unique_violation());
        if unique {
            AppError::Conflict
        } else {
            AppError::Database(err)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_code: String,
    pub error_message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::Conflict => StatusCode::CONFLICT.into_response(),
            AppError::Invalid(code) => {
                let body = Json(ErrorResponse {
                    error_code: code.code().to_string(),
                    error_message: code.message().to_string(),
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::Database(e) => {
                error!("database error: {}", e);
                let body = Json(ErrorResponse {
                    error_code: "INTERNAL".to_string(),
                    error_message: "Database error occurred".to_string(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
