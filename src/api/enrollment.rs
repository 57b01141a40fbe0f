use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;

use crate::api::body::RequestBody;
use crate::db::repository;
use crate::error::{AppError, ErrorCode};
use crate::models::{Enrollment, EnrollmentRequest};
use crate::state::AppState;

pub async fn list_enrollments(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Result<Json<Vec<Enrollment>>, AppError> {
    if repository::find_student(&state.db, student_id).await?.is_none() {
        return Err(AppError::Invalid(ErrorCode::StudentDoesNotExist));
    }

    let enrollments = repository::fetch_enrollments_for_student(&state.db, student_id).await?;
    if enrollments.is_empty() {
        return Err(AppError::NotFound);
    }
    Ok(Json(enrollments))
}

pub async fn create_enrollment(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
    RequestBody(req): RequestBody<EnrollmentRequest>,
) -> Result<(StatusCode, Json<Vec<Enrollment>>), AppError> {
    let course = match req.course_id {
        Some(course_id) => repository::find_course(&state.db, course_id).await?,
        None => None,
    };
    let course = course.ok_or(AppError::Invalid(ErrorCode::CourseDoesNotExist))?;

    if repository::find_student(&state.db, student_id).await?.is_none() {
        return Err(AppError::Invalid(ErrorCode::StudentDoesNotExist));
    }

    let enrollment = repository::insert_enrollment(&state.db, student_id, course.course_id).await?;
    info!(
        "Enrolled student {} in course {} ({})",
        student_id, course.course_id, enrollment.enrollment_id
    );

    let enrollments = repository::fetch_enrollments_for_student(&state.db, student_id).await?;
    Ok((StatusCode::CREATED, Json(enrollments)))
}

pub async fn delete_enrollment(
    State(state): State<AppState>,
    Path((student_id, course_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    let enrollment = repository::find_enrollment(&state.db, student_id, course_id)
        .await?
        .ok_or(AppError::NotFound)?;

    repository::delete_enrollment(&state.db, enrollment.enrollment_id).await?;
    info!("Deleted enrollment {}", enrollment.enrollment_id);
    Ok(StatusCode::OK)
}
