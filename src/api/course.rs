use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;

use crate::api::body::RequestBody;
use crate::db::repository;
use crate::error::{AppError, ErrorCode};
use crate::models::{Course, CourseRequest, NewCourse};
use crate::state::AppState;

pub async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = repository::fetch_courses(&state.db).await?;
    Ok(Json(courses))
}

pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<Json<Course>, AppError> {
    let course = repository::find_course(&state.db, course_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(course))
}

pub async fn update_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    RequestBody(req): RequestBody<CourseRequest>,
) -> Result<Json<Course>, AppError> {
    let (course_name, course_code) = required_fields(&req)?;

    let mut course = repository::find_course(&state.db, course_id)
        .await?
        .ok_or(AppError::NotFound)?;
    course.course_name = course_name;
    course.course_code = course_code;
    if let Some(description) = req.course_description.filter(|d| !d.is_empty()) {
        course.course_description = Some(description);
    }

    repository::update_course(&state.db, &course).await?;
    Ok(Json(course))
}

pub async fn create_course(
    State(state): State<AppState>,
    RequestBody(req): RequestBody<CourseRequest>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let (course_name, course_code) = required_fields(&req)?;

    if repository::find_course_by_code(&state.db, &course_code).await?.is_some() {
        return Err(AppError::Conflict);
    }

    let course = repository::insert_course(
        &state.db,
        NewCourse {
            course_name,
            course_code,
            course_description: req.course_description,
        },
    )
    .await?;
    info!("Created course {} ({})", course.course_id, course.course_code);

    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn delete_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.roster().delete_course(course_id).await?;
    Ok(StatusCode::OK)
}

fn required_fields(req: &CourseRequest) -> Result<(String, String), AppError> {
    let name = req
        .course_name
        .clone()
        .ok_or(AppError::Invalid(ErrorCode::CourseNameRequired))?;
    let code = req
        .course_code
        .clone()
        .ok_or(AppError::Invalid(ErrorCode::CourseCodeRequired))?;
    Ok((name, code))
}
